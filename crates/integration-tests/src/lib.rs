//! Integration tests for the CustomTee storefront.
//!
//! Each test starts its own storefront on an ephemeral localhost port with an
//! in-memory session store, then drives it over HTTP with a cookie-keeping
//! client. Nothing external needs to be running.
//!
//! ```bash
//! cargo test -p customtee-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `pages` - Health, static pages, 404 and security headers
//! - `cart` - Product page, cart lines and the cart badge
//! - `checkout` - Checkout validation and order confirmation
//! - `customize` - Photo upload and the custom shirt flow
//! - `contact` - Contact form validation

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::path::PathBuf;

use customtee_storefront::{
    app::build_app,
    config::{SentryConfig, StorefrontConfig},
    state::AppState,
};
use reqwest::Client;
use secrecy::SecretString;
use url::Url;

/// Cookie signing secret used by every test server. 64+ random characters.
const TEST_SESSION_SECRET: &str =
    "k7Qz2Lw9vXbN4mRt8YpHs1JdGc6FaUe3oKi5ZnWq0VjBxMyTrPl7EgCu2DhAsNf9";

/// A storefront running on an ephemeral port for the duration of a test.
pub struct TestServer {
    base_url: Url,
    client: Client,
}

impl TestServer {
    /// Build the storefront and start serving it in the background.
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind ephemeral port");
        let addr = listener.local_addr().expect("Failed to read local address");

        let state = AppState::new(test_config(addr));
        let app = build_app(state).expect("Failed to build storefront");

        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Storefront server failed");
        });

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: Url::parse(&format!("http://{addr}")).expect("Invalid base URL"),
            client,
        }
    }

    /// Client that keeps this visitor's session cookie.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// A second visitor with an empty cookie jar.
    #[must_use]
    pub fn new_visitor(&self) -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Absolute URL for a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.base_url.join(path).expect("Invalid path")
    }

    /// GET a page and return its status and body.
    pub async fn get(&self, path: &str) -> (reqwest::StatusCode, String) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed");
        let status = resp.status();
        (status, resp.text().await.expect("Failed to read body"))
    }

    /// POST a form, following redirects, and return the final status and body.
    pub async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> (reqwest::StatusCode, String) {
        let resp = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("Request failed");
        let status = resp.status();
        (status, resp.text().await.expect("Failed to read body"))
    }

    /// Current cart count as shown by the badge fragment.
    pub async fn cart_count(&self) -> u32 {
        let (_, body) = self.get("/carrinho/contagem").await;
        badge_count(&body)
    }
}

/// Read the number out of the cart badge markup; no badge means zero.
#[must_use]
pub fn badge_count(fragment: &str) -> u32 {
    fragment
        .split_once("id=\"cart-count\">")
        .and_then(|(_, rest)| rest.split_once('<'))
        .and_then(|(count, _)| count.trim().parse().ok())
        .unwrap_or(0)
}

fn test_config(addr: SocketAddr) -> StorefrontConfig {
    StorefrontConfig {
        host: addr.ip(),
        port: addr.port(),
        base_url: Url::parse(&format!("http://{addr}")).expect("Invalid base URL"),
        session_secret: SecretString::from(TEST_SESSION_SECRET),
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static"),
        sentry: SentryConfig::default(),
    }
}
