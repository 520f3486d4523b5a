//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page
//! GET  /health                  - Liveness check
//!
//! # Catalog
//! GET  /produtos                - Product listing (?categoria=slug)
//! GET  /produto/{id}            - Product detail
//! POST /produto/{id}/carrinho   - Add to cart (action=add|buy)
//!
//! # Custom shirt designer
//! GET  /personalizar            - Designer with SVG preview
//! POST /personalizar/imagem     - Photo upload (multipart, field `imagem`)
//! GET  /personalizar/arte/{id}  - Uploaded photo bytes
//! POST /personalizar/ajustes    - Color, size, scale and position
//! POST /personalizar/resetar    - Reset scale and position
//! POST /personalizar/remover    - Drop the photo
//! POST /personalizar/carrinho   - Add the design to the cart
//!
//! # Cart and checkout
//! GET  /checkout                - Cart review and checkout form
//! POST /checkout                - Place the order
//! GET  /checkout/confirmado     - Order confirmation
//! POST /carrinho/remover        - Remove a line (or every line of a product)
//! POST /carrinho/quantidade     - Set a line quantity
//! GET  /carrinho/contagem       - Cart count badge (fragment)
//!
//! # Pages
//! GET  /sobre                   - About
//! GET  /contato                 - Contact form
//! POST /contato                 - Send a contact message
//! ```
//!
//! Every POST route is rate limited per client IP.

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod customize;
pub mod home;
pub mod pages;
pub mod products;

use std::convert::Infallible;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::customizer::MAX_UPLOAD_BYTES;
use crate::middleware::{RateLimiterLayer, form_rate_limiter};
use crate::state::AppState;

/// Room for multipart boundaries and headers around the photo.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the catalog routes router.
pub fn product_routes(limiter: &RateLimiterLayer) -> Router<AppState> {
    Router::new()
        .route("/produtos", get(products::index))
        .route("/produto/{id}", get(products::show))
        .route(
            "/produto/{id}/carrinho",
            post(products::add_to_cart).layer(limiter.clone()),
        )
}

/// Create the designer routes router.
pub fn customize_routes(limiter: &RateLimiterLayer) -> Router<AppState> {
    Router::new()
        .route("/", get(customize::show))
        .route(
            "/imagem",
            post(customize::upload)
                .layer::<_, Infallible>(DefaultBodyLimit::max(
                    MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES,
                ))
                .layer(limiter.clone()),
        )
        .route("/arte/{id}", get(customize::artwork))
        .route("/ajustes", post(customize::adjust).layer(limiter.clone()))
        .route("/resetar", post(customize::reset).layer(limiter.clone()))
        .route("/remover", post(customize::remove).layer(limiter.clone()))
        .route(
            "/carrinho",
            post(customize::add_to_cart).layer(limiter.clone()),
        )
}

/// Create the cart routes router.
pub fn cart_routes(limiter: &RateLimiterLayer) -> Router<AppState> {
    Router::new()
        .route("/remover", post(cart::remove).layer(limiter.clone()))
        .route("/quantidade", post(cart::quantity).layer(limiter.clone()))
        .route("/contagem", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes(limiter: &RateLimiterLayer) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(checkout::show).merge(post(checkout::submit).layer(limiter.clone())),
        )
        .route("/confirmado", get(checkout::confirmed))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    let limiter = form_rate_limiter();

    Router::new()
        // Home page
        .route("/", get(home::home))
        .route("/health", get(health))
        .merge(product_routes(&limiter))
        .nest("/personalizar", customize_routes(&limiter))
        .nest("/carrinho", cart_routes(&limiter))
        .nest("/checkout", checkout_routes(&limiter))
        // Pages
        .route("/sobre", get(pages::about))
        .route(
            "/contato",
            get(contact::show).merge(post(contact::submit).layer(limiter)),
        )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}
