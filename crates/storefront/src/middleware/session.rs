//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions backed by a moka cache.
//! The cache holds at most [`SESSION_CAPACITY`] sessions and evicts them
//! once they expire. Session data is lost when the process restarts; the
//! cookie only carries the signed session ID.

use secrecy::ExposeSecret;
use tower_sessions::cookie::{Key, SameSite, time::Duration};
use tower_sessions::{Expiry, SessionManagerLayer, service::SignedCookie};
use tower_sessions_moka_store::MokaStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "customtee_session";

/// Maximum number of sessions held in memory.
pub const SESSION_CAPACITY: u64 = 10_000;

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// The session secret could not be turned into a cookie signing key.
#[derive(Debug, thiserror::Error)]
#[error("session secret is not a valid signing key: {0}")]
pub struct SessionKeyError(String);

/// Create the session layer with a bounded in-memory store and signed cookies.
///
/// # Errors
///
/// Returns an error if the session secret is shorter than 64 bytes.
pub fn create_session_layer(
    config: &StorefrontConfig,
) -> Result<SessionManagerLayer<MokaStore, SignedCookie>, SessionKeyError> {
    let key = Key::try_from(config.session_secret.expose_secret().as_bytes())
        .map_err(|e| SessionKeyError(e.to_string()))?;

    Ok(SessionManagerLayer::new(MokaStore::new(Some(SESSION_CAPACITY)))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            SESSION_EXPIRY_SECONDS,
        )))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}
