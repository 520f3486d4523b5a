//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (one span per request)
//! 3. Request ID (recorded on the request span)
//! 4. Security headers (CSP, frame and sniffing protection)
//! 5. Session layer (tower-sessions with an in-memory store)
//! 6. Rate limiting (governor, form submissions only)

pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use rate_limit::{RateLimiterLayer, form_rate_limiter};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{SESSION_COOKIE_NAME, SessionKeyError, create_session_layer};
