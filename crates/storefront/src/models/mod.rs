//! Domain models for storefront.

pub mod session;

pub use session::{Notice, NoticeKind, OrderConfirmation, VisitorSession, keys as session_keys};
