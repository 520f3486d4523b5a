//! CustomTee storefront library.
//!
//! Server-rendered shop for ready-made and customer-designed t-shirts. The
//! binary in `main.rs` serves [`app::build_app`]; everything is exposed as a
//! library so the integration tests can run the same router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod catalog;
pub mod config;
pub mod customizer;
pub mod error;
pub mod filters;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod views;
