//! CustomTee Core - Shared domain types.
//!
//! This crate provides the types used by the CustomTee storefront:
//! products, prices, email addresses and the shopping cart.
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP, no
//! session handling. This keeps it lightweight and easy to test.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, sizes and products
//! - [`cart`] - The cart container and its merge rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartError, CartItem, LineKey, MAX_LINE_QUANTITY};
pub use types::*;
