//! Comic Cart Core - catalog, cart and view model.
//!
//! This crate provides the domain used by every Comic Cart component:
//! - `storefront` - HTTP server hosting the shop and its static files
//! - `cli` - Command-line tools for catalogs and cart simulation
//!
//! # Architecture
//!
//! The core crate contains only types and pure transitions - no I/O, no HTTP,
//! no sessions. A [`Cart`] is an owned value; every operation takes it
//! explicitly together with the [`Catalog`] it refers to.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and prices
//! - [`catalog`] - Immutable product list
//! - [`cart`] - Cart state machine
//! - [`view`] - Render-ready projection of a cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;
pub mod view;

pub use cart::{Cart, CartAction, CartError, CartLine, Notice, Outcome, parse_quantity};
pub use catalog::{Catalog, CatalogError, Product};
pub use types::*;
pub use view::{CartLineView, CartView, format_amount};
