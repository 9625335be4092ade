//! Session-backed models for storefront.

pub mod session;

pub use session::{flash_notice, keys as session_keys, load_cart, store_cart, take_notice};
