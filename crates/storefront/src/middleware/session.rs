//! Session middleware configuration.
//!
//! Carts live in an in-memory moka-backed session store: one cart per browser
//! session, gone when the process exits. The store holds at most
//! `session_capacity` sessions and drops each one once its expiry passes.

use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

use crate::config::ShopConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "comic_cart_session";

/// Session expiry time in seconds (1 day of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the bounded in-memory session store.
#[must_use]
pub fn create_session_store(config: &ShopConfig) -> MokaStore {
    MokaStore::new(Some(config.session_capacity))
}

/// Create the session layer over a fresh session store.
#[must_use]
pub fn create_session_layer(config: &ShopConfig) -> SessionManagerLayer<MokaStore> {
    SessionManagerLayer::new(create_session_store(config))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
