//! Session-stored cart state.
//!
//! Each browser session owns exactly one [`Cart`]. Handlers load it, apply
//! one transition and store it back; no cart is shared between requests.

use comic_cart_core::{Cart, Notice};
use tower_sessions::Session;
use tower_sessions::session::Error;

/// Session keys for cart data.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";

    /// Key for a notice waiting to be shown on the next page render.
    pub const NOTICE: &str = "notice";
}

/// Load the session's cart, or an empty cart for a new session.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored value is corrupt.
pub async fn load_cart(session: &Session) -> Result<Cart, Error> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Store the session's cart.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn store_cart(session: &Session, cart: &Cart) -> Result<(), Error> {
    session.insert(keys::CART, cart).await
}

/// Queue a notice for the next page render.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn flash_notice(session: &Session, notice: Notice) -> Result<(), Error> {
    session.insert(keys::NOTICE, notice).await
}

/// Take the queued notice, removing it from the session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn take_notice(session: &Session) -> Result<Option<Notice>, Error> {
    session.remove::<Notice>(keys::NOTICE).await
}
