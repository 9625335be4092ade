//! Cart route handlers.
//!
//! Plain HTML form posts. Each handler applies one transition to the
//! session's cart, flashes any checkout notice, and redirects to `/shop`
//! (303 See Other) so the page is re-rendered from the new state.

use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use comic_cart_core::{Cart, CartAction, Outcome, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::{flash_notice, load_cart, store_cart};
use crate::routes::shop::LayoutQuery;
use crate::state::AppState;

/// Add / remove form data.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: ProductId,
}

/// Update quantity form data.
///
/// `quantity` stays a string: unparseable input is ignored by the cart, not
/// rejected by the extractor.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityForm {
    pub product_id: ProductId,
    pub quantity: String,
}

/// Apply `action` to the session's cart and store the result.
///
/// The cart is only written back when the transition changed it.
///
/// # Errors
///
/// Returns `AppError::Cart` for unknown products and `AppError::Session` if
/// the session store fails.
pub async fn apply_action(
    state: &AppState,
    session: &Session,
    action: &CartAction,
) -> Result<(Cart, Outcome)> {
    let mut cart = load_cart(session).await?;

    let outcome = cart
        .apply(state.catalog(), action)
        .inspect_err(|e| tracing::warn!(?action, "Rejected cart action: {e}"))?;

    if outcome.changed() {
        store_cart(session, &cart).await?;
    }

    if let Outcome::CheckedOut { items, total } = outcome {
        tracing::info!(items, %total, "Checkout completed");
    }

    tracing::debug!(
        ?action,
        ?outcome,
        items = cart.item_count(),
        "Cart action applied"
    );
    Ok((cart, outcome))
}

/// Apply a form action and redirect back to the shop page.
async fn submit(
    state: &AppState,
    session: &Session,
    query: LayoutQuery,
    action: CartAction,
) -> Result<Redirect> {
    let (_, outcome) = apply_action(state, session, &action).await?;

    if let Some(notice) = outcome.notice() {
        flash_notice(session, notice).await?;
    }

    Ok(Redirect::to(&format!("/shop{}", query.query_string())))
}

/// Add one unit of a product.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<LayoutQuery>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let action = CartAction::Add {
        product_id: form.product_id,
    };
    submit(&state, &session, query, action).await
}

/// Set a line's quantity.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<LayoutQuery>,
    Form(form): Form<UpdateQuantityForm>,
) -> Result<Redirect> {
    let action = CartAction::SetQuantity {
        product_id: form.product_id,
        quantity: form.quantity,
    };
    submit(&state, &session, query, action).await
}

/// Remove one unit of a product.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<LayoutQuery>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let action = CartAction::Remove {
        product_id: form.product_id,
    };
    submit(&state, &session, query, action).await
}

/// Check out: acknowledge payment and clear the cart.
#[instrument(skip(state, session))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<LayoutQuery>,
) -> Result<Redirect> {
    submit(&state, &session, query, CartAction::Checkout).await
}
