//! JSON API over the same cart transitions as the HTML forms.
//!
//! ```text
//! GET  /api/catalog - catalog as JSON
//! GET  /api/cart    - current cart view
//! POST /api/cart    - apply one action, returns {cart, notice}
//! ```

use axum::{Json, extract::State};
use comic_cart_core::{CartAction, CartView, Catalog, Notice, ProductId};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::load_cart;
use crate::routes::cart::apply_action;
use crate::state::AppState;

/// Quantity as sent by a client, either a JSON number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    Number(serde_json::Number),
    Text(String),
}

impl From<RawQuantity> for String {
    fn from(raw: RawQuantity) -> Self {
        match raw {
            RawQuantity::Number(n) => n.to_string(),
            RawQuantity::Text(s) => s,
        }
    }
}

/// Action request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionRequest {
    Add {
        product_id: ProductId,
    },
    SetQuantity {
        product_id: ProductId,
        quantity: RawQuantity,
    },
    Remove {
        product_id: ProductId,
    },
    Checkout,
}

impl From<ActionRequest> for CartAction {
    fn from(request: ActionRequest) -> Self {
        match request {
            ActionRequest::Add { product_id } => Self::Add { product_id },
            ActionRequest::SetQuantity {
                product_id,
                quantity,
            } => Self::SetQuantity {
                product_id,
                quantity: quantity.into(),
            },
            ActionRequest::Remove { product_id } => Self::Remove { product_id },
            ActionRequest::Checkout => Self::Checkout,
        }
    }
}

/// Notice as returned to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct NoticeBody {
    pub kind: Notice,
    pub message: &'static str,
}

impl From<Notice> for NoticeBody {
    fn from(kind: Notice) -> Self {
        Self {
            kind,
            message: kind.message(),
        }
    }
}

/// Cart response body.
#[derive(Debug, Clone, Serialize)]
pub struct CartResponse {
    pub cart: CartView,
    pub notice: Option<NoticeBody>,
}

/// Return the catalog.
#[instrument(skip(state))]
pub async fn catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.catalog().clone())
}

/// Return the session's cart view.
#[instrument(skip(state, session))]
pub async fn cart(State(state): State<AppState>, session: Session) -> Result<Json<CartResponse>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartResponse {
        cart: CartView::build(&cart, state.catalog()),
        notice: None,
    }))
}

/// Apply one action to the session's cart.
#[instrument(skip(state, session))]
pub async fn apply(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<ActionRequest>,
) -> Result<Json<CartResponse>> {
    let action = CartAction::from(request);
    let (cart, outcome) = apply_action(&state, &session, &action).await?;

    Ok(Json(CartResponse {
        cart: CartView::build(&cart, state.catalog()),
        notice: outcome.notice().map(NoticeBody::from),
    }))
}
