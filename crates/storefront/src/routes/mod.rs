//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Entry page (static file, SHOP_ENTRY_PAGE)
//! GET  /health                 - Health check
//!
//! # Shop
//! GET  /shop                   - Catalog, cart and total (?layout=editable|compact)
//!
//! # Cart (form posts, 303 back to /shop)
//! POST /cart/add               - Add one unit
//! POST /cart/update            - Set quantity
//! POST /cart/remove            - Remove one unit
//! POST /checkout               - Acknowledge payment and clear the cart
//!
//! # JSON API
//! GET  /api/catalog            - Catalog
//! GET  /api/cart               - Cart view
//! POST /api/cart               - Apply an action
//!
//! # Static files
//! *                            - Anything else is served from SHOP_STATIC_DIR
//! ```

pub mod api;
pub mod cart;
pub mod shop;

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::from_fn,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::middleware::{create_session_layer, request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(api::catalog))
        .route("/cart", get(api::cart).post(api::apply))
}

/// Create all dynamic routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shop", get(shop::show))
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .nest("/api", api_routes())
}

/// Build the full application: routes, static files and middleware.
pub fn router(state: AppState) -> Router {
    let config = state.config();
    let entry_page = config.static_dir.join(&config.entry_page);
    let static_files = ServeDir::new(&config.static_dir);

    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(create_session_layer(config));

    Router::new()
        .route("/health", get(health))
        .route_service("/", ServeFile::new(entry_page))
        .merge(routes())
        .fallback_service(static_files)
        .layer(middleware)
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
