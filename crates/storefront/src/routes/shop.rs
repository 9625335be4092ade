//! Shop page route handler.
//!
//! Renders the three mounting points (catalog, cart lines, total) in one
//! page from the session's cart. Every cart action redirects back here, so
//! the whole view is recomputed after each change.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use comic_cart_core::{Cart, CartView, Catalog, Notice, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::config::LineLayout;
use crate::error::Result;
use crate::filters;
use crate::models::{load_cart, take_notice};
use crate::state::AppState;

/// Optional `?layout=` override for the cart line markup.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LayoutQuery {
    pub layout: Option<LineLayout>,
}

impl LayoutQuery {
    /// The requested layout, falling back to `default`.
    #[must_use]
    pub fn resolve(&self, default: LineLayout) -> LineLayout {
        self.layout.unwrap_or(default)
    }

    /// Query string that carries the override across form posts.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.layout
            .map(|layout| format!("?layout={}", layout.as_str()))
            .unwrap_or_default()
    }
}

/// Catalog entry display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub image_ref: String,
}

/// Notice display data for templates.
#[derive(Clone)]
pub struct NoticeView {
    pub message: &'static str,
    pub warning: bool,
}

impl From<Notice> for NoticeView {
    fn from(notice: Notice) -> Self {
        Self {
            message: notice.message(),
            warning: notice.is_warning(),
        }
    }
}

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop.html")]
pub struct ShopTemplate {
    pub products: Vec<ProductCardView>,
    pub cart: CartView,
    pub notice: Option<NoticeView>,
    pub editable: bool,
    pub currency_symbol: &'static str,
    pub layout_query: String,
}

impl ShopTemplate {
    /// Assemble the page for `cart` against `catalog`.
    #[must_use]
    pub fn build(
        catalog: &Catalog,
        cart: &Cart,
        notice: Option<Notice>,
        layout: LineLayout,
        layout_query: String,
    ) -> Self {
        let products = catalog
            .products()
            .iter()
            .map(|p| ProductCardView {
                id: p.id,
                name: p.name.clone(),
                price: catalog.price(p.unit_price).display(),
                image_ref: p.image_ref.clone(),
            })
            .collect();

        Self {
            products,
            cart: CartView::build(cart, catalog),
            notice: notice.map(NoticeView::from),
            editable: layout == LineLayout::Editable,
            currency_symbol: catalog.currency().symbol(),
            layout_query,
        }
    }
}

/// Display the shop page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<LayoutQuery>,
) -> Result<ShopTemplate> {
    let cart = load_cart(&session).await?;
    let notice = take_notice(&session).await?;
    let layout = query.resolve(state.config().cart_layout);

    Ok(ShopTemplate::build(
        state.catalog(),
        &cart,
        notice,
        layout,
        query.query_string(),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;

    fn scenario_cart(catalog: &Catalog) -> Cart {
        let mut cart = Cart::new();
        cart.add(catalog, ProductId::new(1)).unwrap();
        cart.add(catalog, ProductId::new(1)).unwrap();
        cart.add(catalog, ProductId::new(2)).unwrap();
        cart
    }

    #[test]
    fn test_layout_query_string() {
        assert_eq!(LayoutQuery::default().query_string(), "");
        let query = LayoutQuery {
            layout: Some(LineLayout::Compact),
        };
        assert_eq!(query.query_string(), "?layout=compact");
        assert_eq!(query.resolve(LineLayout::Editable), LineLayout::Compact);
    }

    #[test]
    fn test_render_editable_layout() {
        let catalog = builtin_catalog().unwrap();
        let cart = scenario_cart(&catalog);
        let page = ShopTemplate::build(&catalog, &cart, None, LineLayout::Editable, String::new())
            .render()
            .unwrap();

        assert!(page.contains("id=\"catalog\""));
        assert!(page.contains("id=\"cart-items\""));
        assert!(page.contains("<span id=\"total\">19.47</span>"));
        assert!(page.contains("name=\"quantity\""));
        assert!(page.contains("= $11.98"));
        assert!(page.contains("/images/spiderman.svg"));
    }

    #[test]
    fn test_render_compact_layout() {
        let catalog = builtin_catalog().unwrap();
        let cart = scenario_cart(&catalog);
        let page = ShopTemplate::build(
            &catalog,
            &cart,
            None,
            LineLayout::Compact,
            "?layout=compact".to_string(),
        )
        .render()
        .unwrap();

        assert!(!page.contains("name=\"quantity\""));
        assert!(page.contains("Spider-Man #1 x 2"));
        assert!(page.contains("action=\"/cart/remove?layout=compact\""));
    }

    #[test]
    fn test_render_notice_and_empty_cart() {
        let catalog = builtin_catalog().unwrap();
        let page = ShopTemplate::build(
            &catalog,
            &Cart::new(),
            Some(Notice::CartEmpty),
            LineLayout::Editable,
            String::new(),
        )
        .render()
        .unwrap();

        assert!(page.contains("role=\"alert\""));
        assert!(page.contains("notice-warning"));
        assert!(page.contains("<span id=\"total\">0.00</span>"));
    }
}
