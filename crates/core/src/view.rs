//! Render-ready projection of a cart.
//!
//! [`CartView::build`] resolves every line against the catalog and
//! recomputes subtotals and the total from scratch. Rendering layers (HTML
//! templates, JSON, CLI logs) consume the view and never touch the cart.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::types::ProductId;
use crate::types::price::to_cents;

/// Format an amount to exactly two decimal places, without a currency symbol.
///
/// Extra digits are rounded half away from zero.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    to_cents(amount)
}

/// One cart line, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub image_ref: String,
    pub quantity: u32,
    /// Unit price with currency symbol (e.g., "$5.99").
    pub unit_price: String,
    /// Quantity x unit price with currency symbol.
    pub subtotal: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    /// Total to two decimal places, without symbol (e.g., "19.47").
    pub total: String,
    /// Total with currency symbol (e.g., "$19.47").
    pub total_display: String,
}

impl CartView {
    /// Build the view for `cart`, in cart insertion order.
    ///
    /// Lines whose product is missing from `catalog` are skipped.
    #[must_use]
    pub fn build(cart: &Cart, catalog: &Catalog) -> Self {
        let mut lines = Vec::with_capacity(cart.lines().len());
        let mut total_amount = Decimal::ZERO;
        let mut item_count = 0u32;

        for line in cart.lines() {
            let Some(product) = catalog.get(line.product_id) else {
                continue;
            };
            let subtotal = product.unit_price * Decimal::from(line.quantity);
            total_amount += subtotal;
            item_count = item_count.saturating_add(line.quantity);

            lines.push(CartLineView {
                product_id: product.id,
                name: product.name.clone(),
                image_ref: product.image_ref.clone(),
                quantity: line.quantity,
                unit_price: catalog.price(product.unit_price).display(),
                subtotal: catalog.price(subtotal).display(),
            });
        }

        Self {
            lines,
            item_count,
            total_amount,
            total: format_amount(total_amount),
            total_display: catalog.price(total_amount).display(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
