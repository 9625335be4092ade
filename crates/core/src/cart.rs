//! Cart state machine.
//!
//! A [`Cart`] maps product ids to positive quantities, in insertion order.
//! It has four transitions: [`Cart::add`], [`Cart::set_quantity`],
//! [`Cart::remove`] and [`Cart::checkout`]. Each one takes the cart by
//! `&mut self` alongside the [`Catalog`] it refers to and reports an
//! [`Outcome`]; nothing here is global.
//!
//! Invariants upheld by every transition:
//! - every line references a product of the catalog it was mutated against
//! - every quantity is at least 1; a line that would drop to 0 is removed

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::types::ProductId;

/// Errors produced by cart transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("unknown product {0}")]
    UnknownProduct(ProductId),
}

/// One product's presence in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A user action against the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CartAction {
    Add {
        product_id: ProductId,
    },
    /// `quantity` is raw user input; see [`parse_quantity`].
    SetQuantity {
        product_id: ProductId,
        quantity: String,
    },
    Remove {
        product_id: ProductId,
    },
    Checkout,
}

/// What a transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Cart contents changed.
    Updated,
    /// The action was discarded and the cart is untouched.
    Ignored,
    /// Checkout succeeded and the cart is now empty.
    CheckedOut { items: u32, total: Decimal },
    /// Checkout was attempted on an empty cart.
    EmptyCheckout,
}

impl Outcome {
    /// The user-visible notice for this outcome, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<Notice> {
        match self {
            Self::CheckedOut { .. } => Some(Notice::PaymentSucceeded),
            Self::EmptyCheckout => Some(Notice::CartEmpty),
            Self::Updated | Self::Ignored => None,
        }
    }

    /// Whether the cart was modified.
    #[must_use]
    pub const fn changed(&self) -> bool {
        matches!(self, Self::Updated | Self::CheckedOut { .. })
    }
}

/// One-shot message shown to the shopper after checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    CartEmpty,
    PaymentSucceeded,
}

impl Notice {
    /// Message text for display.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::CartEmpty => "Your cart is empty.",
            Self::PaymentSucceeded => "Payment successful. Thank you for your purchase!",
        }
    }

    /// Whether the notice reports a failed action.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::CartEmpty)
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Parse a quantity typed by the shopper.
///
/// Leading whitespace and an optional `+` are skipped, then the leading run
/// of ASCII digits is read; anything after it is ignored (`"3.9"` is 3,
/// `"5 comics"` is 5). Returns `None` when there are no digits or when the
/// value is zero or negative. Values above `u32::MAX` saturate.
#[must_use]
pub fn parse_quantity(raw: &str) -> Option<u32> {
    let s = raw.trim_start();
    if s.starts_with('-') {
        return None;
    }

    let unsigned = s.strip_prefix('+').unwrap_or(s);
    let digits = unsigned
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or_default();
    if digits.is_empty() {
        return None;
    }

    // Only digits remain, so a parse failure means overflow.
    match digits.parse::<u32>() {
        Ok(0) => None,
        Ok(quantity) => Some(quantity),
        Err(_) => Some(u32::MAX),
    }
}

/// Mapping from product id to quantity, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity of `id` in the cart, 0 when absent.
    #[must_use]
    pub fn quantity(&self, id: ProductId) -> u32 {
        self.line(id).map_or(0, |line| line.quantity)
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Sum of quantity x unit price over every line, recomputed on each call.
    #[must_use]
    pub fn total(&self, catalog: &Catalog) -> Decimal {
        self.lines
            .iter()
            .filter_map(|line| {
                catalog
                    .get(line.product_id)
                    .map(|p| p.unit_price * Decimal::from(line.quantity))
            })
            .sum()
    }

    /// Increment the quantity of `id` by one, inserting it if absent.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownProduct` if `id` is not in `catalog`.
    pub fn add(&mut self, catalog: &Catalog, id: ProductId) -> Result<Outcome, CartError> {
        ensure_known(catalog, id)?;

        match self.line_mut(id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                product_id: id,
                quantity: 1,
            }),
        }
        Ok(Outcome::Updated)
    }

    /// Set the quantity of `id` to the value parsed from `raw`.
    ///
    /// Input that [`parse_quantity`] rejects is ignored. A product not yet in
    /// the cart is inserted with the given quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownProduct` if `id` is not in `catalog`.
    pub fn set_quantity(
        &mut self,
        catalog: &Catalog,
        id: ProductId,
        raw: &str,
    ) -> Result<Outcome, CartError> {
        ensure_known(catalog, id)?;

        let Some(quantity) = parse_quantity(raw) else {
            return Ok(Outcome::Ignored);
        };

        match self.line_mut(id) {
            Some(line) if line.quantity == quantity => return Ok(Outcome::Ignored),
            Some(line) => line.quantity = quantity,
            None => self.lines.push(CartLine {
                product_id: id,
                quantity,
            }),
        }
        Ok(Outcome::Updated)
    }

    /// Decrement the quantity of `id` by one, dropping the line at zero.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownProduct` if `id` is not in `catalog`.
    pub fn remove(&mut self, catalog: &Catalog, id: ProductId) -> Result<Outcome, CartError> {
        ensure_known(catalog, id)?;

        let Some(index) = self.lines.iter().position(|l| l.product_id == id) else {
            return Ok(Outcome::Ignored);
        };

        match self.lines.get_mut(index) {
            Some(line) if line.quantity > 1 => line.quantity -= 1,
            _ => {
                self.lines.remove(index);
            }
        }
        Ok(Outcome::Updated)
    }

    /// Acknowledge payment and clear every line.
    pub fn checkout(&mut self, catalog: &Catalog) -> Outcome {
        if self.is_empty() {
            return Outcome::EmptyCheckout;
        }

        let items = self.item_count();
        let total = self.total(catalog);
        self.lines.clear();
        Outcome::CheckedOut { items, total }
    }

    /// Dispatch an action to the matching transition.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownProduct` if the action names a product not in `catalog`.
    pub fn apply(&mut self, catalog: &Catalog, action: &CartAction) -> Result<Outcome, CartError> {
        match action {
            CartAction::Add { product_id } => self.add(catalog, *product_id),
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => self.set_quantity(catalog, *product_id, quantity),
            CartAction::Remove { product_id } => self.remove(catalog, *product_id),
            CartAction::Checkout => Ok(self.checkout(catalog)),
        }
    }

    fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == id)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == id)
    }
}

fn ensure_known(catalog: &Catalog, id: ProductId) -> Result<(), CartError> {
    if catalog.contains(id) {
        Ok(())
    } else {
        Err(CartError::UnknownProduct(id))
    }
}
