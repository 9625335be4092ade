//! Immutable product catalog.
//!
//! A [`Catalog`] is built once at startup and never mutated. Construction
//! validates the product list, so every `Catalog` in the program upholds:
//! - product ids are unique
//! - names are non-blank
//! - unit prices are non-negative

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CurrencyCode, Price, ProductId};

/// Errors produced when a product list violates catalog invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("product {0} has a blank name")]
    BlankName(ProductId),
    #[error("product {id} has a negative unit price ({price})")]
    NegativePrice { id: ProductId, price: Decimal },
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the catalog currency, written as a quoted decimal string.
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    /// Image path relative to the static root.
    pub image_ref: String,
}

impl Product {
    /// Create a new product.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: Decimal,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            image_ref: image_ref.into(),
        }
    }
}

/// Unvalidated catalog as it appears in a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    currency: CurrencyCode,
    products: Vec<Product>,
}

impl TryFrom<CatalogDocument> for Catalog {
    type Error = CatalogError;

    fn try_from(doc: CatalogDocument) -> Result<Self, Self::Error> {
        Self::new(doc.currency, doc.products)
    }
}

/// Read-only list of products, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogDocument")]
pub struct Catalog {
    currency: CurrencyCode,
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, validating every product.
    ///
    /// # Errors
    ///
    /// Returns the first `CatalogError` found while scanning the products in order.
    pub fn new(currency: CurrencyCode, products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.name.trim().is_empty() {
                return Err(CatalogError::BlankName(product.id));
            }
            if product.unit_price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice {
                    id: product.id,
                    price: product.unit_price,
                });
            }
        }

        Ok(Self { currency, products })
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Whether `id` names a product in this catalog.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// All products in declaration order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Currency every price in this catalog is expressed in.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Attach the catalog currency to an amount.
    #[must_use]
    pub const fn price(&self, amount: Decimal) -> Price {
        Price::new(amount, self.currency)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
