//! CLI command implementations.

pub mod cart;
pub mod catalog;

use std::path::PathBuf;

use comic_cart_core::Catalog;
use comic_cart_storefront::catalog::{CatalogLoadError, load_catalog};

/// Resolve the catalog to use: explicit file, then `SHOP_CATALOG_PATH`, then built-in.
///
/// # Errors
///
/// Returns `CatalogLoadError` if the chosen file cannot be read or is invalid.
pub fn resolve_catalog(file: Option<PathBuf>) -> Result<Catalog, CatalogLoadError> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    let path = file.or_else(|| {
        std::env::var("SHOP_CATALOG_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    });
    load_catalog(path.as_deref())
}
