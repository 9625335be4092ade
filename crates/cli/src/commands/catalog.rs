//! Catalog inspection commands.

use std::path::{Path, PathBuf};

use comic_cart_storefront::catalog::load_catalog;
use tracing::info;

/// Log every product of the resolved catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn list(file: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = super::resolve_catalog(file)?;

    info!(
        products = catalog.len(),
        currency = catalog.currency().code(),
        "Catalog"
    );
    for product in catalog.products() {
        info!(
            "  #{:<4} {:<32} {:>8}  {}",
            product.id,
            product.name,
            catalog.price(product.unit_price).display(),
            product.image_ref
        );
    }

    Ok(())
}

/// Parse and validate a catalog file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or violates catalog invariants.
pub fn validate(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!(path = %file.display(), "Validating catalog");

    let catalog = load_catalog(Some(file))?;

    info!(
        products = catalog.len(),
        currency = catalog.currency().code(),
        "Catalog is valid"
    );
    Ok(())
}
