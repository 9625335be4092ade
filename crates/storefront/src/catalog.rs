//! Catalog loading.
//!
//! The catalog is read once at startup, either from the YAML file named by
//! `SHOP_CATALOG_PATH` or from the copy embedded at build time.

use std::path::{Path, PathBuf};

use comic_cart_core::Catalog;
use thiserror::Error;

/// Catalog shipped with the binary.
pub const BUILTIN_CATALOG: &str = include_str!("../data/catalog.yaml");

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Parse and validate a YAML catalog document.
///
/// # Errors
///
/// Returns `CatalogLoadError::Parse` for malformed YAML or for a product list
/// that violates catalog invariants.
pub fn parse_catalog(yaml: &str) -> Result<Catalog, CatalogLoadError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// The embedded catalog.
///
/// # Errors
///
/// Returns `CatalogLoadError::Parse` if the embedded document is invalid.
pub fn builtin_catalog() -> Result<Catalog, CatalogLoadError> {
    parse_catalog(BUILTIN_CATALOG)
}

/// Load the catalog from `path`, or the embedded catalog when `path` is `None`.
///
/// # Errors
///
/// Returns `CatalogLoadError` if the file cannot be read or parsed.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, CatalogLoadError> {
    let Some(path) = path else {
        tracing::debug!("Using built-in catalog");
        return builtin_catalog();
    };

    tracing::debug!(path = %path.display(), "Reading catalog file");
    let yaml = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&yaml)
}
