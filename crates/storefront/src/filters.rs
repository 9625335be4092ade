//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the content hash for main.css.
///
/// The hash is computed at build time from the CSS file content.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

/// Prefixes a static-root-relative path with `/`.
///
/// Usage in templates: `{{ product.image_ref|asset_url }}`
#[askama::filter_fn]
pub fn asset_url(path: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let path = path.to_string();
    Ok(format!("/{}", path.trim_start_matches('/')))
}
