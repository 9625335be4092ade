//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `PORT` - Listen port (default: 80)
//! - `SHOP_HOST` - Bind address (default: 0.0.0.0)
//! - `SHOP_STATIC_DIR` - Application root served as static files
//!   (default: crates/storefront/static)
//! - `SHOP_ENTRY_PAGE` - File under the static root returned for `/` (default: login.html)
//! - `SHOP_CATALOG_PATH` - YAML catalog file (default: built-in catalog)
//! - `SHOP_CART_LAYOUT` - Cart line markup, `editable` or `compact` (default: editable)
//! - `SHOP_SECURE_COOKIES` - Mark the session cookie `Secure` (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0 to 1.0 (default: 0.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_PORT: u16 = 80;
const DEFAULT_STATIC_DIR: &str = "crates/storefront/static";
const DEFAULT_ENTRY_PAGE: &str = "login.html";
const DEFAULT_SESSION_CAPACITY: u64 = 10_000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How cart lines are laid out on the shop page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineLayout {
    /// Quantity input with update and remove buttons.
    #[default]
    Editable,
    /// Name, quantity and subtotal on one line with a remove button.
    Compact,
}

impl LineLayout {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Editable => "editable",
            Self::Compact => "compact",
        }
    }
}

impl FromStr for LineLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "editable" => Ok(Self::Editable),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown cart layout: {other}")),
        }
    }
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    pub dsn: Option<String>,
    pub environment: Option<String>,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
            traces_sample_rate: 0.0,
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory whose files are served as-is
    pub static_dir: PathBuf,
    /// File under `static_dir` returned for `/`
    pub entry_page: String,
    /// Catalog file; `None` selects the built-in catalog
    pub catalog_path: Option<PathBuf>,
    /// Default cart line layout
    pub cart_layout: LineLayout,
    /// Whether the session cookie requires HTTPS
    pub secure_cookies: bool,
    /// Maximum number of sessions (carts) held in memory
    pub session_capacity: u64,
    /// Sentry configuration
    pub sentry: SentryConfig,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            entry_page: DEFAULT_ENTRY_PAGE.to_string(),
            catalog_path: None,
            cart_layout: LineLayout::default(),
            secure_cookies: false,
            session_capacity: DEFAULT_SESSION_CAPACITY,
            sentry: SentryConfig::default(),
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = parse_or(&lookup, "SHOP_HOST", defaults.host)?;
        let port = parse_or(&lookup, "PORT", defaults.port)?;
        let static_dir = lookup("SHOP_STATIC_DIR").map_or(defaults.static_dir, PathBuf::from);
        let entry_page = lookup("SHOP_ENTRY_PAGE").unwrap_or(defaults.entry_page);
        let catalog_path = lookup("SHOP_CATALOG_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let cart_layout = parse_or(&lookup, "SHOP_CART_LAYOUT", defaults.cart_layout)?;
        let secure_cookies = parse_or(&lookup, "SHOP_SECURE_COOKIES", defaults.secure_cookies)?;
        let session_capacity =
            parse_or(&lookup, "SHOP_SESSION_CAPACITY", defaults.session_capacity)?;
        if session_capacity == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SHOP_SESSION_CAPACITY".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let sentry = SentryConfig {
            dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            environment: lookup("SENTRY_ENVIRONMENT"),
            sample_rate: parse_rate(&lookup, "SENTRY_SAMPLE_RATE", defaults.sentry.sample_rate)?,
            traces_sample_rate: parse_rate(
                &lookup,
                "SENTRY_TRACES_SAMPLE_RATE",
                defaults.sentry.traces_sample_rate,
            )?,
        };

        Ok(Self {
            host,
            port,
            static_dir,
            entry_page,
            catalog_path,
            cart_layout,
            secure_cookies,
            session_capacity,
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if set, otherwise return `default`.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

/// Parse a sample rate in `[0.0, 1.0]`.
fn parse_rate<F>(lookup: &F, key: &str, default: f32) -> Result<f32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let rate = parse_or(lookup, key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}
