//! Integration tests for Comic Cart.
//!
//! Each test starts the full storefront router on an ephemeral port and talks
//! to it over HTTP with a cookie-keeping client, so every test owns its own
//! session (and therefore its own cart).
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p comic-cart-integration-tests
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use comic_cart_storefront::catalog::builtin_catalog;
use comic_cart_storefront::config::{LineLayout, ShopConfig};
use comic_cart_storefront::routes::router;
use comic_cart_storefront::state::AppState;
use reqwest::Client;
use tokio::net::TcpListener;

/// Static directory shipped with the storefront crate.
#[must_use]
pub fn static_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static"))
}

/// A storefront running in the background for one test.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestServer {
    /// Start a server with the built-in catalog and default settings.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind or the client cannot be built.
    pub async fn start() -> Self {
        Self::start_with_layout(LineLayout::default()).await
    }

    /// Start a server with a given default cart line layout.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind or the client cannot be built.
    pub async fn start_with_layout(cart_layout: LineLayout) -> Self {
        let config = ShopConfig {
            static_dir: static_dir(),
            cart_layout,
            ..ShopConfig::default()
        };
        let catalog = builtin_catalog().expect("built-in catalog is valid");
        let app = router(AppState::new(config, catalog));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("test server failed");
        });

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { addr, client }
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}
