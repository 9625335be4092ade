//! Entry route and static file serving.

use comic_cart_integration_tests::TestServer;
use reqwest::StatusCode;

#[tokio::test]
async fn test_health() {
    let server = TestServer::start().await;
    let resp = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .expect("Failed to get /health");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read body"), "ok");
}

#[tokio::test]
async fn test_root_serves_entry_page() {
    let server = TestServer::start().await;
    let resp = server
        .client
        .get(server.url("/"))
        .send()
        .await
        .expect("Failed to get /");

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("href=\"/shop\""));
}

#[tokio::test]
async fn test_static_assets_served_by_path() {
    let server = TestServer::start().await;

    for path in [
        "/login.html",
        "/css/main.css",
        "/images/spiderman.svg",
        "/images/batman.svg",
        "/images/xmen.svg",
    ] {
        let resp = server
            .client
            .get(server.url(path))
            .send()
            .await
            .expect("Failed to get static file");
        assert_eq!(resp.status(), StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let server = TestServer::start().await;
    let resp = server
        .client
        .get(server.url("/does/not/exist.png"))
        .send()
        .await
        .expect("Failed to get missing file");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
