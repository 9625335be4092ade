//! Shop page and HTML form flow.

use comic_cart_integration_tests::TestServer;
use comic_cart_storefront::config::LineLayout;
use reqwest::StatusCode;

async fn post_form(server: &TestServer, path: &str, form: &[(&str, &str)]) -> String {
    let resp = server
        .client
        .post(server.url(path))
        .form(form)
        .send()
        .await
        .expect("Failed to post form");

    // The 303 is followed, so the shop page comes back.
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.url().path().ends_with("/shop"));
    resp.text().await.expect("Failed to read body")
}

async fn shop_page(server: &TestServer, query: &str) -> String {
    server
        .client
        .get(server.url(&format!("/shop{query}")))
        .send()
        .await
        .expect("Failed to get shop page")
        .text()
        .await
        .expect("Failed to read body")
}

#[tokio::test]
async fn test_shop_page_lists_catalog() {
    let server = TestServer::start().await;
    let page = shop_page(&server, "").await;

    assert!(page.contains("id=\"catalog\""));
    assert!(page.contains("Spider-Man #1"));
    assert!(page.contains("Batman: Year One"));
    assert!(page.contains("X-Men: Days of Future Past"));
    assert!(page.contains("$7.49"));
    assert!(page.contains("No comics yet."));
    assert!(page.contains("<span id=\"total\">0.00</span>"));
}

#[tokio::test]
async fn test_form_flow_updates_total() {
    let server = TestServer::start().await;

    post_form(&server, "/cart/add", &[("product_id", "1")]).await;
    post_form(&server, "/cart/add", &[("product_id", "1")]).await;
    let page = post_form(&server, "/cart/add", &[("product_id", "2")]).await;
    assert!(page.contains("<span id=\"total\">19.47</span>"));

    let page = post_form(
        &server,
        "/cart/update",
        &[("product_id", "1"), ("quantity", "5")],
    )
    .await;
    assert!(page.contains("<span id=\"total\">37.44</span>"));
    assert!(page.contains("= $29.95"));

    let page = post_form(&server, "/cart/remove", &[("product_id", "2")]).await;
    assert!(page.contains("<span id=\"total\">29.95</span>"));
    assert!(!page.contains("= $7.49"));
}

#[tokio::test]
async fn test_checkout_flashes_notice_once() {
    let server = TestServer::start().await;
    post_form(&server, "/cart/add", &[("product_id", "3")]).await;

    let page = post_form(&server, "/checkout", &[]).await;
    assert!(page.contains("Payment successful. Thank you for your purchase!"));
    assert!(page.contains("notice-success"));
    assert!(page.contains("<span id=\"total\">0.00</span>"));

    let page = shop_page(&server, "").await;
    assert!(!page.contains("Payment successful"));
}

#[tokio::test]
async fn test_empty_checkout_flashes_warning() {
    let server = TestServer::start().await;
    let page = post_form(&server, "/checkout", &[]).await;

    assert!(page.contains("Your cart is empty."));
    assert!(page.contains("notice-warning"));
}

#[tokio::test]
async fn test_invalid_quantity_form_is_ignored() {
    let server = TestServer::start().await;
    post_form(&server, "/cart/add", &[("product_id", "2")]).await;

    let page = post_form(
        &server,
        "/cart/update",
        &[("product_id", "2"), ("quantity", "abc")],
    )
    .await;
    assert!(page.contains("<span id=\"total\">7.49</span>"));
}

#[tokio::test]
async fn test_layout_override_survives_form_post() {
    let server = TestServer::start().await;
    let page = post_form(&server, "/cart/add?layout=compact", &[("product_id", "1")]).await;

    assert!(page.contains("Spider-Man #1 x 1"));
    assert!(!page.contains("name=\"quantity\""));
    assert!(page.contains("action=\"/cart/remove?layout=compact\""));
}

#[tokio::test]
async fn test_configured_compact_layout() {
    let server = TestServer::start_with_layout(LineLayout::Compact).await;
    post_form(&server, "/cart/add", &[("product_id", "2")]).await;

    let page = shop_page(&server, "").await;
    assert!(page.contains("Batman: Year One x 1"));

    let page = shop_page(&server, "?layout=editable").await;
    assert!(page.contains("name=\"quantity\""));
}
