//! Cart behavior through the JSON API.

use comic_cart_integration_tests::TestServer;
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn post_action(server: &TestServer, body: Value) -> Value {
    let resp = server
        .client
        .post(server.url("/api/cart"))
        .json(&body)
        .send()
        .await
        .expect("Failed to post action");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Failed to parse response")
}

async fn current_cart(server: &TestServer) -> Value {
    server
        .client
        .get(server.url("/api/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Failed to parse cart")
}

#[tokio::test]
async fn test_catalog_listing() {
    let server = TestServer::start().await;
    let catalog: Value = server
        .client
        .get(server.url("/api/catalog"))
        .send()
        .await
        .expect("Failed to get catalog")
        .json()
        .await
        .expect("Failed to parse catalog");

    assert_eq!(catalog["products"].as_array().map(Vec::len), Some(3));
    assert_eq!(catalog["products"][0]["name"], "Spider-Man #1");
    assert_eq!(catalog["products"][0]["unit_price"], "5.99");
    assert_eq!(catalog["products"][2]["image_ref"], "images/xmen.svg");
}

#[tokio::test]
async fn test_new_session_has_empty_cart() {
    let server = TestServer::start().await;
    let body = current_cart(&server).await;

    assert_eq!(body["cart"]["lines"], json!([]));
    assert_eq!(body["cart"]["total"], "0.00");
    assert_eq!(body["notice"], Value::Null);
}

#[tokio::test]
async fn test_shopping_scenario_totals() {
    let server = TestServer::start().await;

    post_action(&server, json!({"action": "add", "product_id": 1})).await;
    post_action(&server, json!({"action": "add", "product_id": 1})).await;
    let body = post_action(&server, json!({"action": "add", "product_id": 2})).await;
    assert_eq!(body["cart"]["total"], "19.47");
    assert_eq!(body["cart"]["lines"][0]["quantity"], 2);
    assert_eq!(body["cart"]["lines"][0]["subtotal"], "$11.98");

    let body = post_action(
        &server,
        json!({"action": "set_quantity", "product_id": 1, "quantity": 5}),
    )
    .await;
    assert_eq!(body["cart"]["total"], "37.44");

    let body = post_action(&server, json!({"action": "remove", "product_id": 2})).await;
    assert_eq!(body["cart"]["total"], "29.95");
    assert_eq!(body["cart"]["lines"].as_array().map(Vec::len), Some(1));

    let body = post_action(&server, json!({"action": "checkout"})).await;
    assert_eq!(body["notice"]["kind"], "payment_succeeded");
    assert_eq!(
        body["notice"]["message"],
        "Payment successful. Thank you for your purchase!"
    );
    assert_eq!(body["cart"]["total"], "0.00");

    let body = current_cart(&server).await;
    assert_eq!(body["cart"]["lines"], json!([]));
}

#[tokio::test]
async fn test_empty_checkout_warns() {
    let server = TestServer::start().await;
    let body = post_action(&server, json!({"action": "checkout"})).await;

    assert_eq!(body["notice"]["kind"], "cart_empty");
    assert_eq!(body["notice"]["message"], "Your cart is empty.");
}

#[tokio::test]
async fn test_invalid_quantities_are_ignored() {
    let server = TestServer::start().await;
    post_action(&server, json!({"action": "add", "product_id": 3})).await;

    for quantity in [json!("abc"), json!(0), json!(-2), json!("")] {
        let body = post_action(
            &server,
            json!({"action": "set_quantity", "product_id": 3, "quantity": quantity.clone()}),
        )
        .await;
        assert_eq!(body["cart"]["lines"][0]["quantity"], 1, "{quantity}");
        assert_eq!(body["cart"]["total"], "6.99");
    }

    let body = post_action(
        &server,
        json!({"action": "set_quantity", "product_id": 3, "quantity": "4abc"}),
    )
    .await;
    assert_eq!(body["cart"]["lines"][0]["quantity"], 4);
    assert_eq!(body["cart"]["total"], "27.96");
}

#[tokio::test]
async fn test_remove_decrements_then_drops_line() {
    let server = TestServer::start().await;
    post_action(&server, json!({"action": "add", "product_id": 2})).await;
    post_action(&server, json!({"action": "add", "product_id": 2})).await;

    let body = post_action(&server, json!({"action": "remove", "product_id": 2})).await;
    assert_eq!(body["cart"]["lines"][0]["quantity"], 1);

    let body = post_action(&server, json!({"action": "remove", "product_id": 2})).await;
    assert_eq!(body["cart"]["lines"], json!([]));

    let body = post_action(&server, json!({"action": "remove", "product_id": 2})).await;
    assert_eq!(body["cart"]["total"], "0.00");
}

#[tokio::test]
async fn test_unknown_product_is_rejected_without_change() {
    let server = TestServer::start().await;
    post_action(&server, json!({"action": "add", "product_id": 1})).await;

    let resp = server
        .client
        .post(server.url("/api/cart"))
        .json(&json!({"action": "add", "product_id": 99}))
        .send()
        .await
        .expect("Failed to post action");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body = current_cart(&server).await;
    assert_eq!(body["cart"]["total"], "5.99");
}

#[tokio::test]
async fn test_sessions_have_separate_carts() {
    let server = TestServer::start().await;
    post_action(&server, json!({"action": "add", "product_id": 1})).await;

    let other = reqwest::Client::new();
    let body: Value = other
        .get(server.url("/api/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Failed to parse cart");

    assert_eq!(body["cart"]["total"], "0.00");
}
