//! Integration tests for the cart engine over HTTP.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - A seeded catalogue (cargo run -p atelier-cli -- seed)
//! - The API server running (cargo run -p atelier-api)
//!
//! Run with: cargo test -p atelier-integration-tests -- --ignored

use atelier_integration_tests::{
    any_product_id, api_base_url, client, register_and_login, unique_email,
};
use serde_json::{Value, json};

async fn add_item(
    client: &reqwest::Client,
    token: &str,
    product_id: i64,
    quantity: u32,
) -> reqwest::Response {
    client
        .post(format!("{}/api/cart", api_base_url()))
        .bearer_auth(token)
        .json(&json!({ "productId": product_id, "quantity": quantity }))
        .send()
        .await
        .expect("add request failed")
}

async fn fetch_cart(client: &reqwest::Client, token: &str) -> Value {
    let resp = client
        .get(format!("{}/api/cart/user-cart", api_base_url()))
        .bearer_auth(token)
        .send()
        .await
        .expect("fetch request failed");
    assert_eq!(resp.status(), 200);
    resp.json().await.expect("cart body should be JSON")
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_first_add_creates_cart_with_snapshot() {
    let client = client();
    let token =
        register_and_login(&client, "C", &unique_email("create"), "pw-long-enough").await;
    let product_id = any_product_id(&client).await;

    let resp = add_item(&client, &token, product_id, 2).await;
    assert_eq!(resp.status(), 201, "first add creates the cart");

    let cart: Value = resp.json().await.expect("cart body should be JSON");
    let items = cart["items"].as_array().expect("items missing");
    assert_eq!(items.len(), 1);

    let item = &items[0];
    assert_eq!(item["productId"].as_i64(), Some(product_id));
    assert_eq!(item["quantity"].as_u64(), Some(2));
    // Snapshot fields copied from the product at add-time
    assert!(item["name"].as_str().is_some_and(|name| !name.is_empty()));
    assert!(item["price"].as_str().is_some());

    // Second add hits the existing cart
    let resp = add_item(&client, &token, product_id, 1).await;
    assert_eq!(resp.status(), 200, "subsequent adds update the cart");
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_repeat_add_merges_into_one_item() {
    let client = client();
    let token = register_and_login(&client, "M", &unique_email("merge"), "pw-long-enough").await;
    let product_id = any_product_id(&client).await;

    assert!(add_item(&client, &token, product_id, 2).await.status().is_success());
    assert!(add_item(&client, &token, product_id, 3).await.status().is_success());

    let cart = fetch_cart(&client, &token).await;
    let items = cart["items"].as_array().expect("items missing");
    assert_eq!(items.len(), 1, "same product must not duplicate the row");
    assert_eq!(items[0]["quantity"].as_u64(), Some(5));
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_add_then_remove_yields_empty_cart() {
    let client = client();
    let token = register_and_login(&client, "R", &unique_email("remove"), "pw-long-enough").await;
    let product_id = any_product_id(&client).await;

    assert!(add_item(&client, &token, product_id, 1).await.status().is_success());

    let resp = client
        .delete(format!("{}/api/cart/item/{product_id}", api_base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("remove request failed");
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("remove body should be JSON");
    assert_eq!(body["cart"]["items"].as_array().map(Vec::len), Some(0));

    let cart = fetch_cart(&client, &token).await;
    assert_eq!(cart["items"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_remove_absent_product_is_noop_success() {
    let client = client();
    let token = register_and_login(&client, "N", &unique_email("noop"), "pw-long-enough").await;
    let product_id = any_product_id(&client).await;

    assert!(add_item(&client, &token, product_id, 1).await.status().is_success());

    // A product id far outside the seeded range
    let resp = client
        .delete(format!("{}/api/cart/item/999999", api_base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("remove request failed");
    assert_eq!(resp.status(), 200);

    let cart = fetch_cart(&client, &token).await;
    let items = cart["items"].as_array().expect("items missing");
    assert_eq!(items.len(), 1, "cart must be unchanged");
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_remove_without_cart_is_404() {
    let client = client();
    let token =
        register_and_login(&client, "E", &unique_email("no-cart"), "pw-long-enough").await;

    let resp = client
        .delete(format!("{}/api/cart/item/1", api_base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("remove request failed");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_fetch_before_first_add_returns_empty_items() {
    let client = client();
    let token = register_and_login(&client, "Z", &unique_email("zero"), "pw-long-enough").await;

    let cart = fetch_cart(&client, &token).await;
    assert_eq!(cart["items"], json!([]));
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_add_unknown_product_is_404() {
    let client = client();
    let token =
        register_and_login(&client, "U", &unique_email("unknown"), "pw-long-enough").await;

    let resp = add_item(&client, &token, 999_999, 1).await;
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_cart_routes_require_token() {
    let client = client();
    let base_url = api_base_url();

    let resp = client
        .post(format!("{base_url}/api/cart"))
        .json(&json!({ "productId": 1, "quantity": 1 }))
        .send()
        .await
        .expect("add request failed");
    assert_eq!(resp.status(), 401);

    let resp = client
        .get(format!("{base_url}/api/cart/user-cart"))
        .send()
        .await
        .expect("fetch request failed");
    assert_eq!(resp.status(), 401);

    let resp = client
        .delete(format!("{base_url}/api/cart/item/1"))
        .send()
        .await
        .expect("remove request failed");
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_concurrent_adds_do_not_lose_updates() {
    const WRITERS: usize = 8;

    let client = client();
    let token = register_and_login(&client, "P", &unique_email("race"), "pw-long-enough").await;
    let product_id = any_product_id(&client).await;

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..WRITERS {
        let client = client.clone();
        let token = token.clone();
        tasks.spawn(async move {
            let resp = add_item(&client, &token, product_id, 1).await;
            assert!(resp.status().is_success());
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.expect("writer task panicked");
    }

    let cart = fetch_cart(&client, &token).await;
    let items = cart["items"].as_array().expect("items missing");
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0]["quantity"].as_u64(),
        Some(WRITERS as u64),
        "final quantity must equal the sum of all increments"
    );
}
