//! Integration tests for Atelier.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations + seed data
//! cargo run -p atelier-cli -- migrate
//! cargo run -p atelier-cli -- seed
//!
//! # Start the API server
//! cargo run -p atelier-api
//!
//! # Run integration tests
//! cargo test -p atelier-integration-tests -- --ignored
//! ```
//!
//! Tests register throwaway users with unique emails, so they can run
//! repeatedly against the same database.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("ATELIER_API_URL").unwrap_or_else(|_| "http://localhost:5000".to_owned())
}

/// Plain HTTP client.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder().build().expect("Failed to create HTTP client")
}

/// A unique throwaway email for one test run.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@integration.test", Uuid::new_v4())
}

/// Register a fresh user and log them in, returning their bearer token.
///
/// # Panics
///
/// Panics if registration or login does not succeed.
pub async fn register_and_login(client: &Client, name: &str, email: &str, password: &str) -> String {
    let base_url = api_base_url();

    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({ "name": name, "email": email, "password": password }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), 201, "registration should succeed");

    let resp = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), 200, "login should succeed");

    let body: Value = resp.json().await.expect("login body should be JSON");
    body["token"]
        .as_str()
        .expect("login body should carry a token")
        .to_owned()
}

/// The id of some product in the seeded catalogue.
///
/// # Panics
///
/// Panics if the catalogue is empty (run `atelier-cli seed` first).
pub async fn any_product_id(client: &Client) -> i64 {
    let base_url = api_base_url();
    let resp = client
        .get(format!("{base_url}/api/products"))
        .send()
        .await
        .expect("products request failed");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.expect("products body should be JSON");
    body.as_array()
        .and_then(|products| products.first())
        .and_then(|product| product["id"].as_i64())
        .expect("catalogue should be seeded")
}
