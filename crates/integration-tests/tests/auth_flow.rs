//! Integration tests for registration, login, and profile fetch.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p atelier-api)
//!
//! Run with: cargo test -p atelier-integration-tests -- --ignored

use atelier_integration_tests::{api_base_url, client, register_and_login, unique_email};
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_register_login_profile_flow() {
    let client = client();
    let base_url = api_base_url();
    let email = unique_email("flow");

    // Register
    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({ "name": "A", "email": email, "password": "pw-long-enough" }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), 201);

    // Login with the right password
    let resp = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({ "email": email, "password": "pw-long-enough" }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("login body should be JSON");
    let token = body["token"].as_str().expect("token missing");

    // Login with the wrong password
    let resp = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({ "email": email, "password": "wrong-password" }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), 400);

    // Profile via the token
    let resp = client
        .get(format!("{base_url}/api/auth/user"))
        .bearer_auth(token)
        .send()
        .await
        .expect("profile request failed");
    assert_eq!(resp.status(), 200);
    let profile: Value = resp.json().await.expect("profile body should be JSON");
    assert_eq!(profile["name"], "A");
    assert_eq!(profile["email"], email.as_str());
    // The password hash must never be serialized
    assert!(profile.get("password").is_none());
    assert!(profile.get("passwordHash").is_none());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_duplicate_email_fails_regardless_of_password() {
    let client = client();
    let base_url = api_base_url();
    let email = unique_email("dup");

    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({ "name": "First", "email": email, "password": "first-password" }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), 201);

    // Same email, different everything else
    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({ "name": "Second", "email": email, "password": "other-password" }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_register_rejects_missing_fields() {
    let client = client();
    let base_url = api_base_url();

    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({ "email": unique_email("partial") }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_unknown_email_and_wrong_password_look_identical() {
    let client = client();
    let base_url = api_base_url();
    let email = unique_email("generic");
    register_and_login(&client, "G", &email, "pw-long-enough").await;

    let wrong_password = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({ "email": email, "password": "wrong-password" }))
        .send()
        .await
        .expect("login request failed");

    let unknown_email = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({ "email": unique_email("never-registered"), "password": "whatever-pw" }))
        .send()
        .await
        .expect("login request failed");

    assert_eq!(wrong_password.status(), 400);
    assert_eq!(unknown_email.status(), 400);

    let a: Value = wrong_password.json().await.expect("body should be JSON");
    let b: Value = unknown_email.json().await.expect("body should be JSON");
    assert_eq!(a["message"], b["message"], "no account enumeration");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_profile_requires_valid_token() {
    let client = client();
    let base_url = api_base_url();

    // No Authorization header
    let resp = client
        .get(format!("{base_url}/api/auth/user"))
        .send()
        .await
        .expect("profile request failed");
    assert_eq!(resp.status(), 401);

    // Garbage token
    let resp = client
        .get(format!("{base_url}/api/auth/user"))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .expect("profile request failed");
    assert_eq!(resp.status(), 401);
}
