//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (verifies database)
//!
//! # Auth
//! POST /api/auth/register             - Register a new account
//! POST /api/auth/login                - Login, returns a bearer token
//! GET  /api/auth/user                 - Current user's profile (auth)
//!
//! # Cart (all require Authorization: Bearer <token>)
//! POST   /api/cart                    - Add item / bump quantity
//! GET    /api/cart/user-cart          - Fetch the caller's cart
//! DELETE /api/cart/item/{productId}   - Remove an item
//!
//! # Products (public)
//! GET  /api/products                  - Product listing
//! GET  /api/products/{id}             - Product detail
//! ```

pub mod auth;
pub mod cart;
pub mod products;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/user", get(auth::user))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cart::add_item))
        .route("/user-cart", get(cart::user_cart))
        .route("/item/{product_id}", delete(cart::remove_item))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/products", product_routes())
}
