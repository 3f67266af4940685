//! Cart route handlers.
//!
//! Every handler requires a verified bearer token; the extractor rejects
//! before any cart logic runs.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use atelier_core::{CartId, ProductId, UserId};

use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::cart::{Cart, CartItem};
use crate::services::cart::CartService;
use crate::state::AppState;

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: Option<ProductId>,
    pub quantity: Option<u32>,
}

/// Cart response shape.
///
/// A user who never added anything gets the well-defined zero state
/// `{"items": []}` rather than an error or a fabricated cart id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<CartId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub items: Vec<CartItem>,
}

impl CartResponse {
    /// The zero-state cart for users who never added anything.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            id: None,
            user_id: None,
            items: Vec::new(),
        }
    }
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: Some(cart.id),
            user_id: Some(cart.user_id),
            items: cart.items,
        }
    }
}

/// Item removal response.
#[derive(Debug, Serialize)]
pub struct RemoveItemResponse {
    pub message: String,
    pub cart: CartResponse,
}

/// Add an item to the caller's cart or bump its quantity.
///
/// POST /api/cart
///
/// Returns 201 with the full cart when this call created the cart, 200 when
/// it updated an existing one.
///
/// # Errors
///
/// Returns 400 for a missing product id or non-positive quantity, 404 when
/// the product does not exist, 401 without a valid token.
#[instrument(skip(state))]
pub async fn add_item(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<CartResponse>)> {
    let product_id = req
        .product_id
        .ok_or_else(|| AppError::Validation("productId is required".to_owned()))?;
    let quantity = req.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::Validation(
            "quantity must be a positive integer".to_owned(),
        ));
    }

    let carts = CartService::new(state.pool());
    let (cart, created) = carts.add_item(user_id, product_id, quantity).await?;

    tracing::info!(%user_id, %product_id, quantity, created, "cart item added");

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(CartResponse::from(cart))))
}

/// Fetch the caller's cart.
///
/// GET /api/cart/user-cart
///
/// # Errors
///
/// Returns 401 without a valid token.
#[instrument(skip(state))]
pub async fn user_cart(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<CartResponse>> {
    let carts = CartService::new(state.pool());

    let response = carts
        .fetch(user_id)
        .await?
        .map_or_else(CartResponse::empty, CartResponse::from);

    Ok(Json(response))
}

/// Remove an item from the caller's cart.
///
/// DELETE /api/cart/item/{productId}
///
/// Removing a product that is not in the cart succeeds and leaves the cart
/// unchanged.
///
/// # Errors
///
/// Returns 404 when the caller has no cart yet, 401 without a valid token.
#[instrument(skip(state))]
pub async fn remove_item(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(product_id): Path<ProductId>,
) -> Result<Json<RemoveItemResponse>> {
    let carts = CartService::new(state.pool());
    let cart = carts.remove_item(user_id, product_id).await?;

    tracing::info!(%user_id, %product_id, "cart item removed");

    Ok(Json(RemoveItemResponse {
        message: "Item removed from cart".to_owned(),
        cart: CartResponse::from(cart),
    }))
}
