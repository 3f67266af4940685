//! Cart domain types and line-item reconciliation.
//!
//! The item sequence is the unit of persistence: every write replaces the
//! whole sequence atomically, so reconciliation is a pure in-memory edit
//! between load and store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use atelier_core::{CartId, ProductId, UserId};

use super::product::Product;

/// A line item in a cart.
///
/// `name`, `price`, and `image_url` are a point-in-time copy of the product
/// taken when the item was first added; they are never refreshed from the
/// live catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image_url: String,
    pub quantity: u32,
}

/// The single persistent cart owned by one user.
///
/// Items are kept in insertion order; there is at most one item per distinct
/// product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub items: Vec<CartItem>,
}

/// Add `quantity` of `product` to an item sequence.
///
/// If an item for the product already exists its quantity is incremented,
/// otherwise a new item is appended with the product's current name, price,
/// and image snapshotted. Existing snapshots are left untouched.
pub fn apply_add(items: &mut Vec<CartItem>, product: &Product, quantity: u32) {
    if let Some(item) = items.iter_mut().find(|i| i.product_id == product.id) {
        item.quantity += quantity;
    } else {
        items.push(CartItem {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            quantity,
        });
    }
}

/// Remove every item matching `product_id` from an item sequence.
///
/// Removing a product that is not present leaves the sequence unchanged;
/// callers treat that as a no-op success.
pub fn apply_remove(items: &mut Vec<CartItem>, product_id: ProductId) {
    items.retain(|i| i.product_id != product_id);
}
