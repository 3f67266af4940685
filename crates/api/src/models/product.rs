//! Product domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use atelier_core::ProductId;

/// A catalogue product.
///
/// Read-only to the cart/auth core; rows are written only by the seeding
/// tool. Prices serialize as decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub image_url: String,
    pub designer_notes: String,
}
