//! Domain models for the storefront API.
//!
//! These types represent validated domain objects separate from database row
//! types, and double as the JSON wire shapes (camelCase) for the API.

pub mod cart;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem};
pub use product::Product;
pub use user::{User, UserProfile};
