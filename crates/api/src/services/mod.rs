//! Business logic services.

pub mod auth;
pub mod cart;
pub mod token;

pub use auth::{AuthError, AuthService};
pub use cart::{CartError, CartService};
pub use token::{TokenError, TokenService};
