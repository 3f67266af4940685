//! Cart engine.
//!
//! Owns the authoritative per-user cart. Every mutation goes through the
//! repository's locked read-modify-write, with the actual item edit expressed
//! as a pure function from [`crate::models::cart`].

use sqlx::PgPool;
use thiserror::Error;

use atelier_core::{ProductId, UserId};

use crate::db::RepositoryError;
use crate::db::carts::CartRepository;
use crate::db::products::ProductRepository;
use crate::models::cart::{self, Cart};

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product being added does not exist.
    #[error("product not found")]
    ProductNotFound,

    /// The caller has no cart yet.
    #[error("cart not found")]
    CartNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Cart service.
pub struct CartService<'a> {
    products: ProductRepository<'a>,
    carts: CartRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool),
            carts: CartRepository::new(pool),
        }
    }

    /// Add `quantity` of a product to the caller's cart, creating the cart if
    /// this is their first add.
    ///
    /// A repeated add of the same product increments the existing item's
    /// quantity; a new product is appended with its name, price, and image
    /// snapshotted at this moment.
    ///
    /// Returns the full cart and whether this call created it.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the product does not exist.
    /// Returns `CartError::Repository` if the store fails.
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(Cart, bool), CartError> {
        let product = self
            .products
            .get(product_id)
            .await?
            .ok_or(CartError::ProductNotFound)?;

        let (cart, created) = self
            .carts
            .create_or_update(user_id, |items| cart::apply_add(items, &product, quantity))
            .await?;

        Ok((cart, created))
    }

    /// Fetch the caller's cart.
    ///
    /// Returns `Ok(None)` for a user who never added anything; callers render
    /// that as an empty-items cart, not an error.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the store fails.
    pub async fn fetch(&self, user_id: UserId) -> Result<Option<Cart>, CartError> {
        let cart = self.carts.get_by_user(user_id).await?;
        Ok(cart)
    }

    /// Remove every item matching `product_id` from the caller's cart.
    ///
    /// Removing a product that is not in the cart is a no-op success.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if the caller has no cart yet.
    /// Returns `CartError::Repository` if the store fails.
    pub async fn remove_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Cart, CartError> {
        let cart = self
            .carts
            .update(user_id, |items| cart::apply_remove(items, product_id))
            .await?
            .ok_or(CartError::CartNotFound)?;

        Ok(cart)
    }
}
