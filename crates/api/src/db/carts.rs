//! Cart repository.
//!
//! A cart's line items are stored as one jsonb value, so every write replaces
//! the full sequence in a single `UPDATE`. Mutations run inside a transaction
//! that locks the owner's row (`SELECT ... FOR UPDATE`); concurrent writes for
//! the same owner serialize on the lock instead of losing updates.

use sqlx::{PgPool, Postgres, Transaction};

use atelier_core::{CartId, UserId};

use super::RepositoryError;
use crate::models::cart::{Cart, CartItem};

#[derive(sqlx::FromRow)]
struct CartRow {
    id: CartId,
    user_id: UserId,
    items: serde_json::Value,
}

impl CartRow {
    fn into_cart(self) -> Result<Cart, RepositoryError> {
        let items: Vec<CartItem> = serde_json::from_value(self.items).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid cart items in database: {e}"))
        })?;

        Ok(Cart {
            id: self.id,
            user_id: self.user_id,
            items,
        })
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the cart owned by `user_id`, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored items are invalid.
    pub async fn get_by_user(&self, user_id: UserId) -> Result<Option<Cart>, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            r"
            SELECT id, user_id, items
            FROM cart
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(CartRow::into_cart).transpose()
    }

    /// Get-or-create the cart owned by `user_id`, apply `mutate` to its item
    /// sequence under a row lock, and persist the result.
    ///
    /// Returns the stored cart and whether this call created it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    /// Returns `RepositoryError::DataCorruption` if the stored items are invalid.
    pub async fn create_or_update<F>(
        &self,
        user_id: UserId,
        mutate: F,
    ) -> Result<(Cart, bool), RepositoryError>
    where
        F: FnOnce(&mut Vec<CartItem>),
    {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r"
            INSERT INTO cart (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO NOTHING
            ",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let cart = Self::lock_and_update(&mut tx, user_id, mutate)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        tx.commit().await?;

        Ok((cart, inserted > 0))
    }

    /// Apply `mutate` to an existing cart's item sequence under a row lock and
    /// persist the result.
    ///
    /// Returns `Ok(None)` when `user_id` has no cart yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    /// Returns `RepositoryError::DataCorruption` if the stored items are invalid.
    pub async fn update<F>(&self, user_id: UserId, mutate: F) -> Result<Option<Cart>, RepositoryError>
    where
        F: FnOnce(&mut Vec<CartItem>),
    {
        let mut tx = self.pool.begin().await?;

        let cart = Self::lock_and_update(&mut tx, user_id, mutate).await?;

        tx.commit().await?;

        Ok(cart)
    }

    /// Shared lock-mutate-store sequence. Must run inside `tx`.
    async fn lock_and_update<F>(
        tx: &mut Transaction<'_, Postgres>,
        user_id: UserId,
        mutate: F,
    ) -> Result<Option<Cart>, RepositoryError>
    where
        F: FnOnce(&mut Vec<CartItem>),
    {
        let row = sqlx::query_as::<_, CartRow>(
            r"
            SELECT id, user_id, items
            FROM cart
            WHERE user_id = $1
            FOR UPDATE
            ",
        )
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut cart = row.into_cart()?;
        mutate(&mut cart.items);

        let items = serde_json::to_value(&cart.items).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize cart items: {e}"))
        })?;

        sqlx::query(
            r"
            UPDATE cart
            SET items = $2, updated_at = now()
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .bind(items)
        .execute(&mut **tx)
        .await?;

        Ok(Some(cart))
    }
}
