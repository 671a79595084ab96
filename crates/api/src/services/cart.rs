//! Cart service.
//!
//! Every mutation is a load-modify-save cycle against the cart store. Cycles
//! for the same user run one at a time under that user's lock; different
//! users never contend.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::instrument;

use smart_laundry_core::Identifier;

use crate::catalog::Catalog;
use crate::db::{CartStore, RepositoryError};
use crate::models::{Cart, QuantityOverflow};
use crate::state::AppState;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No catalog option has this ID.
    #[error("item not found in catalog: {0}")]
    ItemNotFound(String),

    /// The user has never had a cart.
    #[error("cart not found")]
    CartNotFound,

    /// The item is not in the user's cart.
    #[error("item not in cart: {0}")]
    NotInCart(String),

    /// The change would push a quantity out of range.
    #[error(transparent)]
    QuantityOverflow(#[from] QuantityOverflow),

    /// Repository error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// One async mutex per key, created on first use.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<Identifier, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for and hold the lock for `key`.
    pub async fn lock(&self, key: &Identifier) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(key.clone()).or_default())
        };
        lock.lock_owned().await
    }
}

/// Cart service.
pub struct CartService<'a> {
    carts: &'a dyn CartStore,
    catalog: &'a Catalog,
    locks: &'a KeyedLocks,
}

impl<'a> CartService<'a> {
    /// Create a cart service over the application's cart store.
    #[must_use]
    pub fn new(state: &'a AppState) -> Self {
        Self {
            carts: state.stores().carts.as_ref(),
            catalog: state.catalog(),
            locks: state.cart_locks(),
        }
    }

    /// The user's cart, or an empty one if they have none.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the store fails.
    pub async fn get(&self, user: &Identifier) -> Result<Cart, CartError> {
        Ok(self.carts.get(user).await?.unwrap_or_default())
    }

    /// Add `qty` units of a catalog item.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the catalog has no such item, or
    /// `CartError::QuantityOverflow` if the quantity would leave the `i64` range.
    #[instrument(skip(self))]
    pub async fn add(&self, user: &Identifier, item_id: &str, qty: i64) -> Result<Cart, CartError> {
        let option = self
            .catalog
            .find_option(item_id)
            .ok_or_else(|| CartError::ItemNotFound(item_id.to_owned()))?;

        let _guard = self.locks.lock(user).await;
        let mut cart = self.get(user).await?;
        cart.add(option, qty)?;
        self.carts.put(user, cart.clone()).await?;
        Ok(cart)
    }

    /// Take one unit of an item out of the cart, removing it at zero.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if the user has no cart, or
    /// `CartError::NotInCart` if the item is not in it.
    #[instrument(skip(self))]
    pub async fn decrease(&self, user: &Identifier, item_id: &str) -> Result<Cart, CartError> {
        let _guard = self.locks.lock(user).await;
        let mut cart = self
            .carts
            .get(user)
            .await?
            .ok_or(CartError::CartNotFound)?;
        if !cart.decrease(item_id)? {
            return Err(CartError::NotInCart(item_id.to_owned()));
        }
        self.carts.put(user, cart.clone()).await?;
        Ok(cart)
    }

    /// Remove an item entirely. Removing an absent item changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the store fails.
    #[instrument(skip(self))]
    pub async fn remove(&self, user: &Identifier, item_id: &str) -> Result<Cart, CartError> {
        let _guard = self.locks.lock(user).await;
        let mut cart = self.get(user).await?;
        cart.remove(item_id)?;
        self.carts.put(user, cart.clone()).await?;
        Ok(cart)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the store fails.
    #[instrument(skip(self))]
    pub async fn clear(&self, user: &Identifier) -> Result<(), CartError> {
        let _guard = self.locks.lock(user).await;
        self.carts.put(user, Cart::empty()).await?;
        Ok(())
    }
}
