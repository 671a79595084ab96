//! Cart storage.
//!
//! Stores only load and save whole carts. Serializing concurrent
//! read-modify-write cycles for one user is the cart service's job.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use smart_laundry_core::Identifier;

use super::RepositoryError;
use crate::models::Cart;

/// Storage for one cart per user.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// The user's stored cart, or `None` if they have never had one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Backend` if the store cannot be read.
    async fn get(&self, user: &Identifier) -> Result<Option<Cart>, RepositoryError>;

    /// Replace the user's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Backend` if the store cannot be written.
    async fn put(&self, user: &Identifier, cart: Cart) -> Result<(), RepositoryError>;
}

/// Carts held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCartStore {
    carts: RwLock<HashMap<Identifier, Cart>>,
}

impl InMemoryCartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn get(&self, user: &Identifier) -> Result<Option<Cart>, RepositoryError> {
        Ok(self.carts.read().await.get(user).cloned())
    }

    async fn put(&self, user: &Identifier, cart: Cart) -> Result<(), RepositoryError> {
        self.carts.write().await.insert(user.clone(), cart);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemoryCartStore::new();
        let user = Identifier::parse("priya@example.com").unwrap();
        assert!(store.get(&user).await.unwrap().is_none());

        let mut cart = Cart::empty();
        cart.add(Catalog::builtin().find_option("jeans").unwrap(), 1);
        store.put(&user, cart.clone()).await.unwrap();

        assert_eq!(store.get(&user).await.unwrap(), Some(cart));
    }

    #[tokio::test]
    async fn test_carts_are_per_user() {
        let store = InMemoryCartStore::new();
        let a = Identifier::parse("a@example.com").unwrap();
        let b = Identifier::parse("b@example.com").unwrap();

        store.put(&a, Cart::empty()).await.unwrap();
        assert!(store.get(&b).await.unwrap().is_none());
    }
}
