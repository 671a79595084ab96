//! Order storage.

use async_trait::async_trait;
use tokio::sync::RwLock;

use smart_laundry_core::{Identifier, OrderId, OrderStatus};

use super::RepositoryError;
use crate::models::Order;

/// Append-only order log. Only an order's status may change once stored.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Append a new order to the log.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Backend` if the store cannot be written.
    async fn append(&self, order: Order) -> Result<(), RepositoryError>;

    /// Orders placed by `user`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Backend` if the store cannot be read.
    async fn list_for_user(&self, user: &Identifier) -> Result<Vec<Order>, RepositoryError>;

    /// Every order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Backend` if the store cannot be read.
    async fn list_all(&self) -> Result<Vec<Order>, RepositoryError>;

    /// Overwrite an order's status and return the updated order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this ID.
    async fn set_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError>;
}

/// Orders held in process memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn append(&self, order: Order) -> Result<(), RepositoryError> {
        self.orders.write().await.push(order);
        Ok(())
    }

    async fn list_for_user(&self, user: &Identifier) -> Result<Vec<Order>, RepositoryError> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .filter(|o| &o.user_id == user)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        Ok(self.orders.read().await.clone())
    }

    async fn set_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|o| &o.id == id)
            .ok_or(RepositoryError::NotFound)?;
        order.status = status;
        Ok(order.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use smart_laundry_core::Price;

    fn order(seq: u64, user: &str) -> Order {
        Order::place(
            OrderId::from_sequence(seq),
            Identifier::parse(user).unwrap(),
            Vec::new(),
            Price::from_whole(40),
            chrono::Local::now().naive_local(),
        )
    }

    #[tokio::test]
    async fn test_list_for_user_filters_and_keeps_order() {
        let store = InMemoryOrderStore::new();
        store.append(order(1, "a@example.com")).await.unwrap();
        store.append(order(2, "b@example.com")).await.unwrap();
        store.append(order(3, "a@example.com")).await.unwrap();

        let a = Identifier::parse("a@example.com").unwrap();
        let ids: Vec<String> = store
            .list_for_user(&a)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id.to_string())
            .collect();
        assert_eq!(ids, vec!["ORD_1", "ORD_3"]);
        assert_eq!(store.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_set_status() {
        let store = InMemoryOrderStore::new();
        store.append(order(7, "a@example.com")).await.unwrap();

        let updated = store
            .set_status(&OrderId::from_sequence(7), OrderStatus::new("Delivered"))
            .await
            .unwrap();
        assert_eq!(updated.status.as_str(), "Delivered");
        assert_eq!(
            store.list_all().await.unwrap()[0].status.as_str(),
            "Delivered"
        );
    }

    #[tokio::test]
    async fn test_set_status_unknown_order() {
        let store = InMemoryOrderStore::new();
        let err = store
            .set_status(&OrderId::from_sequence(9), OrderStatus::new("Delivered"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
