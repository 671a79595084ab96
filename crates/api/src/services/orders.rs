//! Order service.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local, Utc};
use thiserror::Error;
use tracing::instrument;

use smart_laundry_core::{Identifier, OrderId, OrderStatus, Price};

use super::cart::KeyedLocks;
use crate::clock::Clock;
use crate::db::{CartStore, OrderStore, RepositoryError};
use crate::models::{Cart, CartItem, Order, OrderSummary};
use crate::state::AppState;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Checkout with no items.
    #[error("cart is empty")]
    EmptyCart,

    /// Status update without a status.
    #[error("status is required")]
    MissingStatus,

    /// No order has this ID.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// Repository error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Hands out strictly increasing order IDs.
///
/// IDs follow the wall clock in milliseconds; when two orders land in the
/// same millisecond (or the clock steps back) the sequence is bumped past the
/// last ID issued.
#[derive(Debug, Default)]
pub struct OrderIdGenerator {
    last: AtomicU64,
}

impl OrderIdGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// The next ID for an order placed at `now`.
    pub fn next(&self, now: DateTime<Utc>) -> OrderId {
        let now_ms = u64::try_from(now.timestamp_millis()).unwrap_or_default();
        let step = |prev: u64| now_ms.max(prev.saturating_add(1));
        let prev = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |prev| Some(step(prev)))
            .unwrap_or_else(|prev| prev);
        OrderId::from_sequence(step(prev))
    }
}

/// Order service.
pub struct OrderService<'a> {
    orders: &'a dyn OrderStore,
    carts: &'a dyn CartStore,
    cart_locks: &'a KeyedLocks,
    ids: &'a OrderIdGenerator,
    clock: &'a dyn Clock,
}

impl<'a> OrderService<'a> {
    /// Create an order service over the application's stores.
    #[must_use]
    pub fn new(state: &'a AppState) -> Self {
        Self {
            orders: state.stores().orders.as_ref(),
            carts: state.stores().carts.as_ref(),
            cart_locks: state.cart_locks(),
            ids: state.order_ids(),
            clock: state.clock(),
        }
    }

    /// Place an order for the submitted items and empty the user's cart.
    ///
    /// The items and total are taken as submitted; they are not re-priced
    /// against the catalog.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` if `items` is empty.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub async fn checkout(
        &self,
        user: &Identifier,
        items: Vec<CartItem>,
        total: Price,
    ) -> Result<Order, OrderError> {
        if items.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let now = self.clock.now();
        let order = Order::place(
            self.ids.next(now),
            user.clone(),
            items,
            total,
            now.with_timezone(&Local).naive_local(),
        );
        self.orders.append(order.clone()).await?;

        {
            let _guard = self.cart_locks.lock(user).await;
            self.carts.put(user, Cart::empty()).await?;
        }

        tracing::info!(order_id = %order.id, user = %user, total = %order.total, "order placed");
        Ok(order)
    }

    /// The user's orders, oldest first, as history entries.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` if the store fails.
    pub async fn list_mine(&self, user: &Identifier) -> Result<Vec<OrderSummary>, OrderError> {
        Ok(self
            .orders
            .list_for_user(user)
            .await?
            .iter()
            .map(Order::summary)
            .collect())
    }

    /// Every order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` if the store fails.
    pub async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.list_all().await?)
    }

    /// Overwrite an order's status. Any value is accepted.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::MissingStatus` if `status` is `None`, or
    /// `OrderError::NotFound` if no order has this ID.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: &OrderId,
        status: Option<String>,
    ) -> Result<Order, OrderError> {
        let status = status.ok_or(OrderError::MissingStatus)?;
        let status = OrderStatus::new(status);
        if !status.is_known() {
            tracing::debug!(order_id = %id, status = %status, "non-standard order status");
        }

        let order = self
            .orders
            .set_status(id, status)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => OrderError::NotFound(id.clone()),
                other => OrderError::Repository(other),
            })?;

        tracing::info!(order_id = %order.id, status = %order.status, "order status updated");
        Ok(order)
    }
}
