//! Order domain types.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use smart_laundry_core::{Identifier, OrderId, OrderStatus, Price};

use super::CartItem;

/// Format used for pickup and delivery slots.
pub const SLOT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Name shown for every order in the customer's order history.
pub const SERVICE_NAME: &str = "Laundry Service";

/// Hours between placing an order and pickup.
const PICKUP_AFTER_HOURS: i64 = 2;

/// Hours between placing an order and delivery.
const DELIVERY_AFTER_HOURS: i64 = 24;

/// A placed order.
///
/// Everything but `status` is frozen at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: Identifier,
    pub items: Vec<CartItem>,
    pub total: Price,
    pub status: OrderStatus,
    /// Local time the order was placed.
    pub created_at: NaiveDateTime,
    pub pickup_time: String,
    pub delivery_time: String,
}

impl Order {
    /// Build a pending order placed at `placed_at` (local time).
    #[must_use]
    pub fn place(
        id: OrderId,
        user_id: Identifier,
        items: Vec<CartItem>,
        total: Price,
        placed_at: NaiveDateTime,
    ) -> Self {
        let pickup = placed_at + Duration::hours(PICKUP_AFTER_HOURS);
        let delivery = placed_at + Duration::hours(DELIVERY_AFTER_HOURS);
        Self {
            id,
            user_id,
            items,
            total,
            status: OrderStatus::pending(),
            created_at: placed_at,
            pickup_time: pickup.format(SLOT_FORMAT).to_string(),
            delivery_time: delivery.format(SLOT_FORMAT).to_string(),
        }
    }

    /// The customer-facing view of this order.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary {
            id: self.id.clone(),
            service_name: SERVICE_NAME,
            status: self.status.clone(),
            total: self.total,
            created_at: self.created_at,
            pickup_time: self.pickup_time.clone(),
            delivery_time: self.delivery_time.clone(),
        }
    }
}

/// Order history entry returned by `GET /api/orders/my`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub service_name: &'static str,
    pub status: OrderStatus,
    pub total: Price,
    pub created_at: NaiveDateTime,
    pub pickup_time: String,
    pub delivery_time: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn placed_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(22, 15, 42)
            .unwrap()
    }

    fn order() -> Order {
        Order::place(
            OrderId::from_sequence(1_710_000_000_000),
            Identifier::parse("priya@example.com").unwrap(),
            Vec::new(),
            Price::from_whole(75),
            placed_at(),
        )
    }

    #[test]
    fn test_place_sets_slots_and_status() {
        let order = order();
        assert_eq!(order.status.as_str(), "Pending");
        assert_eq!(order.pickup_time, "2024-03-10 00:15");
        assert_eq!(order.delivery_time, "2024-03-10 22:15");
    }

    #[test]
    fn test_summary_projection() {
        let json = serde_json::to_value(order().summary()).unwrap();
        assert_eq!(json["_id"], "ORD_1710000000000");
        assert_eq!(json["serviceName"], "Laundry Service");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["pickupTime"], "2024-03-10 00:15");
        assert_eq!(json["deliveryTime"], "2024-03-10 22:15");
        assert!(json["createdAt"].is_string());
        assert!(json.get("items").is_none());
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_full_order_shape() {
        let json = serde_json::to_value(order()).unwrap();
        assert_eq!(json["id"], "ORD_1710000000000");
        assert_eq!(json["user_id"], "priya@example.com");
        assert!(json["items"].as_array().unwrap().is_empty());
        assert_eq!(json["total"].as_f64(), Some(75.0));
    }
}
