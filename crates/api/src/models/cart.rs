//! Cart domain types.
//!
//! A cart is an ordered list of items plus two derived totals. Every mutating
//! method recomputes the totals from scratch, so `total == Σ price × qty` and
//! `total_qty == Σ qty` hold after any call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use smart_laundry_core::Price;

use crate::catalog::CatalogOption;

/// One catalog item in a cart, with display data captured when it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog option ID.
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Unit price at the time the item was added.
    pub price: Price,
    #[serde(default)]
    pub emoji: String,
    pub qty: i64,
}

impl CartItem {
    /// A new line for `qty` units of a catalog option.
    #[must_use]
    pub fn from_option(option: &CatalogOption, qty: i64) -> Self {
        Self {
            id: option.id.to_owned(),
            name: option.label.to_owned(),
            price: option.price,
            emoji: option.emoji.to_owned(),
            qty,
        }
    }

    /// Price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.qty)
    }
}

/// A user's working set of items awaiting checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub total: Price,
    #[serde(rename = "totalQty")]
    pub total_qty: i64,
}

impl Cart {
    /// A cart with no items and zero totals.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line for `item_id`, if present.
    #[must_use]
    pub fn item(&self, item_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Add `qty` units of `option`.
    ///
    /// An existing line is incremented in place; otherwise a new line is
    /// appended. `qty` is applied as given, including zero or negative values.
    ///
    /// # Errors
    ///
    /// Returns `QuantityOverflow` (and leaves the cart untouched) if the line
    /// or the cart quantity would no longer fit in an `i64`.
    pub fn add(&mut self, option: &CatalogOption, qty: i64) -> Result<(), QuantityOverflow> {
        let mut items = self.items.clone();
        match items.iter_mut().find(|i| i.id == option.id) {
            Some(existing) => {
                existing.qty = existing.qty.checked_add(qty).ok_or(QuantityOverflow)?;
            }
            None => items.push(CartItem::from_option(option, qty)),
        }
        *self = Self::from_items(items)?;
        Ok(())
    }

    /// Decrement the line for `item_id` by one, dropping it at zero or below.
    ///
    /// Returns `Ok(false)` (and leaves the cart untouched) if the item is absent.
    ///
    /// # Errors
    ///
    /// Returns `QuantityOverflow` if the remaining quantity does not fit in an `i64`.
    pub fn decrease(&mut self, item_id: &str) -> Result<bool, QuantityOverflow> {
        let mut items = self.items.clone();
        let Some(item) = items.iter_mut().find(|i| i.id == item_id) else {
            return Ok(false);
        };
        item.qty = item.qty.saturating_sub(1);
        if item.qty <= 0 {
            items.retain(|i| i.id != item_id);
        }
        *self = Self::from_items(items)?;
        Ok(true)
    }

    /// Remove every line for `item_id`. Absent items are ignored.
    ///
    /// # Errors
    ///
    /// Returns `QuantityOverflow` if the remaining quantity does not fit in an `i64`.
    pub fn remove(&mut self, item_id: &str) -> Result<(), QuantityOverflow> {
        let items = self.items.iter().filter(|i| i.id != item_id).cloned().collect();
        *self = Self::from_items(items)?;
        Ok(())
    }

    fn from_items(items: Vec<CartItem>) -> Result<Self, QuantityOverflow> {
        let total_qty: i128 = items.iter().map(|i| i128::from(i.qty)).sum();
        Ok(Self {
            total: items.iter().map(CartItem::line_total).sum(),
            total_qty: i64::try_from(total_qty).map_err(|_| QuantityOverflow)?,
            items,
        })
    }
}

/// A cart quantity left the range of `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cart quantity out of range")]
pub struct QuantityOverflow;
