//! The client-held cart aggregate.
//!
//! The cart accumulates selected offerings ahead of checkout. Two
//! invariants hold after every mutation:
//!
//! - no two items share a `seva_id` (`add` is idempotent), and
//! - the total always equals the sum of the current items'
//!   `discounted_price` - it is recomputed on every mutation, never
//!   incrementally adjusted, so it cannot drift.

use serde::{Deserialize, Serialize};

use crate::types::{Price, SevaId};

/// A selected offering with its price snapshot taken at add-time.
///
/// Later catalog price changes do not affect items already in a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub seva_id: SevaId,
    pub title: String,
    pub discounted_price: Price,
    pub media: String,
}

/// The cart aggregate: unique items plus a derived total.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    total: Price,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. No-op if an item with the same `seva_id` is already
    /// present.
    pub fn add(&mut self, item: CartItem) {
        if self.items.iter().any(|i| i.seva_id == item.seva_id) {
            return;
        }
        self.items.push(item);
        self.recompute_total();
    }

    /// Remove the item with the given `seva_id`, if present.
    pub fn remove(&mut self, seva_id: SevaId) {
        self.items.retain(|i| i.seva_id != seva_id);
        self.recompute_total();
    }

    /// Empty the cart and zero the total.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total = Price::ZERO;
    }

    /// Current items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Derived total of the current items' discounted prices.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// Number of items in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshot of the current items, for order submission.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    fn recompute_total(&mut self) {
        self.total = self.items.iter().map(|i| i.discounted_price).sum();
    }
}
