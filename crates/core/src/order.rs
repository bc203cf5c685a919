//! Addresses, order receipts, and the bounded recent-order history.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::types::Price;

/// Address category chosen on the checkout form.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum AddressKind {
    #[default]
    Home,
    Work,
    Other,
}

/// Errors surfaced by [`Address::validate`], one per offending field so
/// they can be shown inline next to it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Name required")]
    MissingName,
    #[error("Phone required")]
    MissingContact,
    #[error("Address line 1 required")]
    MissingLine1,
    #[error("Pincode required")]
    MissingPincode,
    #[error("City required")]
    MissingCity,
}

/// A delivery address captured on the checkout form.
///
/// Fields are raw form strings; [`Address::validate`] is the gate an order
/// must pass on the client before submission. `state` may legitimately be
/// blank (the pincode lookup fills it in when the pincode is known).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub name: String,
    pub contact: String,
    pub addr_line1: String,
    #[serde(default)]
    pub addr_line2: String,
    pub pincode: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(rename = "type", default)]
    pub kind: AddressKind,
}

impl Address {
    /// Check the checkout preconditions: non-empty name, contact, line 1,
    /// pincode, and city.
    ///
    /// # Errors
    ///
    /// Returns the first [`AddressError`] for a blank required field.
    pub fn validate(&self) -> Result<(), AddressError> {
        if self.name.trim().is_empty() {
            return Err(AddressError::MissingName);
        }
        if self.contact.trim().is_empty() {
            return Err(AddressError::MissingContact);
        }
        if self.addr_line1.trim().is_empty() {
            return Err(AddressError::MissingLine1);
        }
        if self.pincode.trim().is_empty() {
            return Err(AddressError::MissingPincode);
        }
        if self.city.trim().is_empty() {
            return Err(AddressError::MissingCity);
        }
        Ok(())
    }
}

/// The transient receipt produced at checkout.
///
/// `order_id` and `payment_id` are independent random display identifiers,
/// not durable primary keys; duplicates across orders are theoretically
/// possible and accepted. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: u64,
    pub payment_id: u64,
    pub amount_to_pay: Price,
    pub items: Vec<CartItem>,
    pub address: Address,
}

/// Bounded recent-order history: newest first, oldest evicted.
#[derive(Debug, Clone, Default)]
pub struct OrderHistory {
    orders: VecDeque<Order>,
}

impl OrderHistory {
    /// Maximum number of retained orders.
    pub const CAPACITY: usize = 3;

    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an order at the front, evicting the oldest beyond capacity.
    pub fn record(&mut self, order: Order) {
        self.orders.push_front(order);
        self.orders.truncate(Self::CAPACITY);
    }

    /// Retained orders, newest first.
    #[must_use]
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Number of retained orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether no orders have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// The most recent order, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&Order> {
        self.orders.front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_address() -> Address {
        Address {
            name: "Asha Rao".to_owned(),
            contact: "9876543210".to_owned(),
            addr_line1: "12 Temple Street".to_owned(),
            addr_line2: String::new(),
            pincode: "560001".to_owned(),
            city: "Bengaluru".to_owned(),
            state: "Karnataka".to_owned(),
            kind: AddressKind::Home,
        }
    }

    fn order(order_id: u64) -> Order {
        Order {
            order_id,
            payment_id: 9_000_000_000 + order_id,
            amount_to_pay: Price::new(500),
            items: Vec::new(),
            address: valid_address(),
        }
    }

    #[test]
    fn test_validate_accepts_blank_state() {
        let address = Address {
            state: String::new(),
            ..valid_address()
        };
        assert_eq!(address.validate(), Ok(()));
    }

    #[test]
    fn test_validate_required_fields() {
        let cases = [
            (
                Address {
                    name: String::new(),
                    ..valid_address()
                },
                AddressError::MissingName,
            ),
            (
                Address {
                    contact: "  ".to_owned(),
                    ..valid_address()
                },
                AddressError::MissingContact,
            ),
            (
                Address {
                    addr_line1: String::new(),
                    ..valid_address()
                },
                AddressError::MissingLine1,
            ),
            (
                Address {
                    pincode: String::new(),
                    ..valid_address()
                },
                AddressError::MissingPincode,
            ),
            (
                Address {
                    city: String::new(),
                    ..valid_address()
                },
                AddressError::MissingCity,
            ),
        ];

        for (address, expected) in cases {
            assert_eq!(address.validate(), Err(expected));
        }
    }

    #[test]
    fn test_history_bounded_newest_first() {
        let mut history = OrderHistory::new();
        for id in 1..=4 {
            history.record(order(id));
        }

        assert_eq!(history.len(), 3);
        let ids: Vec<u64> = history.orders().map(|o| o.order_id).collect();
        assert_eq!(ids, vec![4, 3, 2]); // order 1 evicted
        assert_eq!(history.latest().map(|o| o.order_id), Some(4));
    }

    #[test]
    fn test_address_type_wire_name() {
        let json = serde_json::to_value(valid_address()).expect("serialize");
        assert_eq!(json["type"], "Home");
        assert_eq!(json["addrLine1"], "12 Temple Street");
    }
}
