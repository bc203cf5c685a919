//! Whole-rupee price representation.
//!
//! Catalog prices and order amounts are whole rupees carried as plain JSON
//! numbers on the wire (`"discountedPrice": 500`), so the representation is
//! a transparent `i64` newtype rather than a decimal type.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

/// A price in whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from a whole-rupee amount.
    #[must_use]
    pub const fn new(rupees: i64) -> Self {
        Self(rupees)
    }

    /// Get the amount in whole rupees.
    #[must_use]
    pub const fn rupees(&self) -> i64 {
        self.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sum() {
        let total: Price = [Price::new(500), Price::new(300)].into_iter().sum();
        assert_eq!(total, Price::new(800));
    }

    #[test]
    fn test_serde_plain_number() {
        let json = serde_json::to_string(&Price::new(500)).unwrap();
        assert_eq!(json, "500");
        let back: Price = serde_json::from_str("500").unwrap();
        assert_eq!(back, Price::new(500));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::new(1250).to_string(), "₹1250");
    }
}
