//! Postal pincode type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Pincode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PincodeError {
    /// The input string is empty.
    #[error("pincode cannot be empty")]
    Empty,
    /// The input is not exactly six digits long.
    #[error("pincode must be exactly {expected} digits")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
    },
    /// The input contains a non-digit character.
    #[error("pincode must contain only digits")]
    NonDigit,
}

/// A six-digit Indian postal pincode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Pincode(String);

impl Pincode {
    /// Number of digits in a pincode.
    pub const DIGITS: usize = 6;

    /// Parse a `Pincode` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, not six characters,
    /// or contains a non-digit character.
    pub fn parse(s: &str) -> Result<Self, PincodeError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(PincodeError::Empty);
        }

        if s.len() != Self::DIGITS {
            return Err(PincodeError::WrongLength {
                expected: Self::DIGITS,
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PincodeError::NonDigit);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the pincode as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
