//! Contact identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Contact`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// The input string is empty.
    #[error("contact cannot be empty")]
    Empty,
    /// The input is not exactly ten digits long.
    #[error("contact must be exactly {expected} digits")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
    },
    /// The input contains a non-digit character.
    #[error("contact must contain only digits")]
    NonDigit,
    /// The first digit is outside the 6-9 mobile range.
    #[error("contact must start with a digit between 6 and 9")]
    InvalidPrefix,
}

/// A phone-number-like contact identifier.
///
/// The contact is the primary login identifier: both OTP entries and user
/// records are keyed on it, with at most one of each per normalized
/// contact at any time.
///
/// ## Constraints
///
/// - Exactly 10 digits
/// - First digit in the range 6-9 (Indian mobile numbering)
/// - Surrounding whitespace is trimmed during parsing
///
/// ## Examples
///
/// ```
/// use seva_core::Contact;
///
/// assert!(Contact::parse("9876543210").is_ok());
/// assert!(Contact::parse(" 9876543210 ").is_ok()); // trimmed
///
/// assert!(Contact::parse("").is_err());            // empty
/// assert!(Contact::parse("12345").is_err());       // too short
/// assert!(Contact::parse("1234567890").is_err());  // bad prefix
/// assert!(Contact::parse("987654321x").is_err());  // non-digit
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Contact(String);

impl Contact {
    /// Number of digits in a valid contact.
    pub const DIGITS: usize = 10;

    /// Parse a `Contact` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input:
    /// - Is empty
    /// - Is not exactly 10 characters
    /// - Contains a non-digit character
    /// - Does not start with a digit in 6-9
    pub fn parse(s: &str) -> Result<Self, ContactError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(ContactError::Empty);
        }

        if s.len() != Self::DIGITS {
            return Err(ContactError::WrongLength {
                expected: Self::DIGITS,
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ContactError::NonDigit);
        }

        if !matches!(s.as_bytes()[0], b'6'..=b'9') {
            return Err(ContactError::InvalidPrefix);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the contact as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Contact` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
