//! One-time passcode type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`OtpCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpCodeError {
    /// The input is not exactly six characters long.
    #[error("OTP must be exactly {expected} digits")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
    },
    /// The input contains a non-digit character.
    #[error("OTP must contain only digits")]
    NonDigit,
}

/// A six-digit one-time passcode.
///
/// Stored as a string so that leading zeros survive: the code `004823` is
/// six characters on the wire and must compare equal only to itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    /// Number of digits in a code.
    pub const DIGITS: usize = 6;

    /// Parse an `OtpCode` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is not exactly six ASCII digits.
    pub fn parse(s: &str) -> Result<Self, OtpCodeError> {
        let s = s.trim();

        if s.len() != Self::DIGITS {
            return Err(OtpCodeError::WrongLength {
                expected: Self::DIGITS,
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OtpCodeError::NonDigit);
        }

        Ok(Self(s.to_owned()))
    }

    /// Build a code from a number in `0..=999_999`, zero-padded to six digits.
    #[must_use]
    pub fn from_number(n: u32) -> Self {
        debug_assert!(n <= 999_999);
        Self(format!("{n:06}"))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
