//! Core types for the seva commerce flow.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact;
pub mod id;
pub mod otp;
pub mod pincode;
pub mod price;

pub use contact::{Contact, ContactError};
pub use id::*;
pub use otp::{OtpCode, OtpCodeError};
pub use pincode::{Pincode, PincodeError};
pub use price::Price;
