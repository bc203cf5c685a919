//! Process-wide shared stores.
//!
//! All state is in-memory and process-lifetime only: the user directory
//! stands in for the external document store, the OTP ledger is volatile
//! by design (codes do not survive a restart), and the catalog and pincode
//! table are read-only reference data loaded at startup.

pub mod catalog;
pub mod otp;
pub mod pincode;
pub mod users;

pub use catalog::{CatalogError, SevaCatalog};
pub use otp::OtpLedger;
pub use pincode::PincodeDirectory;
pub use users::UserDirectory;

use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Uniqueness violation (e.g., duplicate contact).
    #[error("{0}")]
    Conflict(String),
}
