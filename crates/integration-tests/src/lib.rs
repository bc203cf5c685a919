//! End-to-end tests for the seva commerce flow.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server
//! cargo run -p seva-server
//!
//! # Run the end-to-end tests against it
//! cargo test -p seva-integration-tests -- --ignored
//! ```
//!
//! The tests default to `http://localhost:5000`; override with
//! `SEVA_BASE_URL`.

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SEVA_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}
