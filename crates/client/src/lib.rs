//! Seva commerce client library.
//!
//! The pieces of the flow that run on the buyer's side of the wire:
//!
//! - [`api`] - the service contract ([`api::SevaApi`]) and its
//!   reqwest-backed implementation ([`api::HttpApi`])
//! - [`flow`] - the contact-verification and session-establishment state
//!   machine ([`flow::AuthFlow`])
//! - [`checkout`] - the cart-to-order driver, owning the clear-on-success
//!   and history side effects
//!
//! Each user session drives these on a single logical thread; mutations
//! are sequential within a session, so the types hold no internal locks.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod checkout;
pub mod flow;

#[cfg(test)]
mod testing;

pub use api::{ApiError, HttpApi, SevaApi};
pub use checkout::{CheckoutError, checkout};
pub use flow::{AuthFlow, AuthStage, FlowError};
