//! Seva Core - Shared types library.
//!
//! This crate provides the domain types used across the seva commerce
//! components:
//! - `server` - HTTP JSON API (catalog, identity, OTP, orders)
//! - `client` - Auth flow controller and checkout driver
//!
//! # Architecture
//!
//! The core crate contains only types and pure aggregates - no I/O, no
//! HTTP clients, no async. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, contacts, codes, and prices
//! - [`seva`] - Catalog offering records
//! - [`user`] - User account records
//! - [`cart`] - The client-held cart aggregate
//! - [`order`] - Addresses, order receipts, and the bounded order history

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod order;
pub mod seva;
pub mod types;
pub mod user;

pub use cart::{Cart, CartItem};
pub use order::{Address, AddressError, AddressKind, Order, OrderHistory};
pub use seva::Seva;
pub use types::*;
pub use user::User;
