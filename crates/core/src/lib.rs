//! Smart Laundry Core - Shared types library.
//!
//! This crate provides common types used across all Smart Laundry components:
//! - `api` - JSON API server (auth, catalog, cart, orders)
//! - `cli` - Command-line tools for tokens and catalog inspection
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for identifiers, roles, order IDs, prices and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
