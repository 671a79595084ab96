//! Core types for Smart Laundry.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod identifier;
pub mod price;
pub mod role;
pub mod status;

pub use id::OrderId;
pub use identifier::{Identifier, IdentifierError, IdentifierKind};
pub use price::Price;
pub use role::Role;
pub use status::OrderStatus;
