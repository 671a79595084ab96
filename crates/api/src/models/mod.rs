//! Domain models.
//!
//! These types are what the stores hold and what handlers serialize. Cart
//! arithmetic lives on [`Cart`] itself so the invariants travel with the data.

pub mod cart;
pub mod challenge;
pub mod order;
pub mod user;

pub use cart::{Cart, CartItem, QuantityOverflow};
pub use challenge::OtpChallenge;
pub use order::{Order, OrderSummary};
pub use user::User;
