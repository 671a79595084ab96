//! Business logic services.
//!
//! # Services
//!
//! - `auth` - OTP login and session tokens
//! - `cart` - Per-user cart mutations
//! - `orders` - Checkout, order history and admin status updates
//! - `delivery` - OTP delivery channels (log, SMTP)
//!
//! Services are cheap borrowing views over [`AppState`](crate::state::AppState),
//! built per request via `state.auth()`, `state.carts()` and `state.orders()`.

pub mod auth;
pub mod cart;
pub mod delivery;
pub mod orders;
