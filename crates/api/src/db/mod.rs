//! Storage for users, carts, orders and OTP challenges.
//!
//! Each kind of record sits behind its own async trait so the services never
//! depend on a concrete backend. The shipped backends keep everything in
//! process memory:
//!
//! - [`InMemoryUserStore`] - users keyed by identifier
//! - [`InMemoryCartStore`] - one cart per user
//! - [`InMemoryOrderStore`] - append-only order log
//! - [`InMemoryChallengeStore`] - at most one pending OTP per identifier
//!
//! All state is lost when the process exits.

pub mod carts;
pub mod challenges;
pub mod orders;
pub mod users;

use std::sync::Arc;

pub use carts::{CartStore, InMemoryCartStore};
pub use challenges::{ChallengeStore, InMemoryChallengeStore};
pub use orders::{InMemoryOrderStore, OrderStore};
pub use users::{InMemoryUserStore, UserStore};

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// The backing store failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// The set of stores the application runs against.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub carts: Arc<dyn CartStore>,
    pub orders: Arc<dyn OrderStore>,
    pub challenges: Arc<dyn ChallengeStore>,
}

impl Stores {
    /// Fresh, empty in-memory stores.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserStore::new()),
            carts: Arc::new(InMemoryCartStore::new()),
            orders: Arc::new(InMemoryOrderStore::new()),
            challenges: Arc::new(InMemoryChallengeStore::new()),
        }
    }
}

impl Default for Stores {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
