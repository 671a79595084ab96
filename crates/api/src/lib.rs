//! Smart Laundry API library.
//!
//! This crate provides the JSON API as a library so the server binary, the
//! CLI and the integration tests share one router and one set of services.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod clock;
pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::app;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use secrecy::SecretString;

    use crate::clock::SystemClock;
    use crate::config::LaundryConfig;
    use crate::db::Stores;
    use crate::services::delivery::LogDelivery;
    use crate::state::AppState;

    /// Fresh state with in-memory stores and log delivery.
    pub fn test_state() -> AppState {
        AppState::from_parts(
            LaundryConfig::with_secret(SecretString::from("k7#Qp9$vL2@xR5!mN8&wT3*jF6^hB4%d")),
            Stores::in_memory(),
            Arc::new(LogDelivery),
            Arc::new(SystemClock),
        )
    }
}
