//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::clock::{Clock, SystemClock};
use crate::config::LaundryConfig;
use crate::content::SiteContent;
use crate::db::Stores;
use crate::services::auth::{AdminPolicy, AuthService, SessionTokens};
use crate::services::cart::{CartService, KeyedLocks};
use crate::services::delivery::{LogDelivery, OtpDelivery, SmtpDelivery};
use crate::services::orders::{OrderIdGenerator, OrderService};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("smtp configuration error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the stores, the catalog and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: LaundryConfig,
    catalog: Catalog,
    content: SiteContent,
    stores: Stores,
    delivery: Arc<dyn OtpDelivery>,
    clock: Arc<dyn Clock>,
    tokens: SessionTokens,
    admin_policy: AdminPolicy,
    cart_locks: KeyedLocks,
    order_ids: OrderIdGenerator,
}

impl AppState {
    /// Create the production state: in-memory stores, the system clock, and
    /// SMTP delivery when email is configured (log delivery otherwise).
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP relay cannot be configured.
    pub fn new(config: LaundryConfig) -> Result<Self, StateError> {
        let delivery: Arc<dyn OtpDelivery> = match &config.email {
            Some(email) => {
                tracing::info!(host = %email.smtp_host, "OTP delivery via SMTP");
                Arc::new(SmtpDelivery::new(email)?)
            }
            None => {
                tracing::warn!("SMTP not configured; OTP codes will be written to the log");
                Arc::new(LogDelivery)
            }
        };

        Ok(Self::from_parts(
            config,
            Stores::in_memory(),
            delivery,
            Arc::new(SystemClock),
        ))
    }

    /// Assemble state from explicit parts.
    #[must_use]
    pub fn from_parts(
        config: LaundryConfig,
        stores: Stores,
        delivery: Arc<dyn OtpDelivery>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let tokens = SessionTokens::new(&config.jwt_secret, config.session_ttl);
        let admin_policy = AdminPolicy::new(config.admin_identifiers.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Catalog::builtin(),
                content: SiteContent::builtin(),
                stores,
                delivery,
                clock,
                tokens,
                admin_policy,
                cart_locks: KeyedLocks::new(),
                order_ids: OrderIdGenerator::new(),
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &LaundryConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn content(&self) -> &SiteContent {
        &self.inner.content
    }

    #[must_use]
    pub fn stores(&self) -> &Stores {
        &self.inner.stores
    }

    #[must_use]
    pub fn delivery(&self) -> &Arc<dyn OtpDelivery> {
        &self.inner.delivery
    }

    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.inner.clock.as_ref()
    }

    #[must_use]
    pub fn tokens(&self) -> &SessionTokens {
        &self.inner.tokens
    }

    #[must_use]
    pub fn admin_policy(&self) -> &AdminPolicy {
        &self.inner.admin_policy
    }

    #[must_use]
    pub fn cart_locks(&self) -> &KeyedLocks {
        &self.inner.cart_locks
    }

    #[must_use]
    pub fn order_ids(&self) -> &OrderIdGenerator {
        &self.inner.order_ids
    }

    /// Authentication service over this state.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    /// Cart service over this state.
    #[must_use]
    pub fn carts(&self) -> CartService<'_> {
        CartService::new(self)
    }

    /// Order service over this state.
    #[must_use]
    pub fn orders(&self) -> OrderService<'_> {
        OrderService::new(self)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
