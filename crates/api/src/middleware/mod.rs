//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP context)
//! 2. CORS (also covers panic responses)
//! 3. Panic catcher (JSON 500)
//! 4. `TraceLayer` (request span with `request_id` field)
//! 5. Request ID (record on span, echo in response)
//!
//! Authentication is not a layer: handlers opt in with the
//! [`RequireAuth`] and [`RequireAdmin`] extractors.

pub mod auth;
pub mod request_id;

pub use auth::{AuthUser, RequireAdmin, RequireAuth};
pub use request_id::request_id_middleware;
