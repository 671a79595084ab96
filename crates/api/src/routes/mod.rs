//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                              - API index
//! GET    /health                        - Health check
//!
//! # Auth
//! POST   /api/auth/send-otp             - Issue an OTP
//! POST   /api/auth/login                - Exchange an OTP for a token
//! GET    /api/auth/me                   - Current user (bearer)
//! GET    /api/auth/google               - 501
//!
//! # Catalog
//! GET    /api/services                  - All services
//! GET    /api/services/{id}             - One service
//! GET    /api/categories                - Service categories
//! GET    /api/languages                 - UI languages
//!
//! # Cart (bearer)
//! GET    /api/cart                      - Current cart
//! POST   /api/cart/add                  - Add an item
//! POST   /api/cart/decrease             - Take one unit out
//! DELETE /api/cart/{item_id}            - Remove an item
//! DELETE /api/cart                      - Clear the cart
//!
//! # Orders (bearer)
//! POST   /api/checkout                  - Place an order
//! GET    /api/orders/my                 - Order history
//!
//! # Admin (bearer, admin role)
//! GET    /api/admin/orders              - Every order
//! PUT    /api/admin/orders/{id}/status  - Set an order's status
//!
//! # Site content
//! POST   /api/contact                   - Contact form
//! GET    /api/stats, /api/why-choose, /api/how-it-works,
//!        /api/final-cta, /api/aboutus
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod contact;
pub mod content;
pub mod home;
pub mod orders;

use std::any::Any;

use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::error::{AppError, INTERNAL_ERROR_MESSAGE};
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// A response that carries only a message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    #[must_use]
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(auth::send_otp))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
        .route("/google", get(auth::google))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/add", post(cart::add))
        .route("/decrease", post(cart::decrease))
        .route("/{item_id}", delete(cart::remove))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(admin::list_orders))
        .route("/orders/{id}/status", put(admin::update_status))
}

/// Create all `/api` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        // Catalog
        .route("/services", get(catalog::services))
        .route("/services/", get(catalog::services))
        .route("/services/{id}", get(catalog::service))
        .route("/categories", get(catalog::categories))
        .route("/languages", get(catalog::languages))
        .nest("/cart", cart_routes())
        // Orders
        .route("/checkout", post(orders::checkout))
        .route("/orders/my", get(orders::my_orders))
        .nest("/admin", admin_routes())
        // Site content
        .route("/contact", post(contact::submit))
        .route("/stats", get(content::stats))
        .route("/why-choose", get(content::why_choose))
        .route("/how-it-works", get(content::how_it_works))
        .route("/final-cta", get(content::final_cta))
        .route("/aboutus", get(content::about_us))
}

/// Build the complete application: routes, fallback and middleware.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config().cors_origins);

    Router::new()
        .route("/", get(home::index))
        .route("/health", get(home::health))
        .nest("/api", api_routes())
        .fallback(home::not_found)
        // Outermost first
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(TraceLayer::new_for_http().make_span_with(
                    |request: &axum::http::Request<axum::body::Body>| {
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = tracing::field::Empty,
                        )
                    },
                ))
                .layer(axum::middleware::from_fn(request_id_middleware)),
        )
        .layer(cors)
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// CORS for the configured browser origins.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Turn a handler panic into the standard JSON 500.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "handler panicked");

    AppError::Internal(INTERNAL_ERROR_MESSAGE.to_string()).into_response()
}
