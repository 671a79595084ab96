//! API index, health check and fallback.

use axum::Json;
use chrono::Local;
use serde::Serialize;

use crate::error::AppError;

/// Version reported by the index and health check.
pub const API_VERSION: &str = "1.0.0";

/// Endpoint groups listed on the index.
#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub auth: &'static str,
    pub services: &'static str,
    pub cart: &'static str,
    pub orders: &'static str,
    pub contact: &'static str,
    pub health: &'static str,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Local time, ISO 8601.
    pub timestamp: String,
    pub version: &'static str,
}

/// GET /
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Smart Laundry Backend API",
        version: API_VERSION,
        endpoints: Endpoints {
            auth: "/api/auth/*",
            services: "/api/services/*",
            cart: "/api/cart/*",
            orders: "/api/orders/*",
            contact: "/api/contact",
            health: "/health",
        },
    })
}

/// Liveness health check endpoint.
///
/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        version: API_VERSION,
    })
}

/// Any route that does not exist.
pub async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}
