//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::catalog::{LANGUAGES, Service};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// All services with their items and prices.
///
/// GET /api/services
pub async fn services(State(state): State<AppState>) -> Json<Vec<Service>> {
    Json(state.catalog().services().to_vec())
}

/// One service by ID.
///
/// GET /api/services/{id}
pub async fn service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Service>> {
    state
        .catalog()
        .service(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Service not found".to_string()))
}

/// `"All"` followed by each distinct service category.
///
/// GET /api/categories
pub async fn categories(State(state): State<AppState>) -> Json<Vec<&'static str>> {
    Json(state.catalog().categories())
}

/// Supported UI languages.
///
/// GET /api/languages
pub async fn languages() -> Json<[&'static str; 3]> {
    Json(LANGUAGES)
}
