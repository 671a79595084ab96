//! Admin order management.
//!
//! Both routes require a bearer token whose user holds the admin role.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use smart_laundry_core::OrderId;

use crate::error::{ApiJson, Result};
use crate::middleware::RequireAdmin;
use crate::models::Order;
use crate::state::AppState;

/// Body of `PUT /api/admin/orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub message: &'static str,
    pub order: Order,
}

/// Every order, unprojected.
///
/// GET /api/admin/orders
#[instrument(skip_all, fields(admin = %admin.id))]
pub async fn list_orders(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<Vec<Order>>> {
    Ok(Json(state.orders().list_all().await?))
}

/// Overwrite an order's status.
///
/// PUT /api/admin/orders/{id}/status
#[instrument(skip_all, fields(admin = %admin.id, order_id = %id))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>> {
    let order = state
        .orders()
        .set_status(&OrderId::from_path(&id), body.status)
        .await?;

    Ok(Json(UpdateStatusResponse {
        message: "Order status updated",
        order,
    }))
}
