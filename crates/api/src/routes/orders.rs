//! Checkout and order history.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use smart_laundry_core::{OrderId, Price};

use crate::error::{ApiJson, Result, add_breadcrumb};
use crate::middleware::RequireAuth;
use crate::models::{CartItem, OrderSummary};
use crate::state::AppState;

/// Body of `POST /api/checkout`: the client's cart snapshot.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub cart: Vec<CartItem>,
    #[serde(default)]
    pub total: Price,
}

/// Successful checkout.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub success: bool,
    pub order_id: OrderId,
    pub message: &'static str,
}

/// Place an order from the submitted cart and empty the stored cart.
///
/// POST /api/checkout
#[instrument(skip_all, fields(user = %user.identifier))]
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(body): ApiJson<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let order = state
        .orders()
        .checkout(&user.identifier, body.cart, body.total)
        .await?;
    add_breadcrumb(
        "checkout",
        "Order placed",
        Some(&[("order_id", order.id.as_str())]),
    );

    Ok(Json(CheckoutResponse {
        success: true,
        order_id: order.id,
        message: "Order placed successfully",
    }))
}

/// The caller's orders, oldest first.
///
/// GET /api/orders/my
#[instrument(skip_all, fields(user = %user.identifier))]
pub async fn my_orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<OrderSummary>>> {
    Ok(Json(state.orders().list_mine(&user.identifier).await?))
}
