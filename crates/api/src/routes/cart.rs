//! Cart route handlers.
//!
//! Every route requires a bearer token; the cart belongs to the token's
//! subject. Mutations answer with the updated cart.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::MessageResponse;
use crate::error::{ApiJson, Result, add_breadcrumb};
use crate::middleware::RequireAuth;
use crate::models::Cart;
use crate::state::AppState;

/// Body of `POST /api/cart/add`.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    /// Catalog option ID.
    #[serde(default)]
    pub id: String,
    /// Units to add. Defaults to 1.
    #[serde(default = "default_qty")]
    pub qty: i64,
}

const fn default_qty() -> i64 {
    1
}

/// Body of `POST /api/cart/decrease`.
#[derive(Debug, Deserialize)]
pub struct DecreaseItemRequest {
    #[serde(default)]
    pub id: String,
}

/// A cart mutation result.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub message: &'static str,
    pub cart: Cart,
}

/// GET /api/cart
#[instrument(skip_all, fields(user = %user.identifier))]
pub async fn show(State(state): State<AppState>, RequireAuth(user): RequireAuth) -> Result<Json<Cart>> {
    Ok(Json(state.carts().get(&user.identifier).await?))
}

/// POST /api/cart/add
#[instrument(skip_all, fields(user = %user.identifier, item = %body.id, qty = body.qty))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(body): ApiJson<AddItemRequest>,
) -> Result<Json<CartResponse>> {
    let cart = state
        .carts()
        .add(&user.identifier, &body.id, body.qty)
        .await?;
    add_breadcrumb("cart", "Added item", Some(&[("item_id", body.id.as_str())]));

    Ok(Json(CartResponse {
        message: "Item added to cart",
        cart,
    }))
}

/// POST /api/cart/decrease
#[instrument(skip_all, fields(user = %user.identifier, item = %body.id))]
pub async fn decrease(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(body): ApiJson<DecreaseItemRequest>,
) -> Result<Json<CartResponse>> {
    let cart = state.carts().decrease(&user.identifier, &body.id).await?;
    Ok(Json(CartResponse {
        message: "Item quantity decreased",
        cart,
    }))
}

/// DELETE /api/cart/{item_id}
#[instrument(skip_all, fields(user = %user.identifier, item = %item_id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(item_id): Path<String>,
) -> Result<Json<CartResponse>> {
    let cart = state.carts().remove(&user.identifier, &item_id).await?;
    Ok(Json(CartResponse {
        message: "Item removed from cart",
        cart,
    }))
}

/// DELETE /api/cart
#[instrument(skip_all, fields(user = %user.identifier))]
pub async fn clear(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<MessageResponse>> {
    state.carts().clear(&user.identifier).await?;
    Ok(Json(MessageResponse::new("Cart cleared")))
}
