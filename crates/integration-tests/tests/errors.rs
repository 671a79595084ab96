//! Integration tests for error responses: fallback, bad input and storage failures.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use serde_json::json;

use smart_laundry_api::db::{OrderStore, RepositoryError, Stores};
use smart_laundry_api::models::Order;
use smart_laundry_core::{Identifier, OrderId, OrderStatus};
use smart_laundry_integration_tests::TestApp;

/// An order store whose backend is always down.
struct UnavailableOrderStore;

#[async_trait]
impl OrderStore for UnavailableOrderStore {
    async fn append(&self, _order: Order) -> Result<(), RepositoryError> {
        Err(RepositoryError::Backend("connection refused".to_string()))
    }

    async fn list_for_user(&self, _user: &Identifier) -> Result<Vec<Order>, RepositoryError> {
        Err(RepositoryError::Backend("connection refused".to_string()))
    }

    async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        Err(RepositoryError::Backend("connection refused".to_string()))
    }

    async fn set_status(
        &self,
        _id: &OrderId,
        _status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        Err(RepositoryError::Backend("connection refused".to_string()))
    }
}

fn app_without_orders() -> TestApp {
    TestApp::with_stores(Stores {
        orders: Arc::new(UnavailableOrderStore),
        ..Stores::in_memory()
    })
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new();

    for uri in ["/nope", "/api/unknown", "/api/cart/add/extra"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(response.body, json!({ "message": "Endpoint not found" }));
    }
}

#[tokio::test]
async fn test_malformed_json() {
    let app = TestApp::new();
    let response = app
        .request_raw(
            Method::POST,
            "/api/auth/send-otp",
            None,
            Some("{\"email\": ".to_string()),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Invalid request body");
}

#[tokio::test]
async fn test_wrong_json_type() {
    let app = TestApp::new();
    let token = app.login("meera@example.com").await;

    let response = app
        .post(
            "/api/cart/add",
            Some(&token),
            json!({ "id": "shirt", "qty": "two" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Invalid request body");
}

#[tokio::test]
async fn test_missing_json_body() {
    let app = TestApp::new();
    let response = app
        .request_raw(Method::POST, "/api/contact", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Invalid request body");
}

#[tokio::test]
async fn test_storage_failure_is_opaque_500() {
    let app = app_without_orders();
    let token = app.login("meera@example.com").await;

    let response = app
        .post(
            "/api/checkout",
            Some(&token),
            json!({
                "cart": [{ "id": "shirt", "name": "Shirt", "price": 25, "qty": 1 }],
                "total": 25
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({ "message": "Internal server error" }));

    let history = app.get("/api/orders/my", Some(&token)).await;
    assert_eq!(history.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!history.body.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_failed_checkout_keeps_cart() {
    let app = app_without_orders();
    let token = app.login("meera@example.com").await;
    app.post("/api/cart/add", Some(&token), json!({ "id": "shirt" }))
        .await;

    let response = app
        .post(
            "/api/checkout",
            Some(&token),
            json!({
                "cart": [{ "id": "shirt", "name": "Shirt", "price": 25, "qty": 1 }],
                "total": 25
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);

    let cart = app.get("/api/cart", Some(&token)).await;
    assert_eq!(cart.body["totalQty"], 1);
}
