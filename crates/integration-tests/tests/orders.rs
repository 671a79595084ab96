//! Integration tests for checkout, order history and admin order management.

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use smart_laundry_integration_tests::{ADMIN, TestApp, number};

/// Put `items` in the cart, then check out the cart exactly as the server returned it.
async fn checkout(app: &TestApp, token: &str, items: &[(&str, i64)]) -> Value {
    let mut cart = Value::Null;
    for (id, qty) in items {
        cart = app
            .post("/api/cart/add", Some(token), json!({ "id": id, "qty": qty }))
            .await
            .body["cart"]
            .clone();
    }

    let response = app
        .post(
            "/api/checkout",
            Some(token),
            json!({ "cart": cart["items"], "total": cart["total"] }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "checkout: {:?}", response.body);
    response.body
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_places_order_and_empties_cart() {
    let app = TestApp::new();
    let token = app.login("meera@example.com").await;

    let body = checkout(&app, &token, &[("shirt", 2), ("blazer", 1)]).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Order placed successfully");
    assert!(body["order_id"].as_str().is_some_and(|id| id.starts_with("ORD_")));

    let cart = app.get("/api/cart", Some(&token)).await;
    assert_eq!(cart.body["items"], json!([]));

    let orders = app.get("/api/orders/my", Some(&token)).await;
    assert_eq!(orders.status, StatusCode::OK);
    let orders = orders.body.as_array().cloned().unwrap_or_default();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["_id"], body["order_id"]);
    assert_eq!(orders[0]["serviceName"], "Laundry Service");
    assert_eq!(orders[0]["status"], "Pending");
    assert!((number(&orders[0]["total"]) - 200.0).abs() < f64::EPSILON);
    assert!(orders[0]["pickupTime"].is_string());
    assert!(orders[0]["deliveryTime"].is_string());
}

#[tokio::test]
async fn test_checkout_keeps_submitted_total() {
    let app = TestApp::new();
    let token = app.login("meera@example.com").await;

    let response = app
        .post(
            "/api/checkout",
            Some(&token),
            json!({
                "cart": [{ "id": "shirt", "name": "Shirt", "price": 25, "qty": 1 }],
                "total": 20
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let orders = app.get("/api/orders/my", Some(&token)).await.body;
    assert!((number(&orders[0]["total"]) - 20.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_checkout_empty_cart() {
    let app = TestApp::new();
    let token = app.login("meera@example.com").await;

    for body in [json!({ "cart": [], "total": 0 }), json!({})] {
        let response = app.post("/api/checkout", Some(&token), body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.message(), "Cart is empty");
    }

    let orders = app.get("/api/orders/my", Some(&token)).await;
    assert_eq!(orders.body, json!([]));
}

#[tokio::test]
async fn test_order_ids_unique_within_one_millisecond() {
    let app = TestApp::new();
    let token = app.login("meera@example.com").await;

    let first = checkout(&app, &token, &[("shirt", 1)]).await;
    let second = checkout(&app, &token, &[("shirt", 1)]).await;
    assert_ne!(first["order_id"], second["order_id"]);
}

#[tokio::test]
async fn test_history_is_per_user_and_in_order() {
    let app = TestApp::new();
    let meera = app.login("meera@example.com").await;
    let arjun = app.login("9876543210").await;

    let first = checkout(&app, &meera, &[("shirt", 1)]).await;
    checkout(&app, &arjun, &[("carpet", 1)]).await;
    let second = checkout(&app, &meera, &[("jeans", 1)]).await;

    let orders = app.get("/api/orders/my", Some(&meera)).await.body;
    let ids: Vec<&Value> = orders
        .as_array()
        .map(|o| o.iter().map(|order| &order["_id"]).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec![&first["order_id"], &second["order_id"]]);
}

#[tokio::test]
async fn test_orders_require_token() {
    let app = TestApp::new();

    let response = app.get("/api/orders/my", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .post("/api/checkout", None, json!({ "cart": [], "total": 0 }))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Admin
// =============================================================================

#[tokio::test]
async fn test_admin_lists_every_order() {
    let app = TestApp::new();
    let meera = app.login("meera@example.com").await;
    let arjun = app.login("9876543210").await;
    let admin = app.login(ADMIN).await;

    checkout(&app, &meera, &[("suit", 1)]).await;
    checkout(&app, &arjun, &[("curtains", 2)]).await;

    let response = app.get("/api/admin/orders", Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);
    let orders = response.body.as_array().cloned().unwrap_or_default();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["user_id"], "meera@example.com");
    assert_eq!(orders[1]["user_id"], "9876543210");
    assert_eq!(orders[1]["items"][0]["qty"], 2);
}

#[tokio::test]
async fn test_admin_updates_status() {
    let app = TestApp::new();
    let meera = app.login("meera@example.com").await;
    let admin = app.login(ADMIN).await;
    let placed = checkout(&app, &meera, &[("sandals", 1)]).await;
    let order_id = placed["order_id"].as_str().unwrap_or_default();

    let response = app
        .request(
            Method::PUT,
            &format!("/api/admin/orders/{order_id}/status"),
            Some(&admin),
            Some(json!({ "status": "Delivered" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Order status updated");
    assert_eq!(response.body["order"]["status"], "Delivered");

    let orders = app.get("/api/orders/my", Some(&meera)).await.body;
    assert_eq!(orders[0]["status"], "Delivered");
}

#[tokio::test]
async fn test_admin_status_stored_verbatim() {
    let app = TestApp::new();
    let meera = app.login("meera@example.com").await;
    let admin = app.login(ADMIN).await;
    let placed = checkout(&app, &meera, &[("sandals", 1)]).await;
    let order_id = placed["order_id"].as_str().unwrap_or_default();

    let response = app
        .request(
            Method::PUT,
            &format!("/api/admin/orders/{order_id}/status"),
            Some(&admin),
            Some(json!({ "status": "Waiting for stain check" })),
        )
        .await;
    assert_eq!(response.body["order"]["status"], "Waiting for stain check");
}

#[tokio::test]
async fn test_admin_status_errors() {
    let app = TestApp::new();
    let meera = app.login("meera@example.com").await;
    let admin = app.login(ADMIN).await;
    let placed = checkout(&app, &meera, &[("sandals", 1)]).await;
    let order_id = placed["order_id"].as_str().unwrap_or_default();

    let missing = app
        .request(
            Method::PUT,
            &format!("/api/admin/orders/{order_id}/status"),
            Some(&admin),
            Some(json!({})),
        )
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.message(), "Status is required");

    let unknown = app
        .request(
            Method::PUT,
            "/api/admin/orders/ORD_1/status",
            Some(&admin),
            Some(json!({ "status": "Confirmed" })),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.message(), "Order not found");
}

#[tokio::test]
async fn test_non_admin_gets_403_without_data() {
    let app = TestApp::new();
    let meera = app.login("meera@example.com").await;
    let placed = checkout(&app, &meera, &[("shirt", 1)]).await;
    let order_id = placed["order_id"].as_str().unwrap_or_default();

    let list = app.get("/api/admin/orders", Some(&meera)).await;
    assert_eq!(list.status, StatusCode::FORBIDDEN);
    assert_eq!(list.body, json!({ "message": "Access denied" }));

    let update = app
        .request(
            Method::PUT,
            &format!("/api/admin/orders/{order_id}/status"),
            Some(&meera),
            Some(json!({ "status": "Cancelled" })),
        )
        .await;
    assert_eq!(update.status, StatusCode::FORBIDDEN);
    assert_eq!(update.body, json!({ "message": "Access denied" }));

    // The rejected update left the order alone
    let orders = app.get("/api/orders/my", Some(&meera)).await.body;
    assert_eq!(orders[0]["status"], "Pending");
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = TestApp::new();
    let response = app.get("/api/admin/orders", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Token is required");
}
