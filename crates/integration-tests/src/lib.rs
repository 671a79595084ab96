//! Integration tests for Smart Laundry.
//!
//! Tests drive the full router (middleware, fallback and error mapping
//! included) in process with `tower::ServiceExt::oneshot`. No server,
//! network or mail relay is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p smart-laundry-integration-tests
//! ```
//!
//! # Harness
//!
//! [`TestApp`] owns a router built over fresh in-memory stores, a
//! [`ManualClock`] that only moves when a test advances it, and a
//! [`RecordingDelivery`] that hands every issued OTP back to the test.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use chrono::Utc;
use secrecy::SecretString;
use serde_json::Value;
use tokio::sync::{Mutex, mpsc};
use tower::ServiceExt;

use smart_laundry_api::clock::{Clock, ManualClock};
use smart_laundry_api::config::LaundryConfig;
use smart_laundry_api::db::Stores;
use smart_laundry_api::services::delivery::{DeliveryError, OtpDelivery};
use smart_laundry_api::state::AppState;
use smart_laundry_core::Identifier;

/// Signing secret shared by every test app.
pub const TEST_JWT_SECRET: &str = "Hq7!cV2@mZ9#tR4$wK8%yB3^nF6&jD1*";

/// Identifier on the default admin allow-list.
pub const ADMIN: &str = "admin@laundry.com";

/// How long to wait for a spawned delivery before failing the test.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// OTP delivery that forwards each code to the test instead of sending it.
#[derive(Debug, Clone)]
pub struct RecordingDelivery {
    tx: mpsc::UnboundedSender<(Identifier, String)>,
}

#[async_trait]
impl OtpDelivery for RecordingDelivery {
    async fn deliver(&self, to: &Identifier, code: &str) -> Result<(), DeliveryError> {
        // The receiver lives as long as the TestApp; a closed channel just drops the code
        let _ = self.tx.send((to.clone(), code.to_owned()));
        Ok(())
    }
}

/// A decoded JSON response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `message` field of the body.
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

/// The application under test.
pub struct TestApp {
    pub state: AppState,
    pub clock: Arc<ManualClock>,
    router: Router,
    codes: Mutex<mpsc::UnboundedReceiver<(Identifier, String)>>,
}

impl TestApp {
    /// An app over fresh in-memory stores.
    pub fn new() -> Self {
        Self::with_stores(Stores::in_memory())
    }

    /// An app over the given stores.
    pub fn with_stores(stores: Stores) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let shared: Arc<dyn Clock> = clock.clone();
        let config = LaundryConfig::with_secret(SecretString::from(TEST_JWT_SECRET));

        let state = AppState::from_parts(
            config,
            stores,
            Arc::new(RecordingDelivery { tx }),
            shared,
        );

        Self {
            router: smart_laundry_api::app(state.clone()),
            state,
            clock,
            codes: Mutex::new(rx),
        }
    }

    /// Send a request with an optional bearer token and JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let body = body.map(|b| b.to_string());
        self.request_raw(method, uri, token, body).await
    }

    /// Send a request with a raw body, for malformed-input tests.
    pub async fn request_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        self.send(request).await
    }

    /// Send a prepared request and decode the response.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// The next OTP handed to the delivery channel.
    pub async fn next_code(&self) -> (Identifier, String) {
        let mut codes = self.codes.lock().await;
        tokio::time::timeout(DELIVERY_TIMEOUT, codes.recv())
            .await
            .expect("OTP delivered in time")
            .expect("delivery channel open")
    }

    /// Request an OTP for `identifier` and return the delivered code.
    pub async fn request_code(&self, identifier: &str) -> String {
        let response = self
            .post(
                "/api/auth/send-otp",
                None,
                serde_json::json!({ "email": identifier }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "send-otp: {:?}", response.body);

        let (to, code) = self.next_code().await;
        assert_eq!(to.as_str(), identifier);
        code
    }

    /// Full OTP login; returns the bearer token.
    pub async fn login(&self, identifier: &str) -> String {
        let code = self.request_code(identifier).await;
        let response = self
            .post(
                "/api/auth/login",
                None,
                serde_json::json!({ "email": identifier, "otp": code }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login: {:?}", response.body);

        response.body["token"]
            .as_str()
            .expect("token in login response")
            .to_owned()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a JSON number as `f64`.
pub fn number(value: &Value) -> f64 {
    value.as_f64().expect("JSON number")
}
