//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use skillswap_api::{AppState, build_app};
use skillswap_core::config::AppConfig;
use skillswap_database::Stores;
use skillswap_realtime::RealtimeEngine;

/// Test application over in-memory stores.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for reaching the real-time engine directly
    pub state: AppState,
}

/// A signed-up account.
pub struct TestUser {
    pub id: i64,
    pub token: String,
}

/// Response from a test request
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` field of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `error` code of a failure body.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.allow_admin_signup = true;
        Self::with_config(config)
    }

    /// Build over `config`, keeping only the test signing secret fixed.
    pub fn with_config(mut config: AppConfig) -> Self {
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let realtime = RealtimeEngine::new(config.realtime.clone());
        let state = AppState::new(config, Stores::memory(), realtime);
        let router = build_app(state.clone());

        Self { router, state }
    }

    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    async fn signup_at(&self, path: &str, name: &str) -> TestUser {
        let response = self
            .request(
                "POST",
                path,
                Some(json!({
                    "name": name,
                    "email": format!("{}@example.com", name.to_lowercase()),
                    "password": "password123",
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);

        TestUser {
            id: response.data()["user"]["id"].as_i64().expect("user id"),
            token: response.data()["token"]
                .as_str()
                .expect("token")
                .to_string(),
        }
    }

    /// Sign up a member named `name`, email `{name}@example.com`.
    pub async fn member(&self, name: &str) -> TestUser {
        self.signup_at("/api/v1/user/signup", name).await
    }

    pub async fn admin(&self, name: &str) -> TestUser {
        self.signup_at("/api/v1/admin/signup", name).await
    }

    /// Send the standard Guitar-for-Spanish request from `from` to `to`.
    pub async fn send_swap(&self, from: &TestUser, to: &TestUser) -> TestResponse {
        self.request(
            "POST",
            "/api/v1/swaps",
            Some(json!({
                "to_user_id": to.id,
                "skill_needed": "Spanish",
                "skill_offered": "Guitar",
            })),
            Some(&from.token),
        )
        .await
    }
}
