//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tower::ServiceExt;

use kuconnect_api::{AppState, build_app};
use kuconnect_auth::JwtEncoder;
use kuconnect_core::config::{AppConfig, DatabaseBackend, EmbeddingProviderKind};
use kuconnect_core::types::UserId;
use kuconnect_database::{MemoryStore, Stores};
use kuconnect_service::{EventWorker, build_embedder, build_push_sender};

/// Test application context over the in-memory backend
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct inspection
    pub store: MemoryStore,
    /// Application config
    pub config: AppConfig,
    encoder: JwtEncoder,
    worker: Mutex<EventWorker>,
}

/// A user with a profile and a valid token
#[derive(Debug, Clone)]
pub struct TestUser {
    /// User id (token subject)
    pub id: UserId,
    /// Bearer token
    pub token: String,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.backend = DatabaseBackend::Memory;
        config.embedding.provider = EmbeddingProviderKind::Hashing;
        config.embedding.dimensions = 64;
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let store = MemoryStore::with_default_interests();
        let embedder = build_embedder(&config.embedding).expect("embedder");
        let push = build_push_sender(&config.push).expect("push sender");
        let (state, worker) =
            AppState::build(config.clone(), Stores::memory(store.clone()), None, embedder, push);

        Self {
            router: build_app(state),
            store,
            encoder: JwtEncoder::new(&config.auth),
            config,
            worker: Mutex::new(worker),
        }
    }

    /// Mint a token for `user_id`
    pub fn token_for(&self, user_id: UserId) -> String {
        self.encoder
            .issue(user_id, Some(format!("{user_id}@ku.th")), 3600)
            .expect("Failed to mint token")
    }

    /// Deliver every queued domain event and return how many there were
    pub async fn flush_events(&self) -> usize {
        self.worker.lock().await.run_pending().await
    }

    /// A fresh identity with a token but no profile
    pub fn anonymous(&self) -> TestUser {
        let id = UserId::new();
        TestUser {
            id,
            token: self.token_for(id),
        }
    }

    /// Create a user with a profile built around `interests`
    pub async fn sign_up(&self, name: &str, interests: &[&str]) -> TestUser {
        let user = self.anonymous();
        let mut ids = Vec::new();
        for interest in interests {
            let found = self
                .store
                .interest_named(interest)
                .await
                .expect("Unknown interest");
            ids.push(found.id);
        }
        let response = self
            .request(
                "POST",
                "/api/profiles",
                Some(json!({
                    "displayName": name,
                    "faculty": "Engineering",
                    "department": "Computer Engineering",
                    "year": 3,
                    "line": format!("{}.line", name.to_lowercase()),
                    "interests": ids,
                })),
                Some(&user.token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Profile creation failed: {:?}",
            response.body
        );
        user
    }

    /// Record `from`'s judgment of `to`
    pub async fn judge(&self, from: &TestUser, to: &TestUser, liked: bool) -> TestResponse {
        self.request(
            "POST",
            "/api/interactions",
            Some(json!({ "toUserId": to.id, "liked": liked })),
            Some(&from.token),
        )
        .await
    }

    /// Make two users like each other and return their chat id
    pub async fn connect(&self, a: &TestUser, b: &TestUser) -> String {
        let first = self.judge(a, b, true).await;
        assert_eq!(first.status, StatusCode::OK, "{:?}", first.body);
        let second = self.judge(b, a, true).await;
        assert_eq!(second.status, StatusCode::OK, "{:?}", second.body);
        second.body["chatId"]
            .as_str()
            .expect("No chatId in mutual like response")
            .to_string()
    }

    /// Make an HTTP request to the test app
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
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `error` code of an error body
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
