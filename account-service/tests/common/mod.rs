use std::sync::Arc;

use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountRepository;
use authkit::AuthConfig;
use authkit::Authenticator;
use authkit::FixedClock;
use authkit::HashingCost;
use axum::body::Body;
use axum::http::header;
use axum::http::Request;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Router;
use chrono::Duration;
use chrono::Utc;
use tower::ServiceExt;

pub const TOKEN_TTL_MINUTES: i64 = 30;

/// Test application driving the router directly, with an in-memory
/// user directory and a manually controlled clock.
pub struct TestApp {
    router: Router,
    pub clock: Arc<FixedClock>,
}

impl TestApp {
    pub fn spawn() -> Self {
        let clock = Arc::new(FixedClock::new(Utc::now()));

        let config = AuthConfig {
            signing_key: b"test_secret_key_at_least_32_bytes!".to_vec(),
            token_ttl: Duration::minutes(TOKEN_TTL_MINUTES),
            // Low cost keeps the suite fast; production uses defaults.
            hashing_cost: HashingCost {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
        };

        let authenticator =
            Arc::new(Authenticator::new(config, clock.clone()).expect("Failed to build"));
        let repository = Arc::new(InMemoryAccountRepository::new());
        let account_service = Arc::new(AccountService::new(repository, authenticator));

        Self {
            router: create_router(account_service),
            clock,
        }
    }

    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.request(request).await
    }

    pub async fn get(&self, uri: &str, bearer: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = builder
            .body(Body::empty())
            .expect("Failed to build request");
        self.request(request).await
    }

    pub async fn patch_json(
        &self,
        uri: &str,
        bearer: &str,
        body: serde_json::Value,
    ) -> Response {
        let request = Request::builder()
            .method("PATCH")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", bearer))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.request(request).await
    }

    /// Register an account, asserting success.
    pub async fn register(&self, username: &str, email: &str, password: &str) {
        let response = self
            .post_json(
                "/api/accounts",
                serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password,
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    /// Log in and return the issued access token, asserting success.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post_json(
                "/api/auth/login",
                serde_json::json!({
                    "username": username,
                    "password": password,
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Failed to parse response body")
}
