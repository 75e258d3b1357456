/// Common test utilities for database-backed integration tests
///
/// Provides shared infrastructure for the end-to-end scenarios:
/// - Connection to the database named by `DATABASE_URL`, with migrations
///   applied
/// - Organization and user creation through the models
/// - Token issuance with the same codec the server uses
/// - Request helpers for driving the router
///
/// Tests using this harness skip themselves when `DATABASE_URL` is not set,
/// so the suite still passes in environments without a database.
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use taskflow_api::app::{build_router, AppState};
use taskflow_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use taskflow_shared::auth::jwt;
use taskflow_shared::models::organization::{CreateOrganization, Organization};
use taskflow_shared::models::user::{CreateUser, Role, User};
use tower::ServiceExt;

/// Signing key shared by the test server and the tokens the tests issue
pub const SECRET: &str = "integration-test-secret-key-32-bytes-min";

/// Test context containing the database pool and the router under test
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a context against the database in `DATABASE_URL`
    ///
    /// Returns `None` when the variable is not set, so callers can skip.
    pub async fn new() -> Option<Self> {
        let url = std::env::var("DATABASE_URL").ok()?;

        let db = PgPool::connect(&url)
            .await
            .expect("Should connect to test database");

        // Path relative to the crate's Cargo.toml, not this file
        sqlx::migrate!("../migrations")
            .run(&db)
            .await
            .expect("Migrations should apply");

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: SECRET.to_string(),
            },
        };

        let state = AppState::new(db.clone(), config);
        Some(Self {
            db,
            app: build_router(state),
        })
    }

    /// Creates a fresh organization; each test gets its own for isolation
    pub async fn create_org(&self, name: &str) -> Organization {
        Organization::create(
            &self.db,
            CreateOrganization {
                name: format!("{} {}", name, unique_suffix()),
            },
        )
        .await
        .expect("Should create organization")
    }

    /// Creates a user in an organization and returns their bearer header
    ///
    /// The password hash is a placeholder; these tests authenticate with
    /// directly issued tokens, not the login flow.
    pub async fn create_user(&self, org_id: i64, role: Role) -> (User, String) {
        let user = User::create(
            &self.db,
            CreateUser {
                email: format!("user-{}@example.com", unique_suffix()),
                password_hash: "test-hash".to_string(),
                role,
                organization_id: org_id,
            },
        )
        .await
        .expect("Should create user");

        let token = jwt::issue(user.id, org_id, role, SECRET).expect("Should issue token");
        (user, format!("Bearer {}", token))
    }

    /// Sends a request through the router and returns status plus JSON body
    ///
    /// The body value is `Value::Null` for empty responses (e.g. 204).
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        auth: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, auth);

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }
}

/// Unique suffix for emails and names, so runs never collide
fn unique_suffix() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", nanos, n)
}
