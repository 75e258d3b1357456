/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with all
/// routes and middleware. The signing key and the list cache are plain
/// fields here — initialized once at startup, injected into the components
/// that need them, no module-level globals.
///
/// # Example
///
/// ```no_run
/// use taskflow_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskflow_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```
use crate::config::Config;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskflow_shared::auth::jwt;
use taskflow_shared::cache::ListCache;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Uses Arc
/// internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration (read-only after startup)
    pub config: Arc<Config>,

    /// Cache of task list queries, keyed by organization
    pub list_cache: Arc<ListCache>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
            list_cache: Arc::new(ListCache::default()),
        }
    }

    /// Gets the signing key for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /health              # Health check (public)
/// ├── POST /signup              # Create user (public)
/// ├── POST /login               # Exchange credentials for a token (public)
/// ├── POST /organizations       # Create organization (token, ADMIN)
/// └── /tasks                    # (token)
///     ├── GET    /              # List tasks (any role)
///     ├── POST   /              # Create task (ADMIN)
///     ├── PUT    /:id           # Update task status (ADMIN)
///     └── DELETE /:id           # Delete task (ADMIN)
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Bearer-token authentication on the routes that need it
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes: no token required
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/signup", post(routes::auth::signup))
        .route("/login", post(routes::auth::login));

    // Organization creation requires an authenticated admin
    let org_routes = Router::new()
        .route("/organizations", post(routes::organizations::create_organization))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    // Task routes: token required; role enforcement happens per-handler
    // through the policy engine
    let task_routes = Router::new()
        .route("/tasks", get(routes::tasks::list_tasks))
        .route("/tasks", post(routes::tasks::create_task))
        .route("/tasks/:id", put(routes::tasks::update_task))
        .route("/tasks/:id", delete(routes::tasks::delete_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    Router::new()
        .merge(public_routes)
        .merge(org_routes)
        .merge(task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bearer-token authentication middleware
///
/// Extracts the `Authorization: Bearer` header, verifies the token, and
/// injects the recovered [`jwt::Identity`] into request extensions. A
/// missing header and a failed verification both produce the same 401, per
/// the no-information-leakage contract.
async fn bearer_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let token = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("Invalid or expired token".to_string())
        })?;

    let identity = jwt::verify(token, state.jwt_secret())?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
