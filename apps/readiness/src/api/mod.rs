//! # Readiness HTTP API Module
//!
//! This module implements the JSON API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /work-packages` - All work packages with readiness (`?status=ready|partial|blocked`)
//! - `GET /work-packages/{key}` - One work package by id or name
//! - `GET /cards` - Card view data
//! - `GET /timeline` - Timeline view data
//! - `GET /summary` - Executive traffic-light summary
//! - `POST /reload` - Reload the work package document
//!
//! ## Security Configuration
//!
//! - `[server] cors_origins` / `READINESS_CORS_ORIGINS`: allowed origins, or "*" (default: localhost only)
//! - `[server] rate_limit` / `READINESS_RATE_LIMIT`: requests per second (0 disables)
//! - `READINESS_API_KEY`: if set, requires Bearer token authentication

mod auth;
mod handlers;
mod middleware;
mod types;

pub use auth::{API_KEY_ENV, ApiKey};
pub use middleware::create_rate_limiter;
pub use handlers::{
    cards_handler, health_handler, list_handler, package_handler, reload_handler,
    summary_handler, timeline_handler,
};
pub use types::{
    ErrorResponse, HealthResponse, ListQuery, ReloadResponse, WorkPackageListResponse,
};

use crate::config::ServerConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use readiness_core::{Dashboard, ReadinessError};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    /// The current dashboard; replaced wholesale on reload.
    pub dashboard: Arc<RwLock<Dashboard>>,
    /// Document to reload from. `None` disables `/reload`.
    pub data_path: Option<Arc<PathBuf>>,
}

impl AppState {
    /// Create state around an assessed dashboard.
    #[must_use]
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard: Arc::new(RwLock::new(dashboard)),
            data_path: None,
        }
    }

    /// Enable `/reload` from `path`.
    #[must_use]
    pub fn with_data_path(mut self, path: PathBuf) -> Self {
        self.data_path = Some(Arc::new(path));
        self
    }
}

/// Router-level settings: protection layers.
#[derive(Debug, Clone, Default)]
pub struct ServerSettings {
    /// Requests per second; 0 disables rate limiting.
    pub rate_limit: u32,
    pub api_key: Option<ApiKey>,
    pub cors_origins: Vec<String>,
}

impl ServerSettings {
    /// Settings from configuration plus `READINESS_API_KEY`.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            rate_limit: config.rate_limit,
            api_key: ApiKey::from_env(),
            cors_origins: config.cors_origins.clone(),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer.
///
/// - `["*"]`: allows all origins (development only)
/// - empty: localhost only
/// - otherwise: the listed origins; invalid entries are skipped
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(hv) => {
                tracing::info!("CORS: Allowing origin: {}", origin);
                Some(hv)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    let allowed = if allowed.is_empty() {
        tracing::info!("CORS: No valid origins configured, defaulting to localhost only");
        [
            "http://localhost:3000",
            "http://localhost:8080",
            "http://127.0.0.1:3000",
            "http://127.0.0.1:8080",
        ]
        .iter()
        .filter_map(|o| o.parse::<HeaderValue>().ok())
        .collect()
    } else {
        allowed
    };

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Rate Limiting (if enabled)
/// 4. Authentication (if a key is configured)
pub fn create_router(state: AppState, settings: &ServerSettings) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/work-packages", get(handlers::list_handler))
        .route("/work-packages/{key}", get(handlers::package_handler))
        .route("/cards", get(handlers::cards_handler))
        .route("/timeline", get(handlers::timeline_handler))
        .route("/summary", get(handlers::summary_handler))
        .route("/reload", post(handlers::reload_handler));

    match &settings.api_key {
        Some(key) => {
            tracing::info!("API key authentication enabled");
            router = router.layer(axum_middleware::from_fn_with_state(
                key.clone(),
                auth::api_key_auth_middleware,
            ));
        }
        None => tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible. \
             Set {} to enable authentication.",
            API_KEY_ENV
        ),
    }

    match create_rate_limiter(settings.rate_limit) {
        Some(limiter) => {
            tracing::info!("Rate limiting enabled: {} requests/second", settings.rate_limit);
            router = router.layer(axum_middleware::from_fn_with_state(
                limiter,
                middleware::rate_limit_middleware,
            ));
        }
        None => tracing::info!("Rate limiting disabled"),
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(64 * 1024))
        .layer(build_cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(
    addr: &str,
    state: AppState,
    settings: &ServerSettings,
) -> Result<(), ReadinessError> {
    let router = create_router(state, settings);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ReadinessError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Readiness HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ReadinessError::IoError(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
