//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{ErrorResponse, HealthResponse, ListQuery, ReloadResponse, WorkPackageListResponse},
};
use crate::loader;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// WORK PACKAGE HANDLERS
// =============================================================================

/// List work packages with readiness, optionally filtered by `?status=`.
pub async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let filter = match query.status_filter() {
        Ok(filter) => filter,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e))).into_response();
        }
    };

    let dashboard = state.dashboard.read().await;
    let response = WorkPackageListResponse::new(dashboard.filtered(filter));
    (StatusCode::OK, Json(response)).into_response()
}

/// Get one work package by id or name.
pub async fn package_handler(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    let dashboard = state.dashboard.read().await;
    match dashboard.find(&key) {
        Ok(assessed) => (StatusCode::OK, Json(assessed)).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, Json(ErrorResponse::new(e.to_string()))).into_response(),
    }
}

// =============================================================================
// VIEW HANDLERS
// =============================================================================

/// Card view data.
pub async fn cards_handler(State(state): State<AppState>) -> impl IntoResponse {
    let dashboard = state.dashboard.read().await;
    (StatusCode::OK, Json(dashboard.cards()))
}

/// Timeline view data.
pub async fn timeline_handler(State(state): State<AppState>) -> impl IntoResponse {
    let dashboard = state.dashboard.read().await;
    (StatusCode::OK, Json(dashboard.timeline()))
}

/// Executive traffic-light summary.
pub async fn summary_handler(State(state): State<AppState>) -> impl IntoResponse {
    let dashboard = state.dashboard.read().await;
    (StatusCode::OK, Json(dashboard.executive_summary()))
}

// =============================================================================
// RELOAD HANDLER
// =============================================================================

/// Reload the work package document and swap in a fresh dashboard.
///
/// On failure the current dashboard stays in place.
pub async fn reload_handler(State(state): State<AppState>) -> impl IntoResponse {
    let Some(path) = state.data_path.clone() else {
        return (
            StatusCode::CONFLICT,
            Json(ReloadResponse::error("No data path configured")),
        );
    };

    // Load outside the lock so readers are not blocked on I/O.
    match loader::load_dashboard(&path).await {
        Ok(fresh) => {
            let count = fresh.len();
            *state.dashboard.write().await = fresh;
            tracing::info!("Dashboard reloaded: {} work packages", count);
            (StatusCode::OK, Json(ReloadResponse::success(count)))
        }
        Err(e) => {
            tracing::error!("Reload failed: {}", e);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ReloadResponse::error(format!("Reload failed: {}", e))),
            )
        }
    }
}
