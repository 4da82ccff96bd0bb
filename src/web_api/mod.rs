//! WebAPI - REST API Endpoints
//!
//! ## Responsibilities
//!
//! - HTTP API routes
//! - Request validation
//! - Response formatting
//!
//! Handlers are thin: deserialize, freeze the current catalog generation,
//! call the pure engine, wrap the return value.

mod routes;

pub use routes::create_router;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::models::HealthResponse;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog_store.current().await;
    let summary = catalog.summary();

    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_loaded: !catalog.is_empty(),
        cameras: summary.cameras,
        recorders: summary.recorders,
        switches: summary.switches,
    };

    Json(response)
}

/// Status endpoint (araneaDevices common)
pub async fn device_status(State(_state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "device_type": "ar-is24",
        "firmware_version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
