//! API Routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::catalog_store::CatalogSnapshot;
use crate::models::ApiResponse;
use crate::plan_service::{self, Block, PlanRequest};
use crate::state::AppState;

/// Create API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health & Status
        .route("/healthz", get(super::health_check))
        .route("/api/status", get(super::device_status))
        // Catalog
        .route("/api/catalog", get(catalog_summary))
        .route("/api/catalog/cameras", get(list_cameras))
        .route("/api/catalog/cameras/:id", get(get_camera))
        .route("/api/catalog/cameras/:id/accessories", get(camera_accessories))
        .route("/api/catalog/recorders", get(list_recorders))
        .route("/api/catalog/drives", get(list_drives))
        .route("/api/catalog/switches", get(list_switches))
        .route("/api/catalog/reload", post(reload_catalog))
        .route("/api/catalog/snapshot", get(export_snapshot))
        .route("/api/catalog/snapshot", post(import_snapshot))
        // Plan computation
        .route("/api/plan/compute", post(compute_plan))
        .route("/api/plan/accessories", post(resolve_block_accessories))
        .with_state(state)
}

// ========================================
// Catalog Handlers
// ========================================

async fn catalog_summary(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog_store.current().await;
    Json(ApiResponse::success(catalog.summary()))
}

async fn list_cameras(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog_store.current().await;
    Json(ApiResponse::success(catalog.cameras.clone()))
}

async fn get_camera(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let catalog = state.catalog_store.current().await;
    match catalog.camera(&id) {
        Some(camera) => Json(ApiResponse::success(camera.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Not found"})),
        )
            .into_response(),
    }
}

/// Compatible mounting accessories for a camera. An unmapped camera is a
/// normal empty list, not a 404.
async fn camera_accessories(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let catalog = state.catalog_store.current().await;
    Json(ApiResponse::success(catalog.variants_for(&id).to_vec()))
}

async fn list_recorders(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog_store.current().await;
    Json(ApiResponse::success(catalog.recorders.clone()))
}

async fn list_drives(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog_store.current().await;
    Json(ApiResponse::success(catalog.drives.clone()))
}

async fn list_switches(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog_store.current().await;
    Json(ApiResponse::success(catalog.switches.clone()))
}

async fn reload_catalog(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog_store.reload().await {
        Ok(summary) => Json(ApiResponse::success(summary)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn export_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.catalog_store.export_snapshot().await;
    Json(ApiResponse::success(snapshot))
}

async fn import_snapshot(
    State(state): State<AppState>,
    Json(snapshot): Json<CatalogSnapshot>,
) -> impl IntoResponse {
    match state.catalog_store.import_snapshot(snapshot).await {
        Ok(summary) => Json(ApiResponse::success(summary)).into_response(),
        Err(e) => e.into_response(),
    }
}

// ========================================
// Plan Handlers
// ========================================

async fn compute_plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> impl IntoResponse {
    let catalog = state.catalog_store.current().await;
    match plan_service::compute_plan(&request, &catalog) {
        Ok(plan) => Json(ApiResponse::success(plan)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Resolve accessories for a single block (wizard step preview)
async fn resolve_block_accessories(
    State(state): State<AppState>,
    Json(block): Json<Block>,
) -> impl IntoResponse {
    let catalog = state.catalog_store.current().await;
    let camera_id = block.selected_camera_id.clone().unwrap_or_default();
    let lines =
        crate::accessory_resolver::resolve_accessories(&block, catalog.variants_for(&camera_id));
    Json(ApiResponse::success(lines))
}
