//! HTTP handlers for dock endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::dock::{CreateDockInput, Dock, DockService, UpdateDockInput};
use crate::AppState;

/// List all docks
pub async fn list_docks(State(state): State<AppState>) -> AppResult<Json<Vec<Dock>>> {
    let service = DockService::new(state.db);
    let docks = service.list().await?;
    Ok(Json(docks))
}

/// Get a dock
pub async fn get_dock(
    State(state): State<AppState>,
    Path(dock_id): Path<i64>,
) -> AppResult<Json<Dock>> {
    let service = DockService::new(state.db);
    let dock = service.get(dock_id).await?;
    Ok(Json(dock))
}

/// Create a dock
pub async fn create_dock(
    State(state): State<AppState>,
    Json(input): Json<CreateDockInput>,
) -> AppResult<Json<Dock>> {
    let service = DockService::new(state.db);
    let dock = service.create(input).await?;
    Ok(Json(dock))
}

/// Update a dock
pub async fn update_dock(
    State(state): State<AppState>,
    Path(dock_id): Path<i64>,
    Json(input): Json<UpdateDockInput>,
) -> AppResult<Json<Dock>> {
    let service = DockService::new(state.db);
    let dock = service.update(dock_id, input).await?;
    Ok(Json(dock))
}

/// Soft-delete a dock
pub async fn delete_dock(
    State(state): State<AppState>,
    Path(dock_id): Path<i64>,
) -> AppResult<Json<()>> {
    let service = DockService::new(state.db);
    service.delete(dock_id).await?;
    Ok(Json(()))
}
