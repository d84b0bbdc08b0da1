//! HTTP handlers for warehouse endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::dock::{Dock, DockService};
use crate::services::location::{Location, LocationService};
use crate::services::warehouse::{
    CreateWarehouseInput, UpdateWarehouseInput, Warehouse, WarehouseService,
};
use crate::AppState;

/// List all warehouses
pub async fn list_warehouses(State(state): State<AppState>) -> AppResult<Json<Vec<Warehouse>>> {
    let service = WarehouseService::new(state.db);
    let warehouses = service.list().await?;
    Ok(Json(warehouses))
}

/// Get a warehouse
pub async fn get_warehouse(
    State(state): State<AppState>,
    Path(warehouse_id): Path<i64>,
) -> AppResult<Json<Warehouse>> {
    let service = WarehouseService::new(state.db);
    let warehouse = service.get(warehouse_id).await?;
    Ok(Json(warehouse))
}

/// List the locations of a warehouse
pub async fn get_warehouse_locations(
    State(state): State<AppState>,
    Path(warehouse_id): Path<i64>,
) -> AppResult<Json<Vec<Location>>> {
    let service = LocationService::new(state.db);
    let locations = service.list_for_warehouse(warehouse_id).await?;
    Ok(Json(locations))
}

/// List the docks of a warehouse
pub async fn get_warehouse_docks(
    State(state): State<AppState>,
    Path(warehouse_id): Path<i64>,
) -> AppResult<Json<Vec<Dock>>> {
    let service = DockService::new(state.db);
    let docks = service.list_for_warehouse(warehouse_id).await?;
    Ok(Json(docks))
}

/// Create a warehouse
pub async fn create_warehouse(
    State(state): State<AppState>,
    Json(input): Json<CreateWarehouseInput>,
) -> AppResult<Json<Warehouse>> {
    let service = WarehouseService::new(state.db);
    let warehouse = service.create(input).await?;
    Ok(Json(warehouse))
}

/// Update a warehouse
pub async fn update_warehouse(
    State(state): State<AppState>,
    Path(warehouse_id): Path<i64>,
    Json(input): Json<UpdateWarehouseInput>,
) -> AppResult<Json<Warehouse>> {
    let service = WarehouseService::new(state.db);
    let warehouse = service.update(warehouse_id, input).await?;
    Ok(Json(warehouse))
}

/// Soft-delete a warehouse
pub async fn delete_warehouse(
    State(state): State<AppState>,
    Path(warehouse_id): Path<i64>,
) -> AppResult<Json<()>> {
    let service = WarehouseService::new(state.db);
    service.delete(warehouse_id).await?;
    Ok(Json(()))
}
