//! HTTP handlers for inventory endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::inventory::{
    CreateInventoryInput, InventoryRecord, InventoryService, ReceiveStockInput,
};
use crate::AppState;

/// List all inventory records
pub async fn list_inventories(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<InventoryRecord>>> {
    let service = InventoryService::new(state.db);
    let records = service.list().await?;
    Ok(Json(records))
}

/// Get an inventory record
pub async fn get_inventory(
    State(state): State<AppState>,
    Path(inventory_id): Path<i64>,
) -> AppResult<Json<InventoryRecord>> {
    let service = InventoryService::new(state.db);
    let record = service.get(inventory_id).await?;
    Ok(Json(record))
}

/// Create an inventory record for an existing item
pub async fn create_inventory(
    State(state): State<AppState>,
    Json(input): Json<CreateInventoryInput>,
) -> AppResult<Json<InventoryRecord>> {
    let service = InventoryService::new(state.db);
    let record = service.create(input).await?;
    Ok(Json(record))
}

/// Receive stock into an inventory record
pub async fn receive_stock(
    State(state): State<AppState>,
    Path(inventory_id): Path<i64>,
    Json(input): Json<ReceiveStockInput>,
) -> AppResult<Json<InventoryRecord>> {
    let service = InventoryService::new(state.db);
    let record = service.receive_stock(inventory_id, input).await?;
    Ok(Json(record))
}

/// Soft-delete an inventory record
pub async fn delete_inventory(
    State(state): State<AppState>,
    Path(inventory_id): Path<i64>,
) -> AppResult<Json<()>> {
    let service = InventoryService::new(state.db);
    service.delete(inventory_id).await?;
    Ok(Json(()))
}
