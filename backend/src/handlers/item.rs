//! HTTP handlers for item catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::inventory::{InventoryRecord, InventoryService};
use crate::services::item::{CreateItemInput, Item, ItemService, UpdateItemInput};
use crate::AppState;

/// List all items
pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<Vec<Item>>> {
    let service = ItemService::new(state.db);
    let items = service.list().await?;
    Ok(Json(items))
}

/// Get an item
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> AppResult<Json<Item>> {
    let service = ItemService::new(state.db);
    let item = service.get(item_id).await?;
    Ok(Json(item))
}

/// Get the inventory record backing an item
pub async fn get_item_inventory(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> AppResult<Json<InventoryRecord>> {
    let items = ItemService::new(state.db.clone());
    let item = items.get(item_id).await?;

    let inventories = InventoryService::new(state.db);
    let record = inventories.get_by_item_reference(&item.reference).await?;
    Ok(Json(record))
}

/// Create an item and its inventory record
pub async fn create_item(
    State(state): State<AppState>,
    Json(input): Json<CreateItemInput>,
) -> AppResult<Json<Item>> {
    let service = ItemService::new(state.db);
    let item = service.create(input).await?;
    Ok(Json(item))
}

/// Update an item
pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    Json(input): Json<UpdateItemInput>,
) -> AppResult<Json<Item>> {
    let service = ItemService::new(state.db);
    let item = service.update(item_id, input).await?;
    Ok(Json(item))
}

/// Soft-delete an item
pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> AppResult<Json<()>> {
    let service = ItemService::new(state.db);
    service.delete(item_id).await?;
    Ok(Json(()))
}
