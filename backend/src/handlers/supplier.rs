//! HTTP handlers for supplier endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::item::Item;
use crate::services::supplier::{
    CreateSupplierInput, Supplier, SupplierService, UpdateSupplierInput,
};
use crate::AppState;

/// List all suppliers
pub async fn list_suppliers(State(state): State<AppState>) -> AppResult<Json<Vec<Supplier>>> {
    let service = SupplierService::new(state.db);
    let suppliers = service.list().await?;
    Ok(Json(suppliers))
}

/// Get a supplier
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<i64>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service.get(supplier_id).await?;
    Ok(Json(supplier))
}

/// List the items sourced from a supplier
pub async fn get_supplier_items(
    State(state): State<AppState>,
    Path(supplier_id): Path<i64>,
) -> AppResult<Json<Vec<Item>>> {
    let service = SupplierService::new(state.db);
    let items = service.supplier_items(supplier_id).await?;
    Ok(Json(items))
}

/// Create a supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(input): Json<CreateSupplierInput>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service.create(input).await?;
    Ok(Json(supplier))
}

/// Update a supplier
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<i64>,
    Json(input): Json<UpdateSupplierInput>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service.update(supplier_id, input).await?;
    Ok(Json(supplier))
}

/// Soft-delete a supplier
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<i64>,
) -> AppResult<Json<()>> {
    let service = SupplierService::new(state.db);
    service.delete(supplier_id).await?;
    Ok(Json(()))
}
