//! HTTP handlers for shipment endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::shipment::{
    CreateShipmentInput, Shipment, ShipmentDetails, ShipmentLine, ShipmentService,
    UpdateShipmentInput,
};
use crate::AppState;

/// List all shipments
pub async fn list_shipments(State(state): State<AppState>) -> AppResult<Json<Vec<Shipment>>> {
    let service = ShipmentService::new(state.db);
    let shipments = service.list().await?;
    Ok(Json(shipments))
}

/// Get a shipment with its line items
pub async fn get_shipment(
    State(state): State<AppState>,
    Path(shipment_id): Path<i64>,
) -> AppResult<Json<ShipmentDetails>> {
    let service = ShipmentService::new(state.db);
    let shipment = service.get(shipment_id).await?;
    Ok(Json(shipment))
}

/// Get the line items of a shipment
pub async fn get_shipment_items(
    State(state): State<AppState>,
    Path(shipment_id): Path<i64>,
) -> AppResult<Json<Vec<ShipmentLine>>> {
    let service = ShipmentService::new(state.db);
    let items = service.shipment_items(shipment_id).await?;
    Ok(Json(items))
}

/// Create a shipment
pub async fn create_shipment(
    State(state): State<AppState>,
    Json(input): Json<CreateShipmentInput>,
) -> AppResult<Json<ShipmentDetails>> {
    let service = ShipmentService::new(state.db);
    let shipment = service.create(input).await?;
    Ok(Json(shipment))
}

/// Update a shipment
pub async fn update_shipment(
    State(state): State<AppState>,
    Path(shipment_id): Path<i64>,
    Json(input): Json<UpdateShipmentInput>,
) -> AppResult<Json<ShipmentDetails>> {
    let service = ShipmentService::new(state.db);
    let shipment = service.update(shipment_id, input).await?;
    Ok(Json(shipment))
}

/// Soft-delete a shipment
pub async fn delete_shipment(
    State(state): State<AppState>,
    Path(shipment_id): Path<i64>,
) -> AppResult<Json<()>> {
    let service = ShipmentService::new(state.db);
    service.delete(shipment_id).await?;
    Ok(Json(()))
}
