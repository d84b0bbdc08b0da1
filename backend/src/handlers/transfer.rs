//! HTTP handlers for transfer endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::transfer::{
    CreateTransferInput, Transfer, TransferDetails, TransferService, UpdateTransferInput,
};
use crate::AppState;

/// List all transfers
pub async fn list_transfers(State(state): State<AppState>) -> AppResult<Json<Vec<Transfer>>> {
    let service = TransferService::new(state.db);
    let transfers = service.list().await?;
    Ok(Json(transfers))
}

/// Get a transfer with its line items
pub async fn get_transfer(
    State(state): State<AppState>,
    Path(transfer_id): Path<i64>,
) -> AppResult<Json<TransferDetails>> {
    let service = TransferService::new(state.db);
    let transfer = service.get(transfer_id).await?;
    Ok(Json(transfer))
}

/// Create a transfer
pub async fn create_transfer(
    State(state): State<AppState>,
    Json(input): Json<CreateTransferInput>,
) -> AppResult<Json<TransferDetails>> {
    let service = TransferService::new(state.db);
    let transfer = service.create(input).await?;
    Ok(Json(transfer))
}

/// Update a transfer
pub async fn update_transfer(
    State(state): State<AppState>,
    Path(transfer_id): Path<i64>,
    Json(input): Json<UpdateTransferInput>,
) -> AppResult<Json<TransferDetails>> {
    let service = TransferService::new(state.db);
    let transfer = service.update(transfer_id, input).await?;
    Ok(Json(transfer))
}

/// Soft-delete a transfer
pub async fn delete_transfer(
    State(state): State<AppState>,
    Path(transfer_id): Path<i64>,
) -> AppResult<Json<()>> {
    let service = TransferService::new(state.db);
    service.delete(transfer_id).await?;
    Ok(Json(()))
}
