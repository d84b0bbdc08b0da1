//! HTTP handlers for location endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::location::{
    CreateLocationInput, Location, LocationService, UpdateLocationInput,
};
use crate::AppState;

/// List all locations
pub async fn list_locations(State(state): State<AppState>) -> AppResult<Json<Vec<Location>>> {
    let service = LocationService::new(state.db);
    let locations = service.list().await?;
    Ok(Json(locations))
}

/// Get a location
pub async fn get_location(
    State(state): State<AppState>,
    Path(location_id): Path<i64>,
) -> AppResult<Json<Location>> {
    let service = LocationService::new(state.db);
    let location = service.get(location_id).await?;
    Ok(Json(location))
}

/// Create a location
pub async fn create_location(
    State(state): State<AppState>,
    Json(input): Json<CreateLocationInput>,
) -> AppResult<Json<Location>> {
    let service = LocationService::new(state.db);
    let location = service.create(input).await?;
    Ok(Json(location))
}

/// Update a location
pub async fn update_location(
    State(state): State<AppState>,
    Path(location_id): Path<i64>,
    Json(input): Json<UpdateLocationInput>,
) -> AppResult<Json<Location>> {
    let service = LocationService::new(state.db);
    let location = service.update(location_id, input).await?;
    Ok(Json(location))
}

/// Soft-delete a location
pub async fn delete_location(
    State(state): State<AppState>,
    Path(location_id): Path<i64>,
) -> AppResult<Json<()>> {
    let service = LocationService::new(state.db);
    service.delete(location_id).await?;
    Ok(Json(()))
}
