//! HTTP handlers for order fulfillment endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::order::{
    CreateOrderInput, Order, OrderDetails, OrderLine, OrderService, UpdateOrderInput,
    UpdateOrderShipmentsInput, UpdateOrderStatusInput,
};
use crate::AppState;

/// List all orders
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Json<Vec<Order>>> {
    let service = OrderService::new(state.db);
    let orders = service.list().await?;
    Ok(Json(orders))
}

/// Get an order with its line items and linked shipments
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> AppResult<Json<OrderDetails>> {
    let service = OrderService::new(state.db);
    let order = service.get(order_id).await?;
    Ok(Json(order))
}

/// Get the line items of an order
pub async fn get_order_items(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> AppResult<Json<Vec<OrderLine>>> {
    let service = OrderService::new(state.db);
    let items = service.order_items(order_id).await?;
    Ok(Json(items))
}

/// Create an order, reserving stock for every line item
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderInput>,
) -> AppResult<Json<OrderDetails>> {
    let service = OrderService::new(state.db);
    let order = service.create_order(input).await?;
    Ok(Json(order))
}

/// Update order header fields
pub async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    Json(input): Json<UpdateOrderInput>,
) -> AppResult<Json<OrderDetails>> {
    let service = OrderService::new(state.db);
    let order = service.update_order(order_id, input).await?;
    Ok(Json(order))
}

/// Change the status of an order
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    Json(input): Json<UpdateOrderStatusInput>,
) -> AppResult<Json<OrderDetails>> {
    let service = OrderService::new(state.db);
    let order = service.update_order_status(order_id, input).await?;
    Ok(Json(order))
}

/// Replace the linked shipments of an order
pub async fn update_order_shipments(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    Json(input): Json<UpdateOrderShipmentsInput>,
) -> AppResult<Json<OrderDetails>> {
    let service = OrderService::new(state.db);
    let order = service.update_order_shipments(order_id, input).await?;
    Ok(Json(order))
}

/// Soft-delete an order
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> AppResult<Json<()>> {
    let service = OrderService::new(state.db);
    service.delete(order_id).await?;
    Ok(Json(()))
}
