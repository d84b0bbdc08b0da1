//! Route definitions for the Warehouse Management Platform

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    // Everything except the health check sits behind the API key gate
    let protected = Router::new()
        // Warehouse management
        .nest("/warehouses", warehouse_routes())
        // Location management
        .nest("/locations", location_routes())
        // Item catalog
        .nest("/items", item_routes())
        // Inventory ledger
        .nest("/inventories", inventory_routes())
        // Order fulfillment
        .nest("/orders", order_routes())
        // Shipment management
        .nest("/shipments", shipment_routes())
        // Supplier management
        .nest("/suppliers", supplier_routes())
        // Transfer management
        .nest("/transfers", transfer_routes())
        // Dock management
        .nest("/docks", dock_routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        .merge(protected)
}

/// Warehouse routes
fn warehouse_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_warehouses).post(handlers::create_warehouse),
        )
        .route(
            "/:warehouse_id",
            get(handlers::get_warehouse)
                .put(handlers::update_warehouse)
                .delete(handlers::delete_warehouse),
        )
        .route("/:warehouse_id/locations", get(handlers::get_warehouse_locations))
        .route("/:warehouse_id/docks", get(handlers::get_warehouse_docks))
}

/// Location routes
fn location_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_locations).post(handlers::create_location),
        )
        .route(
            "/:location_id",
            get(handlers::get_location)
                .put(handlers::update_location)
                .delete(handlers::delete_location),
        )
}

/// Item catalog routes
fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_items).post(handlers::create_item))
        .route(
            "/:item_id",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        .route("/:item_id/inventory", get(handlers::get_item_inventory))
}

/// Inventory ledger routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_inventories).post(handlers::create_inventory),
        )
        .route(
            "/:inventory_id",
            get(handlers::get_inventory).delete(handlers::delete_inventory),
        )
        .route("/:inventory_id/receive", post(handlers::receive_stock))
}

/// Order fulfillment routes
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_orders).post(handlers::create_order))
        .route(
            "/:order_id",
            get(handlers::get_order)
                .put(handlers::update_order)
                .delete(handlers::delete_order),
        )
        .route("/:order_id/items", get(handlers::get_order_items))
        .route("/:order_id/status", put(handlers::update_order_status))
        .route("/:order_id/shipments", put(handlers::update_order_shipments))
}

/// Shipment routes
fn shipment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_shipments).post(handlers::create_shipment),
        )
        .route(
            "/:shipment_id",
            get(handlers::get_shipment)
                .put(handlers::update_shipment)
                .delete(handlers::delete_shipment),
        )
        .route("/:shipment_id/items", get(handlers::get_shipment_items))
}

/// Supplier routes
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route(
            "/:supplier_id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
        .route("/:supplier_id/items", get(handlers::get_supplier_items))
}

/// Transfer routes
fn transfer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_transfers).post(handlers::create_transfer),
        )
        .route(
            "/:transfer_id",
            get(handlers::get_transfer)
                .put(handlers::update_transfer)
                .delete(handlers::delete_transfer),
        )
}

/// Dock routes
fn dock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_docks).post(handlers::create_dock))
        .route(
            "/:dock_id",
            get(handlers::get_dock)
                .put(handlers::update_dock)
                .delete(handlers::delete_dock),
        )
}
