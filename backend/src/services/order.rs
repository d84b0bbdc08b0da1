//! Order fulfillment service
//!
//! Sequences order creation: stock availability checks, shipment link
//! validation, stock reservation, and order persistence run inside one
//! transaction, so no order exists with unreserved stock and no stock stays
//! reserved for an order that failed to persist. Status changes go through
//! the lifecycle rules in the shared crate; partial updates go through an
//! explicit merge of the mutable fields, never a blind patch.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};

use crate::error::{AppError, AppResult};
use crate::models::{
    validate_order_link, validate_transition, OrderStatus, ShipmentStatus, ShipmentType,
};
use crate::services::inventory::InventoryService;

/// Order service for the fulfillment workflow
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
}

/// Order record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub reference: String,
    pub source_id: i64,
    pub order_date: DateTime<Utc>,
    pub request_date: Option<DateTime<Utc>>,
    pub order_status: String,
    pub warehouse_id: i64,
    pub ship_to: Option<i64>,
    pub bill_to: Option<i64>,
    pub notes: Option<String>,
    pub shipping_notes: Option<String>,
    pub picking_notes: Option<String>,
    pub total_amount: Decimal,
    pub total_discount: Option<Decimal>,
    pub total_tax: Option<Decimal>,
    pub total_surcharge: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// Order line item
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderLine {
    pub item_id: String,
    pub amount: i64,
}

/// Order with its line items and linked shipments
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderLine>,
    pub shipment_id: Vec<i64>,
}

/// Line item on an incoming order request
#[derive(Debug, Deserialize)]
pub struct OrderLineInput {
    pub item_id: String,
    pub amount: i64,
}

/// Input for creating an order
#[derive(Debug, Deserialize)]
pub struct CreateOrderInput {
    pub source_id: i64,
    pub order_date: DateTime<Utc>,
    pub request_date: Option<DateTime<Utc>>,
    pub reference: String,
    pub order_status: OrderStatus,
    pub warehouse_id: i64,
    pub ship_to: Option<i64>,
    pub bill_to: Option<i64>,
    pub notes: Option<String>,
    pub shipping_notes: Option<String>,
    pub picking_notes: Option<String>,
    #[serde(default)]
    pub shipment_id: Vec<i64>,
    pub items: Vec<OrderLineInput>,
    pub total_amount: Decimal,
    pub total_discount: Option<Decimal>,
    pub total_tax: Option<Decimal>,
    pub total_surcharge: Option<Decimal>,
}

/// Input for updating order header fields
#[derive(Debug, Deserialize)]
pub struct UpdateOrderInput {
    pub source_id: Option<i64>,
    pub order_date: Option<DateTime<Utc>>,
    pub request_date: Option<DateTime<Utc>>,
    pub warehouse_id: Option<i64>,
    pub ship_to: Option<i64>,
    pub bill_to: Option<i64>,
    pub notes: Option<String>,
    pub shipping_notes: Option<String>,
    pub picking_notes: Option<String>,
    pub total_amount: Option<Decimal>,
    pub total_discount: Option<Decimal>,
    pub total_tax: Option<Decimal>,
    pub total_surcharge: Option<Decimal>,
}

/// Input for changing order status
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusInput {
    pub order_status: OrderStatus,
}

/// Input for replacing the linked shipments of an order
#[derive(Debug, Deserialize)]
pub struct UpdateOrderShipmentsInput {
    pub shipment_id: Vec<i64>,
}

impl OrderService {
    /// Create a new OrderService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all orders
    pub async fn list(&self) -> AppResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, reference, source_id, order_date, request_date, order_status,
                   warehouse_id, ship_to, bill_to, notes, shipping_notes, picking_notes,
                   total_amount, total_discount, total_tax, total_surcharge,
                   created_at, updated_at, is_deleted
            FROM orders
            WHERE is_deleted = FALSE
            ORDER BY order_date DESC, id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(orders)
    }

    /// Get an order with its line items and linked shipments
    pub async fn get(&self, order_id: i64) -> AppResult<OrderDetails> {
        let order = self.load_order(order_id).await?;
        self.with_details(order).await
    }

    /// Get the line items of an order
    pub async fn order_items(&self, order_id: i64) -> AppResult<Vec<OrderLine>> {
        // Ensure the order exists before reading its lines
        self.load_order(order_id).await?;

        let items = sqlx::query_as::<_, OrderLine>(
            "SELECT item_reference AS item_id, amount FROM order_items \
             WHERE order_id = $1 ORDER BY line_no",
        )
        .bind(order_id)
        .fetch_all(&self.db)
        .await?;

        Ok(items)
    }

    /// Create an order: validate stock for every line, validate every
    /// shipment link, then reserve and persist atomically.
    pub async fn create_order(&self, input: CreateOrderInput) -> AppResult<OrderDetails> {
        shared::validate_order_reference(&input.reference).map_err(|msg| {
            AppError::Validation {
                field: "reference".to_string(),
                message: msg.to_string(),
            }
        })?;

        if input.items.is_empty() {
            return Err(AppError::Validation {
                field: "items".to_string(),
                message: "Order must contain at least one line item".to_string(),
            });
        }

        for line in &input.items {
            shared::validate_item_reference(&line.item_id).map_err(|msg| {
                AppError::Validation {
                    field: "items".to_string(),
                    message: msg.to_string(),
                }
            })?;

            if line.amount <= 0 {
                return Err(AppError::Validation {
                    field: "items".to_string(),
                    message: "Line item amount must be positive".to_string(),
                });
            }
        }

        let warehouse_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM warehouses WHERE id = $1 AND is_deleted = FALSE)",
        )
        .bind(input.warehouse_id)
        .fetch_one(&self.db)
        .await?;

        if !warehouse_exists {
            return Err(AppError::NotFound("Warehouse".to_string()));
        }

        let reference_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM orders WHERE reference = $1)",
        )
        .bind(&input.reference)
        .fetch_one(&self.db)
        .await?;

        if reference_taken {
            return Err(AppError::DuplicateEntry("reference".to_string()));
        }

        let mut tx = self.db.begin().await?;

        // Availability checks first; each one locks the item's counter row
        // for the rest of the transaction. The first shortfall aborts before
        // anything is written.
        for line in &input.items {
            InventoryService::check_availability(&mut *tx, &line.item_id, line.amount).await?;
        }

        for shipment_id in &input.shipment_id {
            Self::validate_shipment_link(&mut *tx, *shipment_id).await?;
        }

        for line in &input.items {
            InventoryService::reserve(&mut *tx, &line.item_id, line.amount).await?;
        }

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (reference, source_id, order_date, request_date, order_status,
                                warehouse_id, ship_to, bill_to, notes, shipping_notes,
                                picking_notes, total_amount, total_discount, total_tax,
                                total_surcharge)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id, reference, source_id, order_date, request_date, order_status,
                      warehouse_id, ship_to, bill_to, notes, shipping_notes, picking_notes,
                      total_amount, total_discount, total_tax, total_surcharge,
                      created_at, updated_at, is_deleted
            "#,
        )
        .bind(&input.reference)
        .bind(input.source_id)
        .bind(input.order_date)
        .bind(input.request_date)
        .bind(input.order_status.as_str())
        .bind(input.warehouse_id)
        .bind(input.ship_to)
        .bind(input.bill_to)
        .bind(&input.notes)
        .bind(&input.shipping_notes)
        .bind(&input.picking_notes)
        .bind(input.total_amount)
        .bind(input.total_discount)
        .bind(input.total_tax)
        .bind(input.total_surcharge)
        .fetch_one(&mut *tx)
        .await?;

        for (line_no, line) in input.items.iter().enumerate() {
            sqlx::query(
                "INSERT INTO order_items (order_id, line_no, item_reference, amount) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(order.id)
            .bind(line_no as i32)
            .bind(&line.item_id)
            .bind(line.amount)
            .execute(&mut *tx)
            .await?;
        }

        for shipment_id in &input.shipment_id {
            sqlx::query(
                "INSERT INTO order_shipments (order_id, shipment_id) VALUES ($1, $2)",
            )
            .bind(order.id)
            .bind(shipment_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(order_id = order.id, reference = %order.reference, "Order created");

        self.with_details(order).await
    }

    /// Update order header fields through an explicit merge.
    ///
    /// The reference and status are not touched here: the reference is the
    /// immutable business key, status changes go through
    /// `update_order_status`.
    pub async fn update_order(
        &self,
        order_id: i64,
        input: UpdateOrderInput,
    ) -> AppResult<OrderDetails> {
        let existing = self.load_order(order_id).await?;

        if let Some(warehouse_id) = input.warehouse_id {
            let warehouse_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM warehouses WHERE id = $1 AND is_deleted = FALSE)",
            )
            .bind(warehouse_id)
            .fetch_one(&self.db)
            .await?;

            if !warehouse_exists {
                return Err(AppError::NotFound("Warehouse".to_string()));
            }
        }

        let merged = merge_order_update(existing, input);

        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET source_id = $1, order_date = $2, request_date = $3, warehouse_id = $4,
                ship_to = $5, bill_to = $6, notes = $7, shipping_notes = $8,
                picking_notes = $9, total_amount = $10, total_discount = $11,
                total_tax = $12, total_surcharge = $13, updated_at = NOW()
            WHERE id = $14
            RETURNING id, reference, source_id, order_date, request_date, order_status,
                      warehouse_id, ship_to, bill_to, notes, shipping_notes, picking_notes,
                      total_amount, total_discount, total_tax, total_surcharge,
                      created_at, updated_at, is_deleted
            "#,
        )
        .bind(merged.source_id)
        .bind(merged.order_date)
        .bind(merged.request_date)
        .bind(merged.warehouse_id)
        .bind(merged.ship_to)
        .bind(merged.bill_to)
        .bind(&merged.notes)
        .bind(&merged.shipping_notes)
        .bind(&merged.picking_notes)
        .bind(merged.total_amount)
        .bind(merged.total_discount)
        .bind(merged.total_tax)
        .bind(merged.total_surcharge)
        .bind(order_id)
        .fetch_one(&self.db)
        .await?;

        self.with_details(order).await
    }

    /// Change the status of an order, enforcing the lifecycle rules
    pub async fn update_order_status(
        &self,
        order_id: i64,
        input: UpdateOrderStatusInput,
    ) -> AppResult<OrderDetails> {
        let existing = self.load_order(order_id).await?;

        let current = OrderStatus::from_str(&existing.order_status).ok_or_else(|| {
            AppError::Internal(format!(
                "Order {} has unrecognized status {}",
                order_id, existing.order_status
            ))
        })?;

        validate_transition(current, input.order_status)
            .map_err(|e| AppError::InvalidStateTransition(e.to_string()))?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET order_status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, reference, source_id, order_date, request_date, order_status,
                      warehouse_id, ship_to, bill_to, notes, shipping_notes, picking_notes,
                      total_amount, total_discount, total_tax, total_surcharge,
                      created_at, updated_at, is_deleted
            "#,
        )
        .bind(input.order_status.as_str())
        .bind(order_id)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            order_id = order.id,
            from = current.as_str(),
            to = input.order_status.as_str(),
            "Order status changed"
        );

        self.with_details(order).await
    }

    /// Replace the linked shipments of an order, re-validating every link
    pub async fn update_order_shipments(
        &self,
        order_id: i64,
        input: UpdateOrderShipmentsInput,
    ) -> AppResult<OrderDetails> {
        self.load_order(order_id).await?;

        let mut tx = self.db.begin().await?;

        for shipment_id in &input.shipment_id {
            Self::validate_shipment_link(&mut *tx, *shipment_id).await?;
        }

        sqlx::query("DELETE FROM order_shipments WHERE order_id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        for shipment_id in &input.shipment_id {
            sqlx::query(
                "INSERT INTO order_shipments (order_id, shipment_id) VALUES ($1, $2)",
            )
            .bind(order_id)
            .bind(shipment_id)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE orders SET updated_at = NOW() WHERE id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let order = self.load_order(order_id).await?;
        self.with_details(order).await
    }

    /// Soft-delete an order
    pub async fn delete(&self, order_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE orders SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(order_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Order".to_string()));
        }

        Ok(())
    }

    /// Gate which shipments an order may reference: no incoming shipments,
    /// no Delivered shipments. The direction check runs first.
    async fn validate_shipment_link(conn: &mut PgConnection, shipment_id: i64) -> AppResult<()> {
        let row = sqlx::query_as::<_, (String, String)>(
            "SELECT shipment_type, shipment_status FROM shipments \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(shipment_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Shipment {}", shipment_id)))?;

        let shipment_type = ShipmentType::from_str(&row.0).ok_or_else(|| {
            AppError::Internal(format!(
                "Shipment {} has unrecognized type {}",
                shipment_id, row.0
            ))
        })?;

        let shipment_status = ShipmentStatus::from_str(&row.1).ok_or_else(|| {
            AppError::Internal(format!(
                "Shipment {} has unrecognized status {}",
                shipment_id, row.1
            ))
        })?;

        validate_order_link(shipment_type, shipment_status)
            .map_err(|e| AppError::ShipmentLinkRejected(e.to_string()))
    }

    async fn load_order(&self, order_id: i64) -> AppResult<Order> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, reference, source_id, order_date, request_date, order_status,
                   warehouse_id, ship_to, bill_to, notes, shipping_notes, picking_notes,
                   total_amount, total_discount, total_tax, total_surcharge,
                   created_at, updated_at, is_deleted
            FROM orders
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        Ok(order)
    }

    async fn with_details(&self, order: Order) -> AppResult<OrderDetails> {
        let items = sqlx::query_as::<_, OrderLine>(
            "SELECT item_reference AS item_id, amount FROM order_items \
             WHERE order_id = $1 ORDER BY line_no",
        )
        .bind(order.id)
        .fetch_all(&self.db)
        .await?;

        let shipment_id = sqlx::query_scalar::<_, i64>(
            "SELECT shipment_id FROM order_shipments WHERE order_id = $1 ORDER BY shipment_id",
        )
        .bind(order.id)
        .fetch_all(&self.db)
        .await?;

        Ok(OrderDetails {
            order,
            items,
            shipment_id,
        })
    }
}

/// Apply the allowed header updates onto an existing order. Enumerates the
/// mutable fields one by one; reference and status never pass through here.
fn merge_order_update(mut order: Order, input: UpdateOrderInput) -> Order {
    if let Some(source_id) = input.source_id {
        order.source_id = source_id;
    }
    if let Some(order_date) = input.order_date {
        order.order_date = order_date;
    }
    if input.request_date.is_some() {
        order.request_date = input.request_date;
    }
    if let Some(warehouse_id) = input.warehouse_id {
        order.warehouse_id = warehouse_id;
    }
    if input.ship_to.is_some() {
        order.ship_to = input.ship_to;
    }
    if input.bill_to.is_some() {
        order.bill_to = input.bill_to;
    }
    if input.notes.is_some() {
        order.notes = input.notes;
    }
    if input.shipping_notes.is_some() {
        order.shipping_notes = input.shipping_notes;
    }
    if input.picking_notes.is_some() {
        order.picking_notes = input.picking_notes;
    }
    if let Some(total_amount) = input.total_amount {
        order.total_amount = total_amount;
    }
    if input.total_discount.is_some() {
        order.total_discount = input.total_discount;
    }
    if input.total_tax.is_some() {
        order.total_tax = input.total_tax;
    }
    if input.total_surcharge.is_some() {
        order.total_surcharge = input.total_surcharge;
    }
    order
}
