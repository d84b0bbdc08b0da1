//! Shipment management service
//!
//! Owns the shipment lifecycle records. Orders only read shipment state when
//! validating links; the rules about which shipments an order may reference
//! live on the order side.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};
use crate::models::{ShipmentStatus, ShipmentType};

/// Shipment service for carrier movements in and out of the warehouse
#[derive(Clone)]
pub struct ShipmentService {
    db: PgPool,
}

/// Shipment record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Shipment {
    pub id: i64,
    pub order_id: Option<i64>,
    pub source_id: i64,
    pub order_date: DateTime<Utc>,
    pub request_date: Option<DateTime<Utc>>,
    pub shipment_date: Option<DateTime<Utc>>,
    pub shipment_type: String,
    pub shipment_status: String,
    pub notes: Option<String>,
    pub carrier_code: Option<String>,
    pub carrier_description: Option<String>,
    pub service_code: Option<String>,
    pub payment_type: Option<String>,
    pub transfer_mode: Option<String>,
    pub total_package_count: i32,
    pub total_package_weight: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// Shipment line item
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShipmentLine {
    pub item_id: String,
    pub amount: i64,
}

/// Shipment with its line items
#[derive(Debug, Clone, Serialize)]
pub struct ShipmentDetails {
    #[serde(flatten)]
    pub shipment: Shipment,
    pub items: Vec<ShipmentLine>,
}

/// Line item on an incoming shipment request
#[derive(Debug, Deserialize)]
pub struct ShipmentLineInput {
    pub item_id: String,
    pub amount: i64,
}

/// Input for creating a shipment
#[derive(Debug, Deserialize)]
pub struct CreateShipmentInput {
    pub order_id: Option<i64>,
    pub source_id: i64,
    pub order_date: DateTime<Utc>,
    pub request_date: Option<DateTime<Utc>>,
    pub shipment_date: Option<DateTime<Utc>>,
    pub shipment_type: ShipmentType,
    pub shipment_status: ShipmentStatus,
    pub notes: Option<String>,
    pub carrier_code: Option<String>,
    pub carrier_description: Option<String>,
    pub service_code: Option<String>,
    pub payment_type: Option<String>,
    pub transfer_mode: Option<String>,
    pub total_package_count: i32,
    pub total_package_weight: Decimal,
    #[serde(default)]
    pub items: Vec<ShipmentLineInput>,
}

/// Input for updating a shipment
#[derive(Debug, Deserialize)]
pub struct UpdateShipmentInput {
    pub order_id: Option<i64>,
    pub request_date: Option<DateTime<Utc>>,
    pub shipment_date: Option<DateTime<Utc>>,
    pub shipment_status: Option<ShipmentStatus>,
    pub notes: Option<String>,
    pub carrier_code: Option<String>,
    pub carrier_description: Option<String>,
    pub service_code: Option<String>,
    pub payment_type: Option<String>,
    pub transfer_mode: Option<String>,
    pub total_package_count: Option<i32>,
    pub total_package_weight: Option<Decimal>,
}

impl ShipmentService {
    /// Create a new ShipmentService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all shipments
    pub async fn list(&self) -> AppResult<Vec<Shipment>> {
        let shipments = sqlx::query_as::<_, Shipment>(
            r#"
            SELECT id, order_id, source_id, order_date, request_date, shipment_date,
                   shipment_type, shipment_status, notes, carrier_code, carrier_description,
                   service_code, payment_type, transfer_mode, total_package_count,
                   total_package_weight, created_at, updated_at, is_deleted
            FROM shipments
            WHERE is_deleted = FALSE
            ORDER BY order_date DESC, id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(shipments)
    }

    /// Get a shipment with its line items
    pub async fn get(&self, shipment_id: i64) -> AppResult<ShipmentDetails> {
        let shipment = self.load_shipment(shipment_id).await?;
        self.with_details(shipment).await
    }

    /// Get the line items of a shipment
    pub async fn shipment_items(&self, shipment_id: i64) -> AppResult<Vec<ShipmentLine>> {
        self.load_shipment(shipment_id).await?;

        let items = sqlx::query_as::<_, ShipmentLine>(
            "SELECT item_reference AS item_id, amount FROM shipment_items \
             WHERE shipment_id = $1 ORDER BY line_no",
        )
        .bind(shipment_id)
        .fetch_all(&self.db)
        .await?;

        Ok(items)
    }

    /// Create a shipment with its line items
    pub async fn create(&self, input: CreateShipmentInput) -> AppResult<ShipmentDetails> {
        if input.total_package_count < 0 {
            return Err(AppError::Validation {
                field: "total_package_count".to_string(),
                message: "Package count cannot be negative".to_string(),
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

        let mut tx = self.db.begin().await?;

        let shipment = sqlx::query_as::<_, Shipment>(
            r#"
            INSERT INTO shipments (order_id, source_id, order_date, request_date, shipment_date,
                                   shipment_type, shipment_status, notes, carrier_code,
                                   carrier_description, service_code, payment_type, transfer_mode,
                                   total_package_count, total_package_weight)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id, order_id, source_id, order_date, request_date, shipment_date,
                      shipment_type, shipment_status, notes, carrier_code, carrier_description,
                      service_code, payment_type, transfer_mode, total_package_count,
                      total_package_weight, created_at, updated_at, is_deleted
            "#,
        )
        .bind(input.order_id)
        .bind(input.source_id)
        .bind(input.order_date)
        .bind(input.request_date)
        .bind(input.shipment_date)
        .bind(input.shipment_type.as_str())
        .bind(input.shipment_status.as_str())
        .bind(&input.notes)
        .bind(&input.carrier_code)
        .bind(&input.carrier_description)
        .bind(&input.service_code)
        .bind(&input.payment_type)
        .bind(&input.transfer_mode)
        .bind(input.total_package_count)
        .bind(input.total_package_weight)
        .fetch_one(&mut *tx)
        .await?;

        for (line_no, line) in input.items.iter().enumerate() {
            sqlx::query(
                "INSERT INTO shipment_items (shipment_id, line_no, item_reference, amount) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(shipment.id)
            .bind(line_no as i32)
            .bind(&line.item_id)
            .bind(line.amount)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.with_details(shipment).await
    }

    /// Update a shipment through an explicit merge of the mutable fields
    pub async fn update(
        &self,
        shipment_id: i64,
        input: UpdateShipmentInput,
    ) -> AppResult<ShipmentDetails> {
        let existing = self.load_shipment(shipment_id).await?;

        let order_id = input.order_id.or(existing.order_id);
        let request_date = input.request_date.or(existing.request_date);
        let shipment_date = input.shipment_date.or(existing.shipment_date);
        let shipment_status = input
            .shipment_status
            .map(|s| s.as_str().to_string())
            .unwrap_or(existing.shipment_status);
        let notes = input.notes.or(existing.notes);
        let carrier_code = input.carrier_code.or(existing.carrier_code);
        let carrier_description = input.carrier_description.or(existing.carrier_description);
        let service_code = input.service_code.or(existing.service_code);
        let payment_type = input.payment_type.or(existing.payment_type);
        let transfer_mode = input.transfer_mode.or(existing.transfer_mode);
        let total_package_count = input.total_package_count.unwrap_or(existing.total_package_count);
        let total_package_weight = input
            .total_package_weight
            .unwrap_or(existing.total_package_weight);

        let shipment = sqlx::query_as::<_, Shipment>(
            r#"
            UPDATE shipments
            SET order_id = $1, request_date = $2, shipment_date = $3, shipment_status = $4,
                notes = $5, carrier_code = $6, carrier_description = $7, service_code = $8,
                payment_type = $9, transfer_mode = $10, total_package_count = $11,
                total_package_weight = $12, updated_at = NOW()
            WHERE id = $13
            RETURNING id, order_id, source_id, order_date, request_date, shipment_date,
                      shipment_type, shipment_status, notes, carrier_code, carrier_description,
                      service_code, payment_type, transfer_mode, total_package_count,
                      total_package_weight, created_at, updated_at, is_deleted
            "#,
        )
        .bind(order_id)
        .bind(request_date)
        .bind(shipment_date)
        .bind(&shipment_status)
        .bind(&notes)
        .bind(&carrier_code)
        .bind(&carrier_description)
        .bind(&service_code)
        .bind(&payment_type)
        .bind(&transfer_mode)
        .bind(total_package_count)
        .bind(total_package_weight)
        .bind(shipment_id)
        .fetch_one(&self.db)
        .await?;

        self.with_details(shipment).await
    }

    /// Soft-delete a shipment
    pub async fn delete(&self, shipment_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE shipments SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(shipment_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Shipment".to_string()));
        }

        Ok(())
    }

    async fn load_shipment(&self, shipment_id: i64) -> AppResult<Shipment> {
        let shipment = sqlx::query_as::<_, Shipment>(
            r#"
            SELECT id, order_id, source_id, order_date, request_date, shipment_date,
                   shipment_type, shipment_status, notes, carrier_code, carrier_description,
                   service_code, payment_type, transfer_mode, total_package_count,
                   total_package_weight, created_at, updated_at, is_deleted
            FROM shipments
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(shipment_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Shipment".to_string()))?;

        Ok(shipment)
    }

    async fn with_details(&self, shipment: Shipment) -> AppResult<ShipmentDetails> {
        let items = sqlx::query_as::<_, ShipmentLine>(
            "SELECT item_reference AS item_id, amount FROM shipment_items \
             WHERE shipment_id = $1 ORDER BY line_no",
        )
        .bind(shipment.id)
        .fetch_all(&self.db)
        .await?;

        Ok(ShipmentDetails { shipment, items })
    }
}
