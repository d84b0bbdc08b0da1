//! Item catalog service
//!
//! Every item is backed by exactly one inventory record; creating an item
//! seeds that record with zero counters in the same transaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Item service for the warehouse catalog
#[derive(Clone)]
pub struct ItemService {
    db: PgPool,
}

/// Item record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub reference: String,
    pub code: String,
    pub description: String,
    pub short_description: Option<String>,
    pub upc_code: Option<String>,
    pub model_number: Option<String>,
    pub commodity_code: Option<String>,
    pub supplier_id: Option<i64>,
    pub supplier_code: Option<String>,
    pub supplier_part_number: Option<String>,
    pub unit_purchase_quantity: i32,
    pub unit_order_quantity: i32,
    pub pack_order_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// Input for creating an item
#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemInput {
    pub reference: String,
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub short_description: Option<String>,
    pub upc_code: Option<String>,
    pub model_number: Option<String>,
    pub commodity_code: Option<String>,
    pub supplier_id: Option<i64>,
    pub supplier_code: Option<String>,
    pub supplier_part_number: Option<String>,
    #[validate(range(min = 1, message = "Unit purchase quantity must be positive"))]
    pub unit_purchase_quantity: i32,
    #[validate(range(min = 1, message = "Unit order quantity must be positive"))]
    pub unit_order_quantity: i32,
    #[validate(range(min = 1, message = "Pack order quantity must be positive"))]
    pub pack_order_quantity: i32,
}

/// Input for updating an item
#[derive(Debug, Deserialize)]
pub struct UpdateItemInput {
    pub code: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub upc_code: Option<String>,
    pub model_number: Option<String>,
    pub commodity_code: Option<String>,
    pub supplier_id: Option<i64>,
    pub supplier_code: Option<String>,
    pub supplier_part_number: Option<String>,
    pub unit_purchase_quantity: Option<i32>,
    pub unit_order_quantity: Option<i32>,
    pub pack_order_quantity: Option<i32>,
}

impl ItemService {
    /// Create a new ItemService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all items
    pub async fn list(&self) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, reference, code, description, short_description, upc_code, model_number,
                   commodity_code, supplier_id, supplier_code, supplier_part_number,
                   unit_purchase_quantity, unit_order_quantity, pack_order_quantity,
                   created_at, updated_at, is_deleted
            FROM items
            WHERE is_deleted = FALSE
            ORDER BY reference
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(items)
    }

    /// Get an item by ID
    pub async fn get(&self, item_id: i64) -> AppResult<Item> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, reference, code, description, short_description, upc_code, model_number,
                   commodity_code, supplier_id, supplier_code, supplier_part_number,
                   unit_purchase_quantity, unit_order_quantity, pack_order_quantity,
                   created_at, updated_at, is_deleted
            FROM items
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(item_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        Ok(item)
    }

    /// Create an item and seed its inventory record
    pub async fn create(&self, input: CreateItemInput) -> AppResult<Item> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        shared::validate_item_reference(&input.reference).map_err(|msg| {
            AppError::Validation {
                field: "reference".to_string(),
                message: msg.to_string(),
            }
        })?;

        let reference_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM items WHERE reference = $1)",
        )
        .bind(&input.reference)
        .fetch_one(&self.db)
        .await?;

        if reference_taken {
            return Err(AppError::DuplicateEntry("reference".to_string()));
        }

        if let Some(supplier_id) = input.supplier_id {
            let supplier_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1 AND is_deleted = FALSE)",
            )
            .bind(supplier_id)
            .fetch_one(&self.db)
            .await?;

            if !supplier_exists {
                return Err(AppError::NotFound("Supplier".to_string()));
            }
        }

        let mut tx = self.db.begin().await?;

        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (reference, code, description, short_description, upc_code,
                               model_number, commodity_code, supplier_id, supplier_code,
                               supplier_part_number, unit_purchase_quantity, unit_order_quantity,
                               pack_order_quantity)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id, reference, code, description, short_description, upc_code, model_number,
                      commodity_code, supplier_id, supplier_code, supplier_part_number,
                      unit_purchase_quantity, unit_order_quantity, pack_order_quantity,
                      created_at, updated_at, is_deleted
            "#,
        )
        .bind(&input.reference)
        .bind(&input.code)
        .bind(&input.description)
        .bind(&input.short_description)
        .bind(&input.upc_code)
        .bind(&input.model_number)
        .bind(&input.commodity_code)
        .bind(input.supplier_id)
        .bind(&input.supplier_code)
        .bind(&input.supplier_part_number)
        .bind(input.unit_purchase_quantity)
        .bind(input.unit_order_quantity)
        .bind(input.pack_order_quantity)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO inventories (item_reference, description, total_on_hand, total_expected,
                                     total_ordered, total_allocated, total_available)
            VALUES ($1, $2, 0, 0, 0, 0, 0)
            "#,
        )
        .bind(&item.reference)
        .bind(&item.description)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(item)
    }

    /// Update an item through an explicit merge of the mutable fields.
    /// The reference is the immutable business key.
    pub async fn update(&self, item_id: i64, input: UpdateItemInput) -> AppResult<Item> {
        let existing = self.get(item_id).await?;

        if let Some(supplier_id) = input.supplier_id {
            let supplier_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1 AND is_deleted = FALSE)",
            )
            .bind(supplier_id)
            .fetch_one(&self.db)
            .await?;

            if !supplier_exists {
                return Err(AppError::NotFound("Supplier".to_string()));
            }
        }

        let code = input.code.unwrap_or(existing.code);
        let description = input.description.unwrap_or(existing.description);
        let short_description = input.short_description.or(existing.short_description);
        let upc_code = input.upc_code.or(existing.upc_code);
        let model_number = input.model_number.or(existing.model_number);
        let commodity_code = input.commodity_code.or(existing.commodity_code);
        let supplier_id = input.supplier_id.or(existing.supplier_id);
        let supplier_code = input.supplier_code.or(existing.supplier_code);
        let supplier_part_number = input.supplier_part_number.or(existing.supplier_part_number);
        let unit_purchase_quantity = input
            .unit_purchase_quantity
            .unwrap_or(existing.unit_purchase_quantity);
        let unit_order_quantity = input
            .unit_order_quantity
            .unwrap_or(existing.unit_order_quantity);
        let pack_order_quantity = input
            .pack_order_quantity
            .unwrap_or(existing.pack_order_quantity);

        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET code = $1, description = $2, short_description = $3, upc_code = $4,
                model_number = $5, commodity_code = $6, supplier_id = $7, supplier_code = $8,
                supplier_part_number = $9, unit_purchase_quantity = $10,
                unit_order_quantity = $11, pack_order_quantity = $12, updated_at = NOW()
            WHERE id = $13
            RETURNING id, reference, code, description, short_description, upc_code, model_number,
                      commodity_code, supplier_id, supplier_code, supplier_part_number,
                      unit_purchase_quantity, unit_order_quantity, pack_order_quantity,
                      created_at, updated_at, is_deleted
            "#,
        )
        .bind(&code)
        .bind(&description)
        .bind(&short_description)
        .bind(&upc_code)
        .bind(&model_number)
        .bind(&commodity_code)
        .bind(supplier_id)
        .bind(&supplier_code)
        .bind(&supplier_part_number)
        .bind(unit_purchase_quantity)
        .bind(unit_order_quantity)
        .bind(pack_order_quantity)
        .bind(item_id)
        .fetch_one(&self.db)
        .await?;

        Ok(item)
    }

    /// Soft-delete an item
    pub async fn delete(&self, item_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE items SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(item_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Item".to_string()));
        }

        Ok(())
    }
}
