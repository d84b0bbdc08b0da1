//! Inventory ledger service
//!
//! Tracks per-item stock counters. The canonical relationship between the
//! counters is `total_available = total_on_hand - total_allocated -
//! total_ordered`; every mutation path maintains it, readers never recompute
//! it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};

use crate::error::{AppError, AppResult};

/// Inventory service for stock counters and reservations
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Per-item stock counter record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InventoryRecord {
    pub id: i64,
    pub item_reference: String,
    pub description: String,
    pub total_on_hand: i64,
    pub total_expected: i64,
    pub total_ordered: i64,
    pub total_allocated: i64,
    pub total_available: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// Input for creating an inventory record
#[derive(Debug, Deserialize)]
pub struct CreateInventoryInput {
    pub item_reference: String,
    pub description: String,
    pub total_on_hand: Option<i64>,
    pub total_expected: Option<i64>,
    pub total_allocated: Option<i64>,
}

/// Input for receiving stock against an inventory record
#[derive(Debug, Deserialize)]
pub struct ReceiveStockInput {
    pub amount: i64,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all inventory records
    pub async fn list(&self) -> AppResult<Vec<InventoryRecord>> {
        let records = sqlx::query_as::<_, InventoryRecord>(
            r#"
            SELECT id, item_reference, description, total_on_hand, total_expected,
                   total_ordered, total_allocated, total_available, created_at, updated_at,
                   is_deleted
            FROM inventories
            WHERE is_deleted = FALSE
            ORDER BY item_reference
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }

    /// Get an inventory record by ID
    pub async fn get(&self, inventory_id: i64) -> AppResult<InventoryRecord> {
        let record = sqlx::query_as::<_, InventoryRecord>(
            r#"
            SELECT id, item_reference, description, total_on_hand, total_expected,
                   total_ordered, total_allocated, total_available, created_at, updated_at,
                   is_deleted
            FROM inventories
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(inventory_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory".to_string()))?;

        Ok(record)
    }

    /// Get the inventory record backing an item
    pub async fn get_by_item_reference(&self, item_reference: &str) -> AppResult<InventoryRecord> {
        let record = sqlx::query_as::<_, InventoryRecord>(
            r#"
            SELECT id, item_reference, description, total_on_hand, total_expected,
                   total_ordered, total_allocated, total_available, created_at, updated_at,
                   is_deleted
            FROM inventories
            WHERE item_reference = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(item_reference)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory".to_string()))?;

        Ok(record)
    }

    /// Create an inventory record for an existing item
    pub async fn create(&self, input: CreateInventoryInput) -> AppResult<InventoryRecord> {
        shared::validate_item_reference(&input.item_reference).map_err(|msg| {
            AppError::Validation {
                field: "item_reference".to_string(),
                message: msg.to_string(),
            }
        })?;

        let on_hand = input.total_on_hand.unwrap_or(0);
        let expected = input.total_expected.unwrap_or(0);
        let allocated = input.total_allocated.unwrap_or(0);

        let item_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM items WHERE reference = $1 AND is_deleted = FALSE)",
        )
        .bind(&input.item_reference)
        .fetch_one(&self.db)
        .await?;

        if !item_exists {
            return Err(AppError::NotFound("Item".to_string()));
        }

        let already_tracked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM inventories WHERE item_reference = $1)",
        )
        .bind(&input.item_reference)
        .fetch_one(&self.db)
        .await?;

        if already_tracked {
            return Err(AppError::DuplicateEntry("item_reference".to_string()));
        }

        let record = sqlx::query_as::<_, InventoryRecord>(
            r#"
            INSERT INTO inventories (item_reference, description, total_on_hand, total_expected,
                                     total_ordered, total_allocated, total_available)
            VALUES ($1, $2, $3, $4, 0, $5, $3 - $5)
            RETURNING id, item_reference, description, total_on_hand, total_expected,
                      total_ordered, total_allocated, total_available, created_at, updated_at,
                      is_deleted
            "#,
        )
        .bind(&input.item_reference)
        .bind(&input.description)
        .bind(on_hand)
        .bind(expected)
        .bind(allocated)
        .fetch_one(&self.db)
        .await?;

        Ok(record)
    }

    /// Receive expected stock into a record: on-hand and available grow,
    /// the expected counter is drawn down.
    pub async fn receive_stock(
        &self,
        inventory_id: i64,
        input: ReceiveStockInput,
    ) -> AppResult<InventoryRecord> {
        if input.amount <= 0 {
            return Err(AppError::Validation {
                field: "amount".to_string(),
                message: "Amount must be positive".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let locked = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM inventories WHERE id = $1 AND is_deleted = FALSE FOR UPDATE",
        )
        .bind(inventory_id)
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            return Err(AppError::NotFound("Inventory".to_string()));
        }

        let record = sqlx::query_as::<_, InventoryRecord>(
            r#"
            UPDATE inventories
            SET total_on_hand = total_on_hand + $1,
                total_expected = total_expected - $1,
                total_available = total_available + $1,
                updated_at = NOW()
            WHERE id = $2
            RETURNING id, item_reference, description, total_on_hand, total_expected,
                      total_ordered, total_allocated, total_available, created_at, updated_at,
                      is_deleted
            "#,
        )
        .bind(input.amount)
        .bind(inventory_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Soft-delete an inventory record
    pub async fn delete(&self, inventory_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE inventories SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(inventory_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Inventory".to_string()));
        }

        Ok(())
    }

    /// Check whether `requested` units of an item can be reserved.
    ///
    /// Locks the item's counter row for the remainder of the surrounding
    /// transaction, so a concurrent reservation against the same item waits
    /// here and then observes this caller's reservation. Returns the current
    /// available count on success; the failure carries the exact count so the
    /// caller can report the shortfall.
    pub async fn check_availability(
        conn: &mut PgConnection,
        item_reference: &str,
        requested: i64,
    ) -> AppResult<i64> {
        let available = sqlx::query_scalar::<_, i64>(
            "SELECT total_available FROM inventories \
             WHERE item_reference = $1 AND is_deleted = FALSE FOR UPDATE",
        )
        .bind(item_reference)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Inventory for item {}", item_reference)))?;

        if requested > available {
            return Err(AppError::InsufficientStock {
                item_reference: item_reference.to_string(),
                available,
            });
        }

        Ok(available)
    }

    /// Reserve stock for an order line: available shrinks, ordered grows.
    ///
    /// Must run on the same transaction as the preceding availability check
    /// and the order insert, so the reservation disappears with the order on
    /// rollback.
    pub async fn reserve(
        conn: &mut PgConnection,
        item_reference: &str,
        amount: i64,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE inventories \
             SET total_available = total_available - $1, \
                 total_ordered = total_ordered + $1, \
                 updated_at = NOW() \
             WHERE item_reference = $2 AND is_deleted = FALSE",
        )
        .bind(amount)
        .bind(item_reference)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}
