//! Transfer management service
//!
//! Transfers record planned stock movements between locations. This service
//! tracks the transfer documents themselves; it does not move inventory
//! counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};
use crate::models::TransferStatus;

/// Transfer service for internal stock movements
#[derive(Clone)]
pub struct TransferService {
    db: PgPool,
}

/// Transfer record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Transfer {
    pub id: i64,
    pub reference: String,
    pub transfer_from: Option<i64>,
    pub transfer_to: Option<i64>,
    pub transfer_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// Transfer line item
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TransferLine {
    pub item_id: String,
    pub amount: i64,
}

/// Transfer with its line items
#[derive(Debug, Clone, Serialize)]
pub struct TransferDetails {
    #[serde(flatten)]
    pub transfer: Transfer,
    pub items: Vec<TransferLine>,
}

/// Line item on an incoming transfer request
#[derive(Debug, Deserialize)]
pub struct TransferLineInput {
    pub item_id: String,
    pub amount: i64,
}

/// Input for creating a transfer
#[derive(Debug, Deserialize)]
pub struct CreateTransferInput {
    pub reference: String,
    pub transfer_from: Option<i64>,
    pub transfer_to: Option<i64>,
    #[serde(default)]
    pub items: Vec<TransferLineInput>,
}

/// Input for updating a transfer
#[derive(Debug, Deserialize)]
pub struct UpdateTransferInput {
    pub transfer_from: Option<i64>,
    pub transfer_to: Option<i64>,
    pub transfer_status: Option<TransferStatus>,
}

impl TransferService {
    /// Create a new TransferService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all transfers
    pub async fn list(&self) -> AppResult<Vec<Transfer>> {
        let transfers = sqlx::query_as::<_, Transfer>(
            r#"
            SELECT id, reference, transfer_from, transfer_to, transfer_status,
                   created_at, updated_at, is_deleted
            FROM transfers
            WHERE is_deleted = FALSE
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(transfers)
    }

    /// Get a transfer with its line items
    pub async fn get(&self, transfer_id: i64) -> AppResult<TransferDetails> {
        let transfer = self.load_transfer(transfer_id).await?;
        self.with_details(transfer).await
    }

    /// Create a transfer with its line items, starting Pending
    pub async fn create(&self, input: CreateTransferInput) -> AppResult<TransferDetails> {
        shared::validate_transfer_reference(&input.reference).map_err(|msg| {
            AppError::Validation {
                field: "reference".to_string(),
                message: msg.to_string(),
            }
        })?;

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

        for location_id in [input.transfer_from, input.transfer_to].into_iter().flatten() {
            let location_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM locations WHERE id = $1 AND is_deleted = FALSE)",
            )
            .bind(location_id)
            .fetch_one(&self.db)
            .await?;

            if !location_exists {
                return Err(AppError::NotFound("Location".to_string()));
            }
        }

        let reference_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM transfers WHERE reference = $1)",
        )
        .bind(&input.reference)
        .fetch_one(&self.db)
        .await?;

        if reference_taken {
            return Err(AppError::DuplicateEntry("reference".to_string()));
        }

        let mut tx = self.db.begin().await?;

        let transfer = sqlx::query_as::<_, Transfer>(
            r#"
            INSERT INTO transfers (reference, transfer_from, transfer_to, transfer_status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, reference, transfer_from, transfer_to, transfer_status,
                      created_at, updated_at, is_deleted
            "#,
        )
        .bind(&input.reference)
        .bind(input.transfer_from)
        .bind(input.transfer_to)
        .bind(TransferStatus::Pending.as_str())
        .fetch_one(&mut *tx)
        .await?;

        for (line_no, line) in input.items.iter().enumerate() {
            sqlx::query(
                "INSERT INTO transfer_items (transfer_id, line_no, item_reference, amount) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(transfer.id)
            .bind(line_no as i32)
            .bind(&line.item_id)
            .bind(line.amount)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.with_details(transfer).await
    }

    /// Update a transfer through an explicit merge of the mutable fields
    pub async fn update(
        &self,
        transfer_id: i64,
        input: UpdateTransferInput,
    ) -> AppResult<TransferDetails> {
        let existing = self.load_transfer(transfer_id).await?;

        for location_id in [input.transfer_from, input.transfer_to].into_iter().flatten() {
            let location_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM locations WHERE id = $1 AND is_deleted = FALSE)",
            )
            .bind(location_id)
            .fetch_one(&self.db)
            .await?;

            if !location_exists {
                return Err(AppError::NotFound("Location".to_string()));
            }
        }

        let transfer_from = input.transfer_from.or(existing.transfer_from);
        let transfer_to = input.transfer_to.or(existing.transfer_to);
        let transfer_status = input
            .transfer_status
            .map(|s| s.as_str().to_string())
            .unwrap_or(existing.transfer_status);

        let transfer = sqlx::query_as::<_, Transfer>(
            r#"
            UPDATE transfers
            SET transfer_from = $1, transfer_to = $2, transfer_status = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, reference, transfer_from, transfer_to, transfer_status,
                      created_at, updated_at, is_deleted
            "#,
        )
        .bind(transfer_from)
        .bind(transfer_to)
        .bind(&transfer_status)
        .bind(transfer_id)
        .fetch_one(&self.db)
        .await?;

        self.with_details(transfer).await
    }

    /// Soft-delete a transfer
    pub async fn delete(&self, transfer_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE transfers SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(transfer_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Transfer".to_string()));
        }

        Ok(())
    }

    async fn load_transfer(&self, transfer_id: i64) -> AppResult<Transfer> {
        let transfer = sqlx::query_as::<_, Transfer>(
            r#"
            SELECT id, reference, transfer_from, transfer_to, transfer_status,
                   created_at, updated_at, is_deleted
            FROM transfers
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(transfer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Transfer".to_string()))?;

        Ok(transfer)
    }

    async fn with_details(&self, transfer: Transfer) -> AppResult<TransferDetails> {
        let items = sqlx::query_as::<_, TransferLine>(
            "SELECT item_reference AS item_id, amount FROM transfer_items \
             WHERE transfer_id = $1 ORDER BY line_no",
        )
        .bind(transfer.id)
        .fetch_all(&self.db)
        .await?;

        Ok(TransferDetails { transfer, items })
    }
}
