//! Dock management service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};
use crate::models::DockStatus;

/// Dock service for loading bays
#[derive(Clone)]
pub struct DockService {
    db: PgPool,
}

/// Dock record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Dock {
    pub id: i64,
    pub warehouse_id: i64,
    pub code: String,
    pub dock_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// Input for creating a dock
#[derive(Debug, Deserialize)]
pub struct CreateDockInput {
    pub warehouse_id: i64,
    pub code: String,
    pub dock_status: Option<DockStatus>,
}

/// Input for updating a dock
#[derive(Debug, Deserialize)]
pub struct UpdateDockInput {
    pub code: Option<String>,
    pub dock_status: Option<DockStatus>,
}

impl DockService {
    /// Create a new DockService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all docks
    pub async fn list(&self) -> AppResult<Vec<Dock>> {
        let docks = sqlx::query_as::<_, Dock>(
            r#"
            SELECT id, warehouse_id, code, dock_status, created_at, updated_at, is_deleted
            FROM docks
            WHERE is_deleted = FALSE
            ORDER BY warehouse_id, code
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(docks)
    }

    /// List the docks of a warehouse
    pub async fn list_for_warehouse(&self, warehouse_id: i64) -> AppResult<Vec<Dock>> {
        let warehouse_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM warehouses WHERE id = $1 AND is_deleted = FALSE)",
        )
        .bind(warehouse_id)
        .fetch_one(&self.db)
        .await?;

        if !warehouse_exists {
            return Err(AppError::NotFound("Warehouse".to_string()));
        }

        let docks = sqlx::query_as::<_, Dock>(
            r#"
            SELECT id, warehouse_id, code, dock_status, created_at, updated_at, is_deleted
            FROM docks
            WHERE warehouse_id = $1 AND is_deleted = FALSE
            ORDER BY code
            "#,
        )
        .bind(warehouse_id)
        .fetch_all(&self.db)
        .await?;

        Ok(docks)
    }

    /// Get a dock by ID
    pub async fn get(&self, dock_id: i64) -> AppResult<Dock> {
        let dock = sqlx::query_as::<_, Dock>(
            r#"
            SELECT id, warehouse_id, code, dock_status, created_at, updated_at, is_deleted
            FROM docks
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(dock_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Dock".to_string()))?;

        Ok(dock)
    }

    /// Create a dock inside an existing warehouse
    pub async fn create(&self, input: CreateDockInput) -> AppResult<Dock> {
        if input.code.is_empty() {
            return Err(AppError::Validation {
                field: "code".to_string(),
                message: "Code is required".to_string(),
            });
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

        let dock_status = input.dock_status.unwrap_or(DockStatus::Free);

        let dock = sqlx::query_as::<_, Dock>(
            r#"
            INSERT INTO docks (warehouse_id, code, dock_status)
            VALUES ($1, $2, $3)
            RETURNING id, warehouse_id, code, dock_status, created_at, updated_at, is_deleted
            "#,
        )
        .bind(input.warehouse_id)
        .bind(&input.code)
        .bind(dock_status.as_str())
        .fetch_one(&self.db)
        .await?;

        Ok(dock)
    }

    /// Update a dock through an explicit merge of the mutable fields
    pub async fn update(&self, dock_id: i64, input: UpdateDockInput) -> AppResult<Dock> {
        let existing = self.get(dock_id).await?;

        let code = input.code.unwrap_or(existing.code);
        let dock_status = input
            .dock_status
            .map(|s| s.as_str().to_string())
            .unwrap_or(existing.dock_status);

        let dock = sqlx::query_as::<_, Dock>(
            r#"
            UPDATE docks
            SET code = $1, dock_status = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, warehouse_id, code, dock_status, created_at, updated_at, is_deleted
            "#,
        )
        .bind(&code)
        .bind(&dock_status)
        .bind(dock_id)
        .fetch_one(&self.db)
        .await?;

        Ok(dock)
    }

    /// Soft-delete a dock
    pub async fn delete(&self, dock_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE docks SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(dock_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Dock".to_string()));
        }

        Ok(())
    }
}
