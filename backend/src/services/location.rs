//! Location management service
//!
//! Locations are the rack/shelf slots inside a warehouse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};

/// Location service for storage slots
#[derive(Clone)]
pub struct LocationService {
    db: PgPool,
}

/// Location record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Location {
    pub id: i64,
    pub warehouse_id: i64,
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// Input for creating a location
#[derive(Debug, Deserialize)]
pub struct CreateLocationInput {
    pub warehouse_id: i64,
    pub code: String,
    pub name: String,
}

/// Input for updating a location
#[derive(Debug, Deserialize)]
pub struct UpdateLocationInput {
    pub code: Option<String>,
    pub name: Option<String>,
}

impl LocationService {
    /// Create a new LocationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all locations
    pub async fn list(&self) -> AppResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>(
            r#"
            SELECT id, warehouse_id, code, name, created_at, updated_at, is_deleted
            FROM locations
            WHERE is_deleted = FALSE
            ORDER BY warehouse_id, code
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(locations)
    }

    /// List the locations of a warehouse
    pub async fn list_for_warehouse(&self, warehouse_id: i64) -> AppResult<Vec<Location>> {
        let warehouse_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM warehouses WHERE id = $1 AND is_deleted = FALSE)",
        )
        .bind(warehouse_id)
        .fetch_one(&self.db)
        .await?;

        if !warehouse_exists {
            return Err(AppError::NotFound("Warehouse".to_string()));
        }

        let locations = sqlx::query_as::<_, Location>(
            r#"
            SELECT id, warehouse_id, code, name, created_at, updated_at, is_deleted
            FROM locations
            WHERE warehouse_id = $1 AND is_deleted = FALSE
            ORDER BY code
            "#,
        )
        .bind(warehouse_id)
        .fetch_all(&self.db)
        .await?;

        Ok(locations)
    }

    /// Get a location by ID
    pub async fn get(&self, location_id: i64) -> AppResult<Location> {
        let location = sqlx::query_as::<_, Location>(
            r#"
            SELECT id, warehouse_id, code, name, created_at, updated_at, is_deleted
            FROM locations
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(location_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Location".to_string()))?;

        Ok(location)
    }

    /// Create a location inside an existing warehouse
    pub async fn create(&self, input: CreateLocationInput) -> AppResult<Location> {
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

        let location = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (warehouse_id, code, name)
            VALUES ($1, $2, $3)
            RETURNING id, warehouse_id, code, name, created_at, updated_at, is_deleted
            "#,
        )
        .bind(input.warehouse_id)
        .bind(&input.code)
        .bind(&input.name)
        .fetch_one(&self.db)
        .await?;

        Ok(location)
    }

    /// Update a location through an explicit merge of the mutable fields
    pub async fn update(
        &self,
        location_id: i64,
        input: UpdateLocationInput,
    ) -> AppResult<Location> {
        let existing = self.get(location_id).await?;

        let code = input.code.unwrap_or(existing.code);
        let name = input.name.unwrap_or(existing.name);

        let location = sqlx::query_as::<_, Location>(
            r#"
            UPDATE locations
            SET code = $1, name = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, warehouse_id, code, name, created_at, updated_at, is_deleted
            "#,
        )
        .bind(&code)
        .bind(&name)
        .bind(location_id)
        .fetch_one(&self.db)
        .await?;

        Ok(location)
    }

    /// Soft-delete a location
    pub async fn delete(&self, location_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE locations SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(location_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Location".to_string()));
        }

        Ok(())
    }
}
