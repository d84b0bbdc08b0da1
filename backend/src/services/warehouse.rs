//! Warehouse management service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Warehouse service for physical sites
#[derive(Clone)]
pub struct WarehouseService {
    db: PgPool,
}

/// Warehouse record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Warehouse {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub address: String,
    pub zip: String,
    pub city: String,
    pub province: Option<String>,
    pub country: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// Input for creating a warehouse
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWarehouseInput {
    pub code: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    pub zip: String,
    pub city: String,
    pub province: Option<String>,
    pub country: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    #[validate(email(message = "Invalid contact email"))]
    pub contact_email: Option<String>,
}

/// Input for updating a warehouse
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWarehouseInput {
    pub name: Option<String>,
    pub address: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    #[validate(email(message = "Invalid contact email"))]
    pub contact_email: Option<String>,
}

impl WarehouseService {
    /// Create a new WarehouseService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all warehouses
    pub async fn list(&self) -> AppResult<Vec<Warehouse>> {
        let warehouses = sqlx::query_as::<_, Warehouse>(
            r#"
            SELECT id, code, name, address, zip, city, province, country,
                   contact_name, contact_phone, contact_email, created_at, updated_at, is_deleted
            FROM warehouses
            WHERE is_deleted = FALSE
            ORDER BY code
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(warehouses)
    }

    /// Get a warehouse by ID
    pub async fn get(&self, warehouse_id: i64) -> AppResult<Warehouse> {
        let warehouse = sqlx::query_as::<_, Warehouse>(
            r#"
            SELECT id, code, name, address, zip, city, province, country,
                   contact_name, contact_phone, contact_email, created_at, updated_at, is_deleted
            FROM warehouses
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(warehouse_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Warehouse".to_string()))?;

        Ok(warehouse)
    }

    /// Create a warehouse
    pub async fn create(&self, input: CreateWarehouseInput) -> AppResult<Warehouse> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        shared::validate_entity_code(&input.code).map_err(|msg| AppError::Validation {
            field: "code".to_string(),
            message: msg.to_string(),
        })?;

        if let Some(phone) = &input.contact_phone {
            shared::validate_phone(phone).map_err(|msg| AppError::Validation {
                field: "contact_phone".to_string(),
                message: msg.to_string(),
            })?;
        }

        let code_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM warehouses WHERE code = $1)",
        )
        .bind(&input.code)
        .fetch_one(&self.db)
        .await?;

        if code_taken {
            return Err(AppError::DuplicateEntry("code".to_string()));
        }

        let warehouse = sqlx::query_as::<_, Warehouse>(
            r#"
            INSERT INTO warehouses (code, name, address, zip, city, province, country,
                                    contact_name, contact_phone, contact_email)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, code, name, address, zip, city, province, country,
                      contact_name, contact_phone, contact_email, created_at, updated_at,
                      is_deleted
            "#,
        )
        .bind(&input.code)
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.zip)
        .bind(&input.city)
        .bind(&input.province)
        .bind(&input.country)
        .bind(&input.contact_name)
        .bind(&input.contact_phone)
        .bind(&input.contact_email)
        .fetch_one(&self.db)
        .await?;

        Ok(warehouse)
    }

    /// Update a warehouse through an explicit merge of the mutable fields
    pub async fn update(
        &self,
        warehouse_id: i64,
        input: UpdateWarehouseInput,
    ) -> AppResult<Warehouse> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        if let Some(phone) = &input.contact_phone {
            shared::validate_phone(phone).map_err(|msg| AppError::Validation {
                field: "contact_phone".to_string(),
                message: msg.to_string(),
            })?;
        }

        let existing = self.get(warehouse_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let address = input.address.unwrap_or(existing.address);
        let zip = input.zip.unwrap_or(existing.zip);
        let city = input.city.unwrap_or(existing.city);
        let province = input.province.or(existing.province);
        let country = input.country.unwrap_or(existing.country);
        let contact_name = input.contact_name.or(existing.contact_name);
        let contact_phone = input.contact_phone.or(existing.contact_phone);
        let contact_email = input.contact_email.or(existing.contact_email);

        let warehouse = sqlx::query_as::<_, Warehouse>(
            r#"
            UPDATE warehouses
            SET name = $1, address = $2, zip = $3, city = $4, province = $5, country = $6,
                contact_name = $7, contact_phone = $8, contact_email = $9, updated_at = NOW()
            WHERE id = $10
            RETURNING id, code, name, address, zip, city, province, country,
                      contact_name, contact_phone, contact_email, created_at, updated_at,
                      is_deleted
            "#,
        )
        .bind(&name)
        .bind(&address)
        .bind(&zip)
        .bind(&city)
        .bind(&province)
        .bind(&country)
        .bind(&contact_name)
        .bind(&contact_phone)
        .bind(&contact_email)
        .bind(warehouse_id)
        .fetch_one(&self.db)
        .await?;

        Ok(warehouse)
    }

    /// Soft-delete a warehouse
    pub async fn delete(&self, warehouse_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE warehouses SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(warehouse_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Warehouse".to_string()));
        }

        Ok(())
    }
}
