//! Supplier management service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::item::Item;

/// Supplier service for sourcing parties
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// Supplier record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Supplier {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub address: String,
    pub address_extra: Option<String>,
    pub city: String,
    pub zip_code: String,
    pub province: Option<String>,
    pub country: String,
    pub contact_name: Option<String>,
    pub phonenumber: Option<String>,
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// Input for creating a supplier
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSupplierInput {
    pub code: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    pub address_extra: Option<String>,
    pub city: String,
    pub zip_code: String,
    pub province: Option<String>,
    pub country: String,
    pub contact_name: Option<String>,
    pub phonenumber: Option<String>,
    pub reference: Option<String>,
}

/// Input for updating a supplier
#[derive(Debug, Deserialize)]
pub struct UpdateSupplierInput {
    pub name: Option<String>,
    pub address: Option<String>,
    pub address_extra: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub contact_name: Option<String>,
    pub phonenumber: Option<String>,
    pub reference: Option<String>,
}

impl SupplierService {
    /// Create a new SupplierService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all suppliers
    pub async fn list(&self) -> AppResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, code, name, address, address_extra, city, zip_code, province, country,
                   contact_name, phonenumber, reference, created_at, updated_at, is_deleted
            FROM suppliers
            WHERE is_deleted = FALSE
            ORDER BY code
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(suppliers)
    }

    /// Get a supplier by ID
    pub async fn get(&self, supplier_id: i64) -> AppResult<Supplier> {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, code, name, address, address_extra, city, zip_code, province, country,
                   contact_name, phonenumber, reference, created_at, updated_at, is_deleted
            FROM suppliers
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(supplier_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))?;

        Ok(supplier)
    }

    /// List the items sourced from a supplier
    pub async fn supplier_items(&self, supplier_id: i64) -> AppResult<Vec<Item>> {
        self.get(supplier_id).await?;

        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, reference, code, description, short_description, upc_code, model_number,
                   commodity_code, supplier_id, supplier_code, supplier_part_number,
                   unit_purchase_quantity, unit_order_quantity, pack_order_quantity,
                   created_at, updated_at, is_deleted
            FROM items
            WHERE supplier_id = $1 AND is_deleted = FALSE
            ORDER BY reference
            "#,
        )
        .bind(supplier_id)
        .fetch_all(&self.db)
        .await?;

        Ok(items)
    }

    /// Create a supplier
    pub async fn create(&self, input: CreateSupplierInput) -> AppResult<Supplier> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        shared::validate_entity_code(&input.code).map_err(|msg| AppError::Validation {
            field: "code".to_string(),
            message: msg.to_string(),
        })?;

        if let Some(phone) = &input.phonenumber {
            shared::validate_phone(phone).map_err(|msg| AppError::Validation {
                field: "phonenumber".to_string(),
                message: msg.to_string(),
            })?;
        }

        let code_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM suppliers WHERE code = $1)",
        )
        .bind(&input.code)
        .fetch_one(&self.db)
        .await?;

        if code_taken {
            return Err(AppError::DuplicateEntry("code".to_string()));
        }

        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (code, name, address, address_extra, city, zip_code, province,
                                   country, contact_name, phonenumber, reference)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, code, name, address, address_extra, city, zip_code, province, country,
                      contact_name, phonenumber, reference, created_at, updated_at, is_deleted
            "#,
        )
        .bind(&input.code)
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.address_extra)
        .bind(&input.city)
        .bind(&input.zip_code)
        .bind(&input.province)
        .bind(&input.country)
        .bind(&input.contact_name)
        .bind(&input.phonenumber)
        .bind(&input.reference)
        .fetch_one(&self.db)
        .await?;

        Ok(supplier)
    }

    /// Update a supplier through an explicit merge of the mutable fields
    pub async fn update(
        &self,
        supplier_id: i64,
        input: UpdateSupplierInput,
    ) -> AppResult<Supplier> {
        if let Some(phone) = &input.phonenumber {
            shared::validate_phone(phone).map_err(|msg| AppError::Validation {
                field: "phonenumber".to_string(),
                message: msg.to_string(),
            })?;
        }

        let existing = self.get(supplier_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let address = input.address.unwrap_or(existing.address);
        let address_extra = input.address_extra.or(existing.address_extra);
        let city = input.city.unwrap_or(existing.city);
        let zip_code = input.zip_code.unwrap_or(existing.zip_code);
        let province = input.province.or(existing.province);
        let country = input.country.unwrap_or(existing.country);
        let contact_name = input.contact_name.or(existing.contact_name);
        let phonenumber = input.phonenumber.or(existing.phonenumber);
        let reference = input.reference.or(existing.reference);

        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers
            SET name = $1, address = $2, address_extra = $3, city = $4, zip_code = $5,
                province = $6, country = $7, contact_name = $8, phonenumber = $9,
                reference = $10, updated_at = NOW()
            WHERE id = $11
            RETURNING id, code, name, address, address_extra, city, zip_code, province, country,
                      contact_name, phonenumber, reference, created_at, updated_at, is_deleted
            "#,
        )
        .bind(&name)
        .bind(&address)
        .bind(&address_extra)
        .bind(&city)
        .bind(&zip_code)
        .bind(&province)
        .bind(&country)
        .bind(&contact_name)
        .bind(&phonenumber)
        .bind(&reference)
        .bind(supplier_id)
        .fetch_one(&self.db)
        .await?;

        Ok(supplier)
    }

    /// Soft-delete a supplier
    pub async fn delete(&self, supplier_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE suppliers SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(supplier_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        Ok(())
    }
}
