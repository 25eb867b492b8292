//! Device repository
//!
//! Search by vendor / model / market name, CRUD, and the junction upserts
//! that attach bands, combos and features to a device.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;
use crate::models::{contains_pattern, DeviceSearch, NewDevice, SupportStatus};

/// Device record from database
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: Uuid,
    pub vendor: String,
    pub model_num: String,
    pub market_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Device repository
pub struct DeviceRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> DeviceRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Search devices by case-insensitive substrings.
    ///
    /// Absent criteria are unconstrained, so an empty search lists every device.
    pub async fn search(&self, criteria: &DeviceSearch) -> Result<Vec<Device>, DbError> {
        let devices = sqlx::query_as::<_, Device>(
            r#"
            SELECT id, vendor, model_num, market_name, created_at, updated_at
            FROM devices
            WHERE ($1::text IS NULL OR vendor ILIKE $1 ESCAPE '\')
              AND ($2::text IS NULL OR model_num ILIKE $2 ESCAPE '\')
              AND ($3::text IS NULL OR market_name ILIKE $3 ESCAPE '\')
            ORDER BY vendor, model_num
            "#,
        )
        .bind(contains_pattern(criteria.vendor.as_deref()))
        .bind(contains_pattern(criteria.model.as_deref()))
        .bind(contains_pattern(criteria.market_name.as_deref()))
        .fetch_all(self.pool)
        .await?;

        Ok(devices)
    }

    /// Get a single device by ID.
    pub async fn get(&self, id: Uuid) -> Result<Device, DbError> {
        sqlx::query_as::<_, Device>(
            r#"
            SELECT id, vendor, model_num, market_name, created_at, updated_at
            FROM devices
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("device", id))
    }

    /// Create a device. Duplicate (vendor, model number) is a conflict.
    pub async fn create(&self, device: NewDevice) -> Result<Device, DbError> {
        let device = sqlx::query_as::<_, Device>(
            r#"
            INSERT INTO devices (vendor, model_num, market_name)
            VALUES ($1, $2, $3)
            RETURNING id, vendor, model_num, market_name, created_at, updated_at
            "#,
        )
        .bind(device.vendor.as_str())
        .bind(device.model_num.as_str())
        .bind(device.market_name.as_ref().map(|m| m.as_str()))
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(device_id = %device.id, "device created");
        Ok(device)
    }

    /// Replace a device's fields.
    pub async fn update(&self, id: Uuid, device: NewDevice) -> Result<Device, DbError> {
        sqlx::query_as::<_, Device>(
            r#"
            UPDATE devices
            SET vendor = $2, model_num = $3, market_name = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, vendor, model_num, market_name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(device.vendor.as_str())
        .bind(device.model_num.as_str())
        .bind(device.market_name.as_ref().map(|m| m.as_str()))
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("device", id))
    }

    /// Delete a device; software and capability rows cascade.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("device", id));
        }
        tracing::debug!(device_id = %id, "device deleted");
        Ok(())
    }

    /// Record band support, globally or for one provider.
    ///
    /// Re-adding the same (device, band, provider) updates the status.
    pub async fn add_band(
        &self,
        device_id: Uuid,
        band_id: Uuid,
        provider_id: Option<Uuid>,
        status: SupportStatus,
    ) -> Result<(), DbError> {
        // The two partial unique indexes need distinct conflict targets
        let sql = if provider_id.is_some() {
            r#"
            INSERT INTO device_bands (device_id, band_id, provider_id, support_status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (device_id, band_id, provider_id) WHERE provider_id IS NOT NULL
            DO UPDATE SET support_status = EXCLUDED.support_status
            "#
        } else {
            r#"
            INSERT INTO device_bands (device_id, band_id, provider_id, support_status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (device_id, band_id) WHERE provider_id IS NULL
            DO UPDATE SET support_status = EXCLUDED.support_status
            "#
        };

        sqlx::query(sql)
            .bind(device_id)
            .bind(band_id)
            .bind(provider_id)
            .bind(status.as_str())
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Record combo support (idempotent).
    pub async fn add_combo(&self, device_id: Uuid, combo_id: Uuid) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO device_combos (device_id, combo_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(device_id)
        .bind(combo_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Record feature support (idempotent).
    pub async fn add_feature(&self, device_id: Uuid, feature_id: Uuid) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO device_features (device_id, feature_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(device_id)
        .bind(feature_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
