//! Combo repository - band combinations, no provider dimension

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{DbError, Device};
use crate::models::{contains_pattern, ComboSearch, NewCombo};

/// Combo record from database
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Combo {
    pub id: Uuid,
    pub name: String,
    pub technology: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Combo repository
pub struct ComboRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ComboRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Filter combos by name substring.
    pub async fn search(&self, criteria: &ComboSearch) -> Result<Vec<Combo>, DbError> {
        let combos = sqlx::query_as::<_, Combo>(
            r#"
            SELECT id, name, technology, created_at
            FROM combos
            WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\')
            ORDER BY name
            "#,
        )
        .bind(contains_pattern(criteria.name.as_deref()))
        .fetch_all(self.pool)
        .await?;

        Ok(combos)
    }

    pub async fn get(&self, id: Uuid) -> Result<Combo, DbError> {
        sqlx::query_as::<_, Combo>(
            "SELECT id, name, technology, created_at FROM combos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("combo", id))
    }

    pub async fn create(&self, combo: NewCombo) -> Result<Combo, DbError> {
        let combo = sqlx::query_as::<_, Combo>(
            r#"
            INSERT INTO combos (name, technology)
            VALUES ($1, $2)
            RETURNING id, name, technology, created_at
            "#,
        )
        .bind(combo.name.as_str())
        .bind(combo.technology.as_ref().map(|t| t.as_str()))
        .fetch_one(self.pool)
        .await?;

        Ok(combo)
    }

    pub async fn update(&self, id: Uuid, combo: NewCombo) -> Result<Combo, DbError> {
        sqlx::query_as::<_, Combo>(
            r#"
            UPDATE combos
            SET name = $2, technology = $3
            WHERE id = $1
            RETURNING id, name, technology, created_at
            "#,
        )
        .bind(id)
        .bind(combo.name.as_str())
        .bind(combo.technology.as_ref().map(|t| t.as_str()))
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("combo", id))
    }

    /// Combos supported by a device.
    pub async fn find_by_device(&self, device_id: Uuid) -> Result<Vec<Combo>, DbError> {
        let combos = sqlx::query_as::<_, Combo>(
            r#"
            SELECT c.id, c.name, c.technology, c.created_at
            FROM combos c
            JOIN device_combos dc ON dc.combo_id = c.id
            WHERE dc.device_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(device_id)
        .fetch_all(self.pool)
        .await?;

        Ok(combos)
    }

    /// Devices supporting a combo.
    pub async fn find_devices_supporting_combo(
        &self,
        combo_id: Uuid,
    ) -> Result<Vec<Device>, DbError> {
        let devices = sqlx::query_as::<_, Device>(
            r#"
            SELECT d.id, d.vendor, d.model_num, d.market_name, d.created_at, d.updated_at
            FROM devices d
            JOIN device_combos dc ON dc.device_id = d.id
            WHERE dc.combo_id = $1
            ORDER BY d.vendor, d.model_num
            "#,
        )
        .bind(combo_id)
        .fetch_all(self.pool)
        .await?;

        Ok(devices)
    }
}
