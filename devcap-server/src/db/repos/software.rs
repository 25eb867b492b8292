//! Software repository
//!
//! Software versions belong to exactly one device.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;
use crate::models::NewSoftware;

/// Software version record
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Software {
    pub id: Uuid,
    pub device_id: Uuid,
    pub name: String,
    pub platform: String,
    pub svn: i32,
    pub ptcrb: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Software repository
pub struct SoftwareRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SoftwareRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All software for a device, newest SVN first.
    ///
    /// The device id is not checked; an unknown device yields an empty list.
    pub async fn find_by_device(&self, device_id: Uuid) -> Result<Vec<Software>, DbError> {
        let software = sqlx::query_as::<_, Software>(
            r#"
            SELECT id, device_id, name, platform, svn, ptcrb, created_at, updated_at
            FROM software
            WHERE device_id = $1
            ORDER BY svn DESC, name
            "#,
        )
        .bind(device_id)
        .fetch_all(self.pool)
        .await?;

        Ok(software)
    }

    pub async fn get(&self, id: Uuid) -> Result<Software, DbError> {
        sqlx::query_as::<_, Software>(
            r#"
            SELECT id, device_id, name, platform, svn, ptcrb, created_at, updated_at
            FROM software
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("software", id))
    }

    /// Create software for a device. An unknown device maps to NotFound
    /// through the foreign key.
    pub async fn create(
        &self,
        device_id: Uuid,
        software: NewSoftware,
    ) -> Result<Software, DbError> {
        let software = sqlx::query_as::<_, Software>(
            r#"
            INSERT INTO software (device_id, name, platform, svn, ptcrb)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, device_id, name, platform, svn, ptcrb, created_at, updated_at
            "#,
        )
        .bind(device_id)
        .bind(software.name.as_str())
        .bind(software.platform.as_str())
        .bind(software.svn)
        .bind(software.ptcrb)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(software_id = %software.id, device_id = %device_id, "software created");
        Ok(software)
    }

    /// Replace a software row's fields. The owning device never changes.
    pub async fn update(&self, id: Uuid, software: NewSoftware) -> Result<Software, DbError> {
        sqlx::query_as::<_, Software>(
            r#"
            UPDATE software
            SET name = $2, platform = $3, svn = $4, ptcrb = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, device_id, name, platform, svn, ptcrb, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(software.name.as_str())
        .bind(software.platform.as_str())
        .bind(software.svn)
        .bind(software.ptcrb)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("software", id))
    }
}
