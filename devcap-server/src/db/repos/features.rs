//! Feature repository

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{DbError, Device};
use crate::models::NewFeature;

/// Feature record from database
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Feature repository
pub struct FeatureRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> FeatureRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Feature>, DbError> {
        let features = sqlx::query_as::<_, Feature>(
            "SELECT id, name, description, created_at FROM features ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(features)
    }

    pub async fn get(&self, id: Uuid) -> Result<Feature, DbError> {
        sqlx::query_as::<_, Feature>(
            "SELECT id, name, description, created_at FROM features WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("feature", id))
    }

    pub async fn create(&self, feature: NewFeature) -> Result<Feature, DbError> {
        let feature = sqlx::query_as::<_, Feature>(
            r#"
            INSERT INTO features (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(feature.name.as_str())
        .bind(feature.description.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(feature)
    }

    pub async fn update(&self, id: Uuid, feature: NewFeature) -> Result<Feature, DbError> {
        sqlx::query_as::<_, Feature>(
            r#"
            UPDATE features
            SET name = $2, description = $3
            WHERE id = $1
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(id)
        .bind(feature.name.as_str())
        .bind(feature.description.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("feature", id))
    }

    pub async fn find_by_device(&self, device_id: Uuid) -> Result<Vec<Feature>, DbError> {
        let features = sqlx::query_as::<_, Feature>(
            r#"
            SELECT f.id, f.name, f.description, f.created_at
            FROM features f
            JOIN device_features df ON df.feature_id = f.id
            WHERE df.device_id = $1
            ORDER BY f.name
            "#,
        )
        .bind(device_id)
        .fetch_all(self.pool)
        .await?;

        Ok(features)
    }

    pub async fn find_devices_supporting_feature(
        &self,
        feature_id: Uuid,
    ) -> Result<Vec<Device>, DbError> {
        let devices = sqlx::query_as::<_, Device>(
            r#"
            SELECT d.id, d.vendor, d.model_num, d.market_name, d.created_at, d.updated_at
            FROM devices d
            JOIN device_features df ON df.device_id = d.id
            WHERE df.feature_id = $1
            ORDER BY d.vendor, d.model_num
            "#,
        )
        .bind(feature_id)
        .fetch_all(self.pool)
        .await?;

        Ok(devices)
    }
}
