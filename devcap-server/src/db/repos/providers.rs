//! Provider repository - carriers that scope band support

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;
use crate::models::NewProvider;

/// Provider record from database
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
}

/// Provider repository
pub struct ProviderRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ProviderRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Provider>, DbError> {
        let providers = sqlx::query_as::<_, Provider>(
            "SELECT id, name, country, created_at FROM providers ORDER BY name, country",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(providers)
    }

    pub async fn get(&self, id: Uuid) -> Result<Provider, DbError> {
        sqlx::query_as::<_, Provider>(
            "SELECT id, name, country, created_at FROM providers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("provider", id))
    }

    pub async fn create(&self, provider: NewProvider) -> Result<Provider, DbError> {
        let provider = sqlx::query_as::<_, Provider>(
            r#"
            INSERT INTO providers (name, country)
            VALUES ($1, $2)
            RETURNING id, name, country, created_at
            "#,
        )
        .bind(provider.name.as_str())
        .bind(provider.country.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(provider)
    }

    pub async fn update(&self, id: Uuid, provider: NewProvider) -> Result<Provider, DbError> {
        sqlx::query_as::<_, Provider>(
            r#"
            UPDATE providers
            SET name = $2, country = $3
            WHERE id = $1
            RETURNING id, name, country, created_at
            "#,
        )
        .bind(id)
        .bind(provider.name.as_str())
        .bind(provider.country.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("provider", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn find_all_includes_created() {
        let pool = testing::pool().await;
        let provider = testing::provider(&pool).await;

        let all = ProviderRepo::new(&pool).find_all().await.unwrap();
        assert!(all.iter().any(|p| p.id == provider.id && p.country == "US"));
    }
}
