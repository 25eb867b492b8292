//! Band repository
//!
//! Band support can be global (no provider) or scoped to a provider, in which
//! case each row carries a support status.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use super::{DbError, Device};
use crate::models::{BandSearch, BandSupportQuery, NewBand, SupportStatus};

/// Band record from database
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    pub id: Uuid,
    pub technology: String,
    pub band_number: i32,
    pub created_at: DateTime<Utc>,
}

/// One band support row of a device
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceBand {
    pub band_id: Uuid,
    pub technology: String,
    pub band_number: i32,
    pub provider_id: Option<Uuid>,
    pub support_status: SupportStatus,
}

/// Device returned by a band support lookup
///
/// `support_status` is present only for provider-scoped lookups.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportingDevice {
    #[serde(flatten)]
    pub device: Device,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_status: Option<SupportStatus>,
}

fn decode_status(row: &PgRow) -> Result<Option<SupportStatus>, sqlx::Error> {
    let raw: Option<String> = row.try_get("support_status")?;
    raw.map(|s| SupportStatus::parse(&s))
        .transpose()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: "support_status".into(),
            source: Box::new(e),
        })
}

impl<'r> FromRow<'r, PgRow> for DeviceBand {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            band_id: row.try_get("band_id")?,
            technology: row.try_get("technology")?,
            band_number: row.try_get("band_number")?,
            provider_id: row.try_get("provider_id")?,
            support_status: decode_status(row)?.unwrap_or_default(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SupportingDevice {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            device: Device::from_row(row)?,
            support_status: decode_status(row)?,
        })
    }
}

/// Band repository
pub struct BandRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BandRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Filter bands by technology and/or band number.
    pub async fn search(&self, criteria: &BandSearch) -> Result<Vec<Band>, DbError> {
        let bands = sqlx::query_as::<_, Band>(
            r#"
            SELECT id, technology, band_number, created_at
            FROM bands
            WHERE ($1::text IS NULL OR technology = $1)
              AND ($2::int IS NULL OR band_number = $2)
            ORDER BY technology, band_number
            "#,
        )
        .bind(criteria.technology())
        .bind(criteria.band_number)
        .fetch_all(self.pool)
        .await?;

        Ok(bands)
    }

    pub async fn get(&self, id: Uuid) -> Result<Band, DbError> {
        sqlx::query_as::<_, Band>(
            "SELECT id, technology, band_number, created_at FROM bands WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("band", id))
    }

    pub async fn create(&self, band: NewBand) -> Result<Band, DbError> {
        let band = sqlx::query_as::<_, Band>(
            r#"
            INSERT INTO bands (technology, band_number)
            VALUES ($1, $2)
            RETURNING id, technology, band_number, created_at
            "#,
        )
        .bind(band.technology.as_str())
        .bind(band.band_number)
        .fetch_one(self.pool)
        .await?;

        Ok(band)
    }

    pub async fn update(&self, id: Uuid, band: NewBand) -> Result<Band, DbError> {
        sqlx::query_as::<_, Band>(
            r#"
            UPDATE bands
            SET technology = $2, band_number = $3
            WHERE id = $1
            RETURNING id, technology, band_number, created_at
            "#,
        )
        .bind(id)
        .bind(band.technology.as_str())
        .bind(band.band_number)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("band", id))
    }

    /// Band support rows recorded for a device, global rows first.
    pub async fn find_by_device(&self, device_id: Uuid) -> Result<Vec<DeviceBand>, DbError> {
        let rows = sqlx::query_as::<_, DeviceBand>(
            r#"
            SELECT b.id AS band_id, b.technology, b.band_number,
                   db.provider_id, db.support_status
            FROM device_bands db
            JOIN bands b ON b.id = db.band_id
            WHERE db.device_id = $1
            ORDER BY b.technology, b.band_number, db.provider_id NULLS FIRST
            "#,
        )
        .bind(device_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Devices supporting a band.
    ///
    /// With a provider, only devices holding a row for that (band, provider)
    /// are returned, each with the row's support status. Without one, every
    /// device holding any row for the band counts, whether the row is global
    /// or scoped to some provider.
    pub async fn find_devices_supporting_band(
        &self,
        query: BandSupportQuery,
    ) -> Result<Vec<SupportingDevice>, DbError> {
        let devices = match query.provider_id {
            Some(provider_id) => {
                sqlx::query_as::<_, SupportingDevice>(
                    r#"
                    SELECT d.id, d.vendor, d.model_num, d.market_name,
                           d.created_at, d.updated_at, db.support_status
                    FROM devices d
                    JOIN device_bands db ON db.device_id = d.id
                    WHERE db.band_id = $1 AND db.provider_id = $2
                    ORDER BY d.vendor, d.model_num
                    "#,
                )
                .bind(query.band_id)
                .bind(provider_id)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, SupportingDevice>(
                    r#"
                    SELECT d.id, d.vendor, d.model_num, d.market_name,
                           d.created_at, d.updated_at, NULL::text AS support_status
                    FROM devices d
                    WHERE EXISTS (
                        SELECT 1 FROM device_bands db
                        WHERE db.device_id = d.id AND db.band_id = $1
                    )
                    ORDER BY d.vendor, d.model_num
                    "#,
                )
                .bind(query.band_id)
                .fetch_all(self.pool)
                .await?
            }
        };

        tracing::debug!(
            band_id = %query.band_id,
            provider_id = ?query.provider_id,
            count = devices.len(),
            "band support lookup"
        );
        Ok(devices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing;
    use crate::db::DeviceRepo;
    use crate::models::BandInput;

    #[test]
    fn supporting_device_omits_absent_status() {
        let device = Device {
            id: Uuid::nil(),
            vendor: "Acme".into(),
            model_num: "A1".into(),
            market_name: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let global = serde_json::to_value(SupportingDevice {
            device: device.clone(),
            support_status: None,
        })
        .unwrap();
        assert_eq!(global["vendor"], "Acme");
        assert!(global.get("supportStatus").is_none());

        let scoped = serde_json::to_value(SupportingDevice {
            device,
            support_status: Some(SupportStatus::Partial),
        })
        .unwrap();
        assert_eq!(scoped["supportStatus"], "partial");
        assert_eq!(scoped["modelNum"], "A1");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn provider_scoped_lookup_returns_only_that_provider() {
        let pool = testing::pool().await;
        let band = testing::band(&pool, 41).await;
        let tmo = testing::provider(&pool).await;
        let att = testing::provider(&pool).await;
        let scoped = testing::device(&pool, &testing::unique("Scoped")).await;
        let other = testing::device(&pool, &testing::unique("Other")).await;
        let global = testing::device(&pool, &testing::unique("Global")).await;

        let devices = DeviceRepo::new(&pool);
        devices
            .add_band(scoped.id, band.id, Some(tmo.id), SupportStatus::Partial)
            .await
            .unwrap();
        devices
            .add_band(other.id, band.id, Some(att.id), SupportStatus::Supported)
            .await
            .unwrap();
        devices
            .add_band(global.id, band.id, None, SupportStatus::Supported)
            .await
            .unwrap();

        let found = BandRepo::new(&pool)
            .find_devices_supporting_band(BandSupportQuery {
                band_id: band.id,
                provider_id: Some(tmo.id),
            })
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].device.id, scoped.id);
        assert_eq!(found[0].support_status, Some(SupportStatus::Partial));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn unscoped_lookup_is_union_of_all_rows() {
        let pool = testing::pool().await;
        let band = testing::band(&pool, 66).await;
        let provider = testing::provider(&pool).await;
        let scoped = testing::device(&pool, &testing::unique("Union")).await;
        let global = testing::device(&pool, &testing::unique("Union")).await;
        let both = testing::device(&pool, &testing::unique("Union")).await;
        testing::device(&pool, &testing::unique("Unrelated")).await;

        let devices = DeviceRepo::new(&pool);
        devices
            .add_band(scoped.id, band.id, Some(provider.id), SupportStatus::Supported)
            .await
            .unwrap();
        devices
            .add_band(global.id, band.id, None, SupportStatus::Supported)
            .await
            .unwrap();
        devices
            .add_band(both.id, band.id, None, SupportStatus::Supported)
            .await
            .unwrap();
        devices
            .add_band(both.id, band.id, Some(provider.id), SupportStatus::Unsupported)
            .await
            .unwrap();

        let found = BandRepo::new(&pool)
            .find_devices_supporting_band(BandSupportQuery {
                band_id: band.id,
                provider_id: None,
            })
            .await
            .unwrap();

        let mut ids: Vec<_> = found.iter().map(|d| d.device.id).collect();
        ids.sort();
        let mut expected = vec![scoped.id, global.id, both.id];
        expected.sort();
        assert_eq!(ids, expected);
        assert!(found.iter().all(|d| d.support_status.is_none()));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn search_by_technology_and_number() {
        let pool = testing::pool().await;
        let band = testing::band(&pool, 5).await;
        testing::band(&pool, 5).await;

        let found = BandRepo::new(&pool)
            .search(&BandSearch {
                technology: Some(band.technology.to_lowercase()),
                band_number: Some(5),
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, band.id);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_band_is_conflict() {
        let pool = testing::pool().await;
        let band = testing::band(&pool, 12).await;

        let again = NewBand::try_from(BandInput {
            technology: band.technology.clone(),
            band_number: 12,
        })
        .unwrap();
        let err = BandRepo::new(&pool).create(again).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict(_)));
    }
}
