//! Helpers for repository tests that run against a real database
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p devcap-server -- --ignored

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    BandInput, DeviceInput, NewBand, NewDevice, NewProvider, ProviderInput,
};

use super::{Band, BandRepo, Device, DeviceRepo, Provider, ProviderRepo};

/// Connect and migrate.
pub async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = super::create_pool(&url).await.expect("pool creation failed");
    super::schema::run(&pool).await.expect("migrations failed");
    pool
}

/// Short random suffix so parallel tests never collide on unique keys.
pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..12])
}

pub async fn device(pool: &PgPool, vendor: &str) -> Device {
    let input = NewDevice::try_from(DeviceInput {
        vendor: vendor.to_owned(),
        model_num: unique("MODEL"),
        market_name: Some(unique("Market")),
    })
    .unwrap();
    DeviceRepo::new(pool).create(input).await.unwrap()
}

/// Bands are unique per (technology, number); a random technology keeps them apart.
pub async fn band(pool: &PgPool, band_number: i32) -> Band {
    let technology = format!("T{}", &Uuid::new_v4().simple().to_string()[..8].to_uppercase());
    let input = NewBand::try_from(BandInput {
        technology,
        band_number,
    })
    .unwrap();
    BandRepo::new(pool).create(input).await.unwrap()
}

pub async fn provider(pool: &PgPool) -> Provider {
    let input = NewProvider::try_from(ProviderInput {
        name: unique("carrier"),
        country: "US".into(),
    })
    .unwrap();
    ProviderRepo::new(pool).create(input).await.unwrap()
}
