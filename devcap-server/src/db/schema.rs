//! Schema migrations for the device catalog
//!
//! Every statement is idempotent, so `run` is safe on each startup.

use sqlx::PgPool;

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS devices (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        vendor TEXT NOT NULL,
        model_num TEXT NOT NULL,
        market_name TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        UNIQUE (vendor, model_num)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS software (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        device_id UUID NOT NULL REFERENCES devices(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        platform TEXT NOT NULL,
        svn INTEGER NOT NULL CHECK (svn >= 0),
        ptcrb INTEGER CHECK (ptcrb > 0),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bands (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        technology TEXT NOT NULL,
        band_number INTEGER NOT NULL CHECK (band_number > 0),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        UNIQUE (technology, band_number)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS combos (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name TEXT NOT NULL UNIQUE,
        technology TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS features (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name TEXT NOT NULL UNIQUE,
        description TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS providers (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name TEXT NOT NULL,
        country TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        UNIQUE (name, country)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS device_bands (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        device_id UUID NOT NULL REFERENCES devices(id) ON DELETE CASCADE,
        band_id UUID NOT NULL REFERENCES bands(id) ON DELETE CASCADE,
        provider_id UUID REFERENCES providers(id) ON DELETE CASCADE,
        support_status TEXT NOT NULL DEFAULT 'supported'
            CHECK (support_status IN ('supported', 'unsupported', 'partial'))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS device_combos (
        device_id UUID NOT NULL REFERENCES devices(id) ON DELETE CASCADE,
        combo_id UUID NOT NULL REFERENCES combos(id) ON DELETE CASCADE,
        PRIMARY KEY (device_id, combo_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS device_features (
        device_id UUID NOT NULL REFERENCES devices(id) ON DELETE CASCADE,
        feature_id UUID NOT NULL REFERENCES features(id) ON DELETE CASCADE,
        PRIMARY KEY (device_id, feature_id)
    )
    "#,
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_software_device ON software(device_id)",
    // One global row per (device, band); one row per provider otherwise
    "CREATE UNIQUE INDEX IF NOT EXISTS uq_device_bands_global \
     ON device_bands(device_id, band_id) WHERE provider_id IS NULL",
    "CREATE UNIQUE INDEX IF NOT EXISTS uq_device_bands_provider \
     ON device_bands(device_id, band_id, provider_id) WHERE provider_id IS NOT NULL",
    "CREATE INDEX IF NOT EXISTS idx_device_bands_band ON device_bands(band_id, provider_id)",
    "CREATE INDEX IF NOT EXISTS idx_device_combos_combo ON device_combos(combo_id)",
    "CREATE INDEX IF NOT EXISTS idx_device_features_feature ON device_features(feature_id)",
];

/// Create all tables and indexes in a single transaction.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running schema migrations...");

    let mut tx = pool.begin().await?;
    for statement in TABLES.iter().chain(INDEXES) {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!(
        tables = TABLES.len(),
        indexes = INDEXES.len(),
        "Schema migrations complete"
    );
    Ok(())
}
