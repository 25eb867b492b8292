//! Schema migration command

use anyhow::{Context, Result};

use devcap_server::config::Config;
use devcap_server::db::{create_pool, schema};

/// Create any missing tables and indexes, then exit.
pub async fn run_migrate(config: &Config) -> Result<()> {
    let pool = create_pool(&config.database_url)
        .await
        .context("Failed to create database pool")?;

    schema::run(&pool)
        .await
        .context("Failed to apply database schema")?;

    tracing::info!(database = %config.database_url_redacted(), "Schema is up to date");
    pool.close().await;
    Ok(())
}
