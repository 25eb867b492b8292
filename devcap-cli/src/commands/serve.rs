//! HTTP server command
//!
//! Applies the schema, then serves the API until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;

use devcap_server::config::Config;
use devcap_server::db::{create_pool, schema};
use devcap_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on (overrides PORT)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &Config) -> Result<()> {
    let mut server = ServerConfig::from(config);
    if let Some(port) = args.port {
        server.bind_addr.set_port(port);
    }

    tracing::info!(
        database = %config.database_url_redacted(),
        "Starting devcap server on {}",
        server.bind_addr
    );

    let pool = create_pool(&config.database_url)
        .await
        .context("Failed to create database pool")?;

    schema::run(&pool)
        .await
        .context("Failed to apply database schema")?;

    // Blocks until shutdown
    run_server(pool, server).await.context("Server error")?;

    Ok(())
}
