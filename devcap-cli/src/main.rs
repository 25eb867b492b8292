//! devcap: device capability catalogue server

use clap::{Parser, Subcommand};

use devcap_server::config::{Config, ConfigError};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "devcap",
    author,
    version,
    about = "Catalogue of device band, combo and feature support",
    long_about = "Serve the devcap JSON API over Postgres. Configuration is read from the \
                  environment, after loading a .env file from the working directory if present."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply the schema and run the HTTP server
    Serve(commands::serve::ServeArgs),

    /// Apply the schema and exit
    Migrate,

    /// Validate the environment and print the effective configuration
    CheckConfig,
}

/// Log every violation and exit with status 1.
fn exit_invalid_config(err: &ConfigError) -> ! {
    tracing_setup::init(&TracingConfig::default()).ok();
    for violation in err.violations() {
        tracing::error!(field = violation.field, "{}", violation);
    }
    tracing::error!("{}", err);
    std::process::exit(1)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => exit_invalid_config(&err),
    };
    tracing_setup::init(&TracingConfig::from(&config)).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, &config).await?,
        Commands::Migrate => commands::run_migrate(&config).await?,
        Commands::CheckConfig => commands::run_check_config(&config)?,
    }

    Ok(())
}
