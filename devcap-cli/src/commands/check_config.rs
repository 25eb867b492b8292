//! Print the effective configuration without touching the database

use anyhow::Result;

use devcap_server::config::{Config, CorsOrigin};

/// Human-readable summary of a validated configuration, secrets masked
pub fn summary(config: &Config) -> Vec<(&'static str, String)> {
    let cors = match &config.cors_origin {
        CorsOrigin::Any => "*".to_owned(),
        CorsOrigin::List(origins) => origins
            .iter()
            .filter_map(|o| o.to_str().ok())
            .collect::<Vec<_>>()
            .join(","),
    };

    vec![
        ("DATABASE_URL", config.database_url_redacted()),
        ("DB_HOST", config.db.host.clone()),
        ("DB_PORT", config.db.port.to_string()),
        ("DB_NAME", config.db.name.clone()),
        ("DB_USER", config.db.user.clone()),
        ("PORT", config.port.to_string()),
        ("APP_ENV", config.environment.as_str().to_owned()),
        ("CORS_ORIGIN", cors),
        ("LOG_LEVEL", config.log_level.as_str().to_owned()),
        (
            "STATIC_DIR",
            config
                .static_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unset)".to_owned()),
        ),
    ]
}

pub fn run_check_config(config: &Config) -> Result<()> {
    for (key, value) in summary(config) {
        println!("{:<13} {}", key, value);
    }
    println!("configuration OK");
    Ok(())
}
