//! Environment configuration
//!
//! All variables are validated in one pass so that every problem is reported
//! at once. Empty values count as unset.
//!
//! Environment variables:
//!   DATABASE_URL      # required, postgres:// or postgresql:// URL
//!   DB_HOST           # default: localhost
//!   DB_PORT           # default: 5432
//!   DB_NAME           # required
//!   DB_USER           # required
//!   DB_PASSWORD       # required
//!   PORT              # HTTP port (default: 3000)
//!   APP_ENV           # development | production | test (default: development)
//!   NODE_ENV          # accepted when APP_ENV is unset
//!   CORS_ORIGIN       # "*" or comma-separated origins (default: *)
//!   LOG_LEVEL         # error | warn | info | debug | trace (default: info)
//!   STATIC_DIR        # optional directory of frontend assets

use std::collections::HashMap;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;
use url::Url;

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_PORT: u16 = 3000;

/// Deployment environment; decides how much error detail reaches clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" => Some(Self::Development),
            "production" => Some(Self::Production),
            "test" => Some(Self::Test),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }

    /// Whether error responses may carry internal messages and stacks.
    pub fn exposes_internals(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Log verbosity accepted in `LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warn" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }

    /// Directive usable in a tracing `EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Allowed CORS origins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigin {
    Any,
    List(Vec<HeaderValue>),
}

/// Discrete database connection settings
#[derive(Clone)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"****")
            .finish()
    }
}

/// Validated application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub db: DbSettings,
    pub port: u16,
    pub environment: Environment,
    pub cors_origin: CorsOrigin,
    pub log_level: LogLevel,
    pub static_dir: Option<PathBuf>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url_redacted())
            .field("db", &self.db)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("cors_origin", &self.cors_origin)
            .field("log_level", &self.log_level)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

/// A single configuration problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid environment configuration ({} violation(s))", .0.len())]
    Invalid(Vec<Violation>),
}

impl ConfigError {
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Invalid(v) => v,
        }
    }
}

impl Config {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Validate configuration from an explicit set of variables.
    ///
    /// # Example
    /// ```
    /// use devcap_server::config::Config;
    ///
    /// let err = Config::from_vars([("PORT", "8080")]).unwrap_err();
    /// let fields: Vec<_> = err.violations().iter().map(|v| v.field).collect();
    /// assert!(fields.contains(&"DATABASE_URL"));
    /// assert!(fields.contains(&"DB_PASSWORD"));
    /// ```
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();
        let mut violations = Vec::new();

        let database_url = required(&vars, "DATABASE_URL", &mut violations)
            .and_then(|raw| match validate_database_url(&raw) {
                Ok(()) => Some(raw),
                Err(message) => {
                    violations.push(Violation {
                        field: "DATABASE_URL",
                        message,
                    });
                    None
                }
            });

        let host = vars
            .get("DB_HOST")
            .cloned()
            .unwrap_or_else(|| DEFAULT_DB_HOST.to_owned());
        let db_port = port(&vars, "DB_PORT", DEFAULT_DB_PORT, &mut violations);
        let name = required(&vars, "DB_NAME", &mut violations);
        let user = required(&vars, "DB_USER", &mut violations);
        let password = required(&vars, "DB_PASSWORD", &mut violations);
        let http_port = port(&vars, "PORT", DEFAULT_PORT, &mut violations);

        let (env_field, env_raw) = match vars.get("APP_ENV") {
            Some(v) => ("APP_ENV", Some(v)),
            None => ("NODE_ENV", vars.get("NODE_ENV")),
        };
        let environment = match env_raw {
            None => Some(Environment::default()),
            Some(raw) => Environment::parse(raw).or_else(|| {
                violations.push(Violation {
                    field: env_field,
                    message: format!(
                        "expected one of development, production, test; got '{}'",
                        raw
                    ),
                });
                None
            }),
        };

        let cors_origin = match vars.get("CORS_ORIGIN") {
            None => Some(CorsOrigin::Any),
            Some(raw) => match parse_cors_origin(raw) {
                Ok(origin) => Some(origin),
                Err(message) => {
                    violations.push(Violation {
                        field: "CORS_ORIGIN",
                        message,
                    });
                    None
                }
            },
        };

        let log_level = match vars.get("LOG_LEVEL") {
            None => Some(LogLevel::default()),
            Some(raw) => LogLevel::parse(raw).or_else(|| {
                violations.push(Violation {
                    field: "LOG_LEVEL",
                    message: format!(
                        "expected one of error, warn, info, debug, trace; got '{}'",
                        raw
                    ),
                });
                None
            }),
        };

        let static_dir = vars.get("STATIC_DIR").map(PathBuf::from);

        match (
            database_url,
            db_port,
            name,
            user,
            password,
            http_port,
            environment,
            cors_origin,
            log_level,
        ) {
            (
                Some(database_url),
                Some(db_port),
                Some(name),
                Some(user),
                Some(password),
                Some(port),
                Some(environment),
                Some(cors_origin),
                Some(log_level),
            ) if violations.is_empty() => Ok(Self {
                database_url,
                db: DbSettings {
                    host,
                    port: db_port,
                    name,
                    user,
                    password,
                },
                port,
                environment,
                cors_origin,
                log_level,
                static_dir,
            }),
            _ => Err(ConfigError::Invalid(violations)),
        }
    }

    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// `DATABASE_URL` with any password masked, for logs.
    pub fn database_url_redacted(&self) -> String {
        match Url::parse(&self.database_url) {
            Ok(mut url) if url.password().is_some() => {
                let _ = url.set_password(Some("****"));
                url.to_string()
            }
            Ok(url) => url.to_string(),
            Err(_) => "<invalid>".to_owned(),
        }
    }
}

fn required(
    vars: &HashMap<String, String>,
    field: &'static str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    let value = vars.get(field).cloned();
    if value.is_none() {
        violations.push(Violation {
            field,
            message: "is required".to_owned(),
        });
    }
    value
}

fn port(
    vars: &HashMap<String, String>,
    field: &'static str,
    default: u16,
    violations: &mut Vec<Violation>,
) -> Option<u16> {
    let Some(raw) = vars.get(field) else {
        return Some(default);
    };
    match raw.trim().parse::<u16>() {
        Ok(p) if p > 0 => Some(p),
        _ => {
            violations.push(Violation {
                field,
                message: format!("expected a port number between 1 and 65535; got '{}'", raw),
            });
            None
        }
    }
}

fn validate_database_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("not a valid URL: {}", e))?;
    match url.scheme() {
        "postgres" | "postgresql" => Ok(()),
        other => Err(format!(
            "expected a postgres:// or postgresql:// URL; got scheme '{}'",
            other
        )),
    }
}

fn parse_cors_origin(raw: &str) -> Result<CorsOrigin, String> {
    let raw = raw.trim();
    if raw == "*" {
        return Ok(CorsOrigin::Any);
    }

    let mut origins = Vec::new();
    for origin in raw.split(',').map(str::trim).filter(|o| !o.is_empty()) {
        let url = Url::parse(origin).map_err(|_| format!("'{}' is not a valid origin", origin))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("'{}' must use http or https", origin));
        }
        let value = HeaderValue::from_str(origin.trim_end_matches('/'))
            .map_err(|_| format!("'{}' is not a valid header value", origin))?;
        origins.push(value);
    }

    if origins.is_empty() {
        return Err("no origins given".to_owned());
    }
    Ok(CorsOrigin::List(origins))
}
