//! Load configuration from the process environment (after `.env`) or any key lookup.

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::str::FromStr;

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        }),
        _ => Ok(default),
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(format!("{} (expected postgres or memory)", s)),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("{} (expected compact or json)", s)),
        }
    }
}

/// Build config from a key lookup. Unset or blank keys take defaults. Validates the result.
pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<ServiceConfig, ConfigError> {
    let defaults = ServiceConfig::default();
    let server = ServerConfig {
        host: lookup("SERVER_HOST")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.server.host),
        port: parsed(&lookup, "SERVER_PORT", defaults.server.port)?,
        api_prefix: lookup("API_PREFIX").unwrap_or(defaults.server.api_prefix),
        body_limit_bytes: parsed(&lookup, "BODY_LIMIT_BYTES", defaults.server.body_limit_bytes)?,
    };
    let database = DatabaseConfig {
        backend: parsed(&lookup, "STORAGE_BACKEND", defaults.database.backend)?,
        url: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
        schema: lookup("DATABASE_SCHEMA")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.database.schema),
        max_connections: parsed(&lookup, "DATABASE_MAX_CONNECTIONS", defaults.database.max_connections)?,
    };
    let log = LogConfig {
        format: parsed(&lookup, "LOG_FORMAT", defaults.log.format)?,
        default_filter: defaults.log.default_filter,
    };
    let config = ServiceConfig { server, database, log };
    validate(&config)?;
    Ok(config)
}

/// Load `.env` if present, then read the process environment.
pub fn load_from_env() -> Result<ServiceConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_with(|key| std::env::var(key).ok())
}
