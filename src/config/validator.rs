//! Config validation: required settings per backend and value ranges.

use crate::config::{ServiceConfig, StorageBackend};
use crate::error::ConfigError;

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn validate(config: &ServiceConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::Validation("SERVER_PORT must be in 1..=65535".into()));
    }
    let prefix = &config.server.api_prefix;
    if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
        return Err(ConfigError::Validation(format!(
            "API_PREFIX must start with '/' and not end with '/': {}",
            prefix
        )));
    }
    if config.server.body_limit_bytes == 0 {
        return Err(ConfigError::Validation("BODY_LIMIT_BYTES must be positive".into()));
    }

    let db = &config.database;
    if db.backend == StorageBackend::Postgres {
        let url = db.url.as_deref().ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let lower = url.to_lowercase();
        if !(lower.starts_with("postgres://") || lower.starts_with("postgresql://")) {
            return Err(ConfigError::Validation(
                "DATABASE_URL must start with postgres:// or postgresql://".into(),
            ));
        }
        if db.max_connections == 0 {
            return Err(ConfigError::Validation("DATABASE_MAX_CONNECTIONS must be >= 1".into()));
        }
        if !is_identifier(&db.schema) {
            return Err(ConfigError::Validation(format!(
                "DATABASE_SCHEMA must be a plain identifier: {}",
                db.schema
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postgres(url: &str) -> ServiceConfig {
        let mut cfg = ServiceConfig::default();
        cfg.database.url = Some(url.into());
        cfg
    }

    #[test]
    fn postgres_requires_url() {
        let err = validate(&ServiceConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
        assert!(validate(&postgres("postgresql://db/customers")).is_ok());
        assert!(validate(&postgres("mysql://db/customers")).is_err());
    }

    #[test]
    fn prefix_shape() {
        let mut cfg = postgres("postgres://db/customers");
        cfg.server.api_prefix = "/api".into();
        assert!(validate(&cfg).is_ok());
        cfg.server.api_prefix = "api".into();
        assert!(validate(&cfg).is_err());
        cfg.server.api_prefix = "/api/".into();
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn schema_must_be_identifier() {
        let mut cfg = postgres("postgres://db/customers");
        cfg.database.schema = "crm; drop".into();
        assert!(validate(&cfg).is_err());
        cfg.database.schema = "crm_2".into();
        assert!(validate(&cfg).is_ok());
    }
}
