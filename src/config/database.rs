//! PostgreSQL pool settings.

use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for `max_connections`.
pub const POOL_LIMIT: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "DatabaseConfig::default_min")]
    pub min_connections: u32,

    #[serde(default = "DatabaseConfig::default_max")]
    pub max_connections: u32,

    /// Seconds a caller waits for a pooled connection.
    #[serde(default = "DatabaseConfig::default_acquire_secs")]
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    fn default_min() -> u32 {
        2
    }

    fn default_max() -> u32 {
        10
    }

    fn default_acquire_secs() -> u64 {
        5
    }

    /// Pool options carrying these limits; the caller connects.
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .min_connections(self.min_connections)
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let (min, max) = (self.min_connections, self.max_connections);
        match self.url.split_once("://") {
            _ if self.url.trim().is_empty() => Err(ValidationError::Missing("database.url")),
            Some(("postgres" | "postgresql", _)) => Ok(()),
            _ => Err(ValidationError::DatabaseScheme),
        }?;
        if min > max {
            return Err(ValidationError::PoolBounds { min, max });
        }
        if max > POOL_LIMIT {
            return Err(ValidationError::PoolTooLarge {
                requested: max,
                limit: POOL_LIMIT,
            });
        }
        if self.acquire_timeout_secs == 0 {
            return Err(ValidationError::Zero("database.acquire_timeout_secs"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            min_connections: DatabaseConfig::default_min(),
            max_connections: DatabaseConfig::default_max(),
            acquire_timeout_secs: DatabaseConfig::default_acquire_secs(),
        }
    }

    #[test]
    fn url_scheme_must_be_postgres() {
        assert_eq!(with_url("postgres://db/market").validate(), Ok(()));
        assert_eq!(with_url("postgresql://db/market").validate(), Ok(()));
        assert_eq!(
            with_url("mysql://db/market").validate(),
            Err(ValidationError::DatabaseScheme)
        );
        assert_eq!(
            with_url(" ").validate(),
            Err(ValidationError::Missing("database.url"))
        );
    }

    #[test]
    fn pool_size_is_bounded() {
        let mut config = with_url("postgres://db/market");
        config.min_connections = 12;
        assert_eq!(
            config.validate(),
            Err(ValidationError::PoolBounds { min: 12, max: 10 })
        );

        config.min_connections = 1;
        config.max_connections = 250;
        assert_eq!(
            config.validate(),
            Err(ValidationError::PoolTooLarge {
                requested: 250,
                limit: POOL_LIMIT
            })
        );
    }

    #[test]
    fn acquire_timeout_cannot_be_zero() {
        let mut config = with_url("postgres://db/market");
        config.acquire_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ValidationError::Zero(_))));
    }
}
