use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The environment could not be read or did not deserialize.
    #[error("cannot load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// A setting that parsed but cannot be used as given.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("database.url must use the postgres:// or postgresql:// scheme")]
    DatabaseScheme,

    #[error("database.min_connections ({min}) is above max_connections ({max})")]
    PoolBounds { min: u32, max: u32 },

    #[error("database.max_connections ({requested}) exceeds the limit of {limit}")]
    PoolTooLarge { requested: u32, limit: u32 },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}
