//! Settings read from the process environment.
//!
//! Every key lives under the `MARKETPLACE` prefix with `__` between
//! levels, so `MARKETPLACE__DATABASE__URL` becomes `database.url`. A `.env`
//! file in the working directory is loaded first when present.
//!
//! ```no_run
//! use tradeswork::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! config.validate()?;
//! # Ok::<(), tradeswork::config::ConfigError>(())
//! ```

mod database;
mod error;
mod messaging;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use messaging::MessagingConfig;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    #[serde(default)]
    pub messaging: MessagingConfig,
}

impl AppConfig {
    /// Reads `.env` and the environment; only `database.url` is required.
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(ConfigError::Load(config::ConfigError::Foreign(Box::new(err))));
            }
        }

        let source = config::Environment::with_prefix("MARKETPLACE")
            .prefix_separator("__")
            .separator("__");
        Ok(config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?)
    }

    /// Checks each section in turn and reports the first problem.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.messaging.validate()
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
