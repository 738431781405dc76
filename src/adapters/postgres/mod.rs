//! PostgreSQL adapters.
//!
//! Bookings are rows with scalar columns for the conflict and listing
//! queries plus the full aggregate as JSONB. Conversations are JSONB
//! documents keyed by booking. Both guard writes with a `version` column.
//! Table definitions live in `migrations/`.

mod booking_repository;
mod conversation_repository;
mod professional_directory;

pub use booking_repository::PostgresBookingRepository;
pub use conversation_repository::PostgresConversationRepository;
pub use professional_directory::PostgresProfessionalDirectory;

use crate::domain::foundation::DomainError;

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to {}: {}", action, e))
}

fn to_document<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value)
        .map_err(|e| DomainError::database(format!("Failed to encode document: {}", e)))
}

fn from_document<T: serde::de::DeserializeOwned>(
    document: serde_json::Value,
) -> Result<T, DomainError> {
    serde_json::from_value(document)
        .map_err(|e| DomainError::database(format!("Failed to decode document: {}", e)))
}

/// Versions are stored as BIGINT.
fn version_param(version: u64) -> i64 {
    i64::try_from(version).unwrap_or(i64::MAX)
}
