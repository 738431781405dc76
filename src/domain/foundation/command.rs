//! Command context carried through handlers.
//!
//! Every command handler takes a `CommandMetadata` alongside its command.
//! The correlation ID ties together the log lines, the domain events and
//! the notifications produced by one request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Who issued a command and which request it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The acting user, as resolved by the authentication layer.
    pub actor_id: UserId,

    correlation_id: String,

    /// Origin of the command (e.g. "api", "socket").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates metadata with a freshly generated correlation ID.
    pub fn new(actor_id: UserId) -> Self {
        Self {
            actor_id,
            correlation_id: Uuid::new_v4().to_string(),
            source: None,
        }
    }

    /// Replaces the generated correlation ID with one from upstream.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = id.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Stable for the lifetime of this metadata.
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Metadata for a test actor with a fixed correlation ID.
    pub fn test_fixture(actor: &str) -> Self {
        Self::new(UserId::new(actor).unwrap())
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}
