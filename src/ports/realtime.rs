//! Real-time transport ports.
//!
//! - `RealtimePublisher` fans events out to whoever is connected to a
//!   conversation, at most once and without ordering guarantees across
//!   recipients. Reconnecting clients re-fetch messages instead.
//! - `ConnectionRegistry` maps live connections to users. It is owned by
//!   the transport and injected; there is no process-wide registry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use crate::domain::foundation::{ConversationId, DomainError, UserId};

/// Event name for a newly appended message.
pub const EVENT_NEW_MESSAGE: &str = "new_message";

/// Event name for a message marked read.
pub const EVENT_MESSAGE_READ: &str = "message_read";

/// Event name for a conversation turning read-only.
pub const EVENT_CONVERSATION_CLOSED: &str = "conversation_closed";

/// Port for publishing conversation events to connected clients.
#[async_trait]
pub trait RealtimePublisher: Send + Sync {
    async fn publish(
        &self,
        conversation_id: &ConversationId,
        event_name: &str,
        payload: JsonValue,
    ) -> Result<(), DomainError>;
}

/// Identifier of one live client connection (socket).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur in connection registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionRegistryError {
    /// The connection is already bound to a different user.
    #[error("Connection {0} is already registered to another user")]
    AlreadyRegistered(ConnectionId),

    /// Backend failure.
    #[error("Connection registry unavailable: {0}")]
    Unavailable(String),
}

/// Port for tracking which user owns each live connection.
///
/// Entries are created on connect and removed on disconnect.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Bind a connection to a user. Re-registering the same pair is a no-op.
    async fn register_connection(
        &self,
        connection_id: ConnectionId,
        user_id: &UserId,
    ) -> Result<(), ConnectionRegistryError>;

    /// Drop a connection, returning the user it belonged to.
    async fn unregister_connection(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<UserId>, ConnectionRegistryError>;

    /// User bound to a connection, if still connected.
    async fn lookup(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<UserId>, ConnectionRegistryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ports_are_object_safe() {
        fn _publisher(_p: &dyn RealtimePublisher) {}
        fn _registry(_r: &dyn ConnectionRegistry) {}
    }

    #[test]
    fn connection_ids_are_unique() {
        assert_ne!(ConnectionId::new(), ConnectionId::new());
    }
}
