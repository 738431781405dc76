//! Conversation rooms for real-time fan-out.
//!
//! Each conversation gets a broadcast channel. Connections join the rooms
//! of conversations they have opened and receive every event published to
//! them while joined.
//!
//! ```text
//! Room: conversation-1     Room: conversation-2
//! ├── connection-a         └── connection-c
//! └── connection-b
//! ```
//!
//! Delivery is at most once: slow receivers lag and miss events, and
//! events published to an empty room are dropped.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::{HashMap, HashSet};
use tokio::sync::{broadcast, RwLock};

use crate::domain::foundation::{ConversationId, DomainError, Timestamp};
use crate::ports::{ConnectionId, RealtimePublisher};

/// Default buffer per room.
pub const DEFAULT_ROOM_CAPACITY: usize = 128;

/// Event delivered to connections in a conversation room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeEvent {
    pub conversation_id: ConversationId,
    pub event: String,
    pub payload: JsonValue,
    pub sent_at: Timestamp,
}

/// Manages broadcast rooms keyed by conversation.
///
/// Uses `RwLock` for the room map since publishes (reads) vastly outnumber
/// joins and leaves (writes).
pub struct ConversationRooms {
    rooms: RwLock<HashMap<ConversationId, broadcast::Sender<RealtimeEvent>>>,
    memberships: RwLock<HashMap<ConnectionId, HashSet<ConversationId>>>,
    channel_capacity: usize,
}

impl ConversationRooms {
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            memberships: RwLock::new(HashMap::new()),
            channel_capacity: channel_capacity.max(1),
        }
    }

    /// Joins a connection to a conversation room, creating the room if needed.
    ///
    /// Callers must have checked that the connection's user participates in
    /// the conversation.
    pub async fn join(
        &self,
        conversation_id: &ConversationId,
        connection_id: ConnectionId,
    ) -> broadcast::Receiver<RealtimeEvent> {
        let mut rooms = self.rooms.write().await;
        let sender = rooms.entry(*conversation_id).or_insert_with(|| {
            let (tx, _) = broadcast::channel(self.channel_capacity);
            tx
        });

        self.memberships
            .write()
            .await
            .entry(connection_id)
            .or_default()
            .insert(*conversation_id);

        sender.subscribe()
    }

    /// Removes a connection from every room it joined.
    ///
    /// A room is dropped once no joined connection remains, even if a
    /// receiver handed out by [`join`](Self::join) is still alive; that
    /// receiver then sees the channel close.
    pub async fn leave_all(&self, connection_id: &ConnectionId) {
        let mut rooms = self.rooms.write().await;
        let mut memberships = self.memberships.write().await;
        let Some(joined) = memberships.remove(connection_id) else {
            return;
        };

        for conversation_id in joined {
            let still_joined = memberships
                .values()
                .any(|conversations| conversations.contains(&conversation_id));
            if !still_joined {
                rooms.remove(&conversation_id);
            }
        }
    }

    /// Receivers currently subscribed to a conversation.
    pub async fn receiver_count(&self, conversation_id: &ConversationId) -> usize {
        self.rooms
            .read()
            .await
            .get(conversation_id)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }

    pub async fn active_rooms(&self) -> usize {
        self.rooms.read().await.len()
    }
}

impl Default for ConversationRooms {
    fn default() -> Self {
        Self::new(DEFAULT_ROOM_CAPACITY)
    }
}

#[async_trait]
impl RealtimePublisher for ConversationRooms {
    async fn publish(
        &self,
        conversation_id: &ConversationId,
        event_name: &str,
        payload: JsonValue,
    ) -> Result<(), DomainError> {
        let rooms = self.rooms.read().await;
        if let Some(sender) = rooms.get(conversation_id) {
            // No receivers is fine; reconnecting clients re-fetch.
            let delivered = sender
                .send(RealtimeEvent {
                    conversation_id: *conversation_id,
                    event: event_name.to_string(),
                    payload,
                    sent_at: Timestamp::now(),
                })
                .unwrap_or(0);
            tracing::debug!(
                conversation_id = %conversation_id,
                event = event_name,
                delivered,
                "Realtime event published"
            );
        }
        Ok(())
    }
}
