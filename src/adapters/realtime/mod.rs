//! Real-time transport adapters (tokio broadcast channels).

mod connection_registry;
mod rooms;

pub use connection_registry::InMemoryConnectionRegistry;
pub use rooms::{ConversationRooms, RealtimeEvent, DEFAULT_ROOM_CAPACITY};
