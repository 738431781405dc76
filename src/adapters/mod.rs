//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory repositories and directory
//! - `postgres` - PostgreSQL repositories and directory (sqlx)
//! - `booking_lookup` - Booking status as seen by conversations
//! - `notifications` - Notification dispatchers
//! - `realtime` - Conversation rooms and the connection registry
//! - `events` - Event bus and moderation review queue

pub mod booking_lookup;
pub mod events;
pub mod memory;
pub mod notifications;
pub mod postgres;
pub mod realtime;

pub use booking_lookup::RepositoryBookingStatusLookup;
pub use events::{InMemoryEventBus, ModerationReviewQueue};
pub use memory::{
    InMemoryBookingRepository, InMemoryConversationRepository, InMemoryProfessionalDirectory,
};
pub use notifications::{RecordingNotificationDispatcher, TracingNotificationDispatcher};
pub use postgres::{
    PostgresBookingRepository, PostgresConversationRepository, PostgresProfessionalDirectory,
};
pub use realtime::{ConversationRooms, InMemoryConnectionRegistry};
