//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `BookingRepository` - Booking aggregates, queryable by professional and time
//! - `ConversationRepository` - Conversation documents, unique per booking
//! - `ProfessionalDirectory` - User accounts and professional profiles
//!
//! ## Cross-Module Ports
//!
//! - `BookingStatusLookup` - Conversations read booking status through this
//! - `ConversationLifecycle` - Bookings open and freeze conversations through this
//!
//! ## Delivery Ports
//!
//! - `NotificationDispatcher` - Outbound user notifications
//! - `RealtimePublisher` - At-most-once fan-out to connected clients
//! - `ConnectionRegistry` - Live connection to user mapping
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Outbound domain events
//! - `EventSubscriber` / `EventHandler` - Consumers keyed by event type

mod booking_repository;
mod booking_status_lookup;
mod conversation_lifecycle;
mod conversation_repository;
mod events;
mod notification_dispatcher;
mod professional_directory;
mod realtime;

pub use booking_repository::BookingRepository;
pub use booking_status_lookup::{BookingParticipants, BookingStatusLookup};
pub use conversation_lifecycle::ConversationLifecycle;
pub use conversation_repository::ConversationRepository;
pub use events::{EventHandler, EventPublisher, EventSubscriber};
pub use notification_dispatcher::{NotificationDispatcher, NotificationKind};
pub use professional_directory::ProfessionalDirectory;
pub use realtime::{
    ConnectionId, ConnectionRegistry, ConnectionRegistryError, RealtimePublisher,
    EVENT_CONVERSATION_CLOSED, EVENT_MESSAGE_READ, EVENT_NEW_MESSAGE,
};
