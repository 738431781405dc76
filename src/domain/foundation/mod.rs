//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors, the state machine trait
//! and event plumbing that form the vocabulary of the marketplace domain.

mod command;
mod errors;
mod events;
mod ids;
mod side_effect;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ErrorKind, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{BookingId, ConversationId, MessageId, PhotoId, ProfessionalId, UserId};
pub use side_effect::{best_effort, SideEffectOutcome};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
