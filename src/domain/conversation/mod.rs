//! Conversation domain module.
//!
//! Booking-scoped messaging between a client and a professional. A
//! conversation accepts messages while active and becomes read-only when
//! its booking completes.
//!
//! # Events
//!
//! - `MessageSent` - Published when a message is appended
//! - `MessageFlaggedForReview` - Published when the review heuristic trips

mod aggregate;
mod errors;
mod events;
mod message;

pub use aggregate::Conversation;
pub use errors::ConversationError;
pub use events::{MessageFlaggedForReview, MessageSent};
pub use message::{Message, MessageType};
