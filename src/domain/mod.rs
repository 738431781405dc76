//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, events)
//! - `scheduling` - Time slots and half-open overlap detection
//! - `moderation` - Sanitization, filtering and review heuristics for free text
//! - `booking` - Booking aggregate and status state machine
//! - `conversation` - Booking-scoped conversations and messages

pub mod booking;
pub mod conversation;
pub mod foundation;
pub mod moderation;
pub mod scheduling;
