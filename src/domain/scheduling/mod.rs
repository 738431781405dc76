//! Scheduling primitives: time slots and conflict detection.

mod conflict;

pub use conflict::{has_conflict, TimeSlot};
