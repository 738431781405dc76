//! Half-open interval overlap detection for professional schedules.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// A scheduled interval `[start, start + duration)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    start: Timestamp,
    duration_minutes: u32,
}

impl TimeSlot {
    /// Creates a slot, rejecting zero-length durations.
    pub fn new(start: Timestamp, duration_minutes: u32) -> Result<Self, ValidationError> {
        if duration_minutes == 0 {
            return Err(ValidationError::out_of_range(
                "duration_minutes",
                1,
                i64::from(u32::MAX),
                0,
            ));
        }
        Ok(Self {
            start,
            duration_minutes,
        })
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Exclusive end of the slot.
    pub fn end(&self) -> Timestamp {
        self.start.plus_minutes(i64::from(self.duration_minutes))
    }

    /// `self.start < other.end && self.end > other.start`.
    ///
    /// Symmetric; slots that merely touch do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end() && self.end() > other.start
    }
}

/// Returns true if `candidate` overlaps any of `existing`.
///
/// Callers pass only slots of bookings that still block the schedule.
pub fn has_conflict<'a, I>(candidate: &TimeSlot, existing: I) -> bool
where
    I: IntoIterator<Item = &'a TimeSlot>,
{
    existing.into_iter().any(|slot| slot.overlaps(candidate))
}
