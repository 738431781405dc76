//! Booking status state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Requested by the client, awaiting the professional.
    Pending,
    /// Accepted by the professional.
    Confirmed,
    /// Work has started.
    InProgress,
    /// Work finished. Terminal.
    Completed,
    /// Withdrawn before work started. Terminal.
    Cancelled,
    /// Declined by the professional. Terminal.
    Rejected,
    /// Outcome contested after work started.
    Disputed,
    /// Dispute settled. Terminal.
    Resolved,
}

impl BookingStatus {
    /// Every status, in declaration order.
    pub const ALL: [BookingStatus; 8] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
        BookingStatus::Rejected,
        BookingStatus::Disputed,
        BookingStatus::Resolved,
    ];

    /// Statuses that occupy the professional's calendar and allow messaging.
    pub const ACTIVE: [BookingStatus; 3] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::InProgress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::InProgress => "IN_PROGRESS",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Disputed => "DISPUTED",
            BookingStatus::Resolved => "RESOLVED",
        }
    }

    /// True for PENDING, CONFIRMED and IN_PROGRESS.
    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }

    /// True when the client may still cancel.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    /// Who hears about a transition into this status.
    pub fn notification_audience(&self) -> NotificationAudience {
        match self {
            BookingStatus::Confirmed
            | BookingStatus::Rejected
            | BookingStatus::InProgress
            | BookingStatus::Completed => NotificationAudience {
                client: true,
                professional: false,
            },
            BookingStatus::Cancelled => NotificationAudience {
                client: true,
                professional: true,
            },
            BookingStatus::Pending | BookingStatus::Disputed | BookingStatus::Resolved => {
                NotificationAudience::default()
            }
        }
    }
}

impl StateMachine for BookingStatus {
    fn successors(&self) -> &'static [Self] {
        use BookingStatus::*;
        match self {
            Pending => &[Confirmed, Rejected, Cancelled],
            Confirmed => &[InProgress, Cancelled],
            InProgress => &[Completed, Disputed],
            Disputed => &[Resolved],
            Completed | Cancelled | Rejected | Resolved => &[],
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                ValidationError::invalid_format("status", format!("unknown booking status '{}'", s))
            })
    }
}

/// Parties notified of a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotificationAudience {
    pub client: bool,
    pub professional: bool,
}

/// Listing filter over booking statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// PENDING, CONFIRMED, IN_PROGRESS.
    Active,
    /// COMPLETED, CANCELLED, REJECTED, DISPUTED, RESOLVED.
    Past,
    #[default]
    All,
}

impl StatusFilter {
    pub fn matches(&self, status: BookingStatus) -> bool {
        match self {
            StatusFilter::Active => status.is_active(),
            StatusFilter::Past => !status.is_active(),
            StatusFilter::All => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use BookingStatus::*;

    fn allowed(from: BookingStatus, to: BookingStatus) -> bool {
        matches!(
            (from, to),
            (Pending, Confirmed)
                | (Pending, Rejected)
                | (Pending, Cancelled)
                | (Confirmed, InProgress)
                | (Confirmed, Cancelled)
                | (InProgress, Completed)
                | (InProgress, Disputed)
                | (Disputed, Resolved)
        )
    }

    #[test]
    fn exactly_the_listed_edges_are_legal() {
        let mut legal = 0;
        for from in BookingStatus::ALL {
            for to in BookingStatus::ALL {
                let result = from.transition_to(to);
                if allowed(from, to) {
                    assert_eq!(result, Ok(to), "{} -> {} should be legal", from, to);
                    legal += 1;
                } else {
                    let err = result.expect_err("illegal edge accepted");
                    let text = err.to_string();
                    assert!(text.contains(from.as_str()) && text.contains(to.as_str()));
                }
            }
        }
        assert_eq!(legal, 8);
    }

    #[test]
    fn terminal_statuses() {
        for status in [Completed, Cancelled, Rejected, Resolved] {
            assert!(status.is_terminal(), "{} should be terminal", status);
        }
        for status in [Pending, Confirmed, InProgress, Disputed] {
            assert!(!status.is_terminal(), "{} should not be terminal", status);
        }
    }

    #[test]
    fn filters_partition_statuses() {
        for status in BookingStatus::ALL {
            assert!(StatusFilter::All.matches(status));
            assert_ne!(
                StatusFilter::Active.matches(status),
                StatusFilter::Past.matches(status)
            );
        }
        assert!(StatusFilter::Past.matches(Disputed));
        assert!(StatusFilter::Active.matches(InProgress));
    }

    #[test]
    fn notification_table() {
        for status in [Confirmed, Rejected, InProgress, Completed] {
            let audience = status.notification_audience();
            assert!(audience.client && !audience.professional);
        }
        let cancelled = Cancelled.notification_audience();
        assert!(cancelled.client && cancelled.professional);
        for status in [Pending, Disputed, Resolved] {
            assert_eq!(status.notification_audience(), NotificationAudience::default());
        }
    }

    #[test]
    fn serializes_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&InProgress).unwrap(), "\"IN_PROGRESS\"");
        assert_eq!("in_progress".parse::<BookingStatus>().unwrap(), InProgress);
        assert!("DONE".parse::<BookingStatus>().is_err());
    }

    fn any_status() -> impl Strategy<Value = BookingStatus> {
        prop::sample::select(BookingStatus::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn can_transition_agrees_with_table(from in any_status(), to in any_status()) {
            prop_assert_eq!(from.can_transition_to(&to), allowed(from, to));
        }
    }
}
