//! NotificationDispatcher port - outbound user notifications.
//!
//! Delivery transport (email, SMS, push) lives behind this port. The core
//! treats every call as fire-and-forget and only logs failures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::domain::foundation::{DomainError, UserId};

/// Notification event types emitted by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BookingCreated,
    BookingStatusChanged,
    BookingCancelled,
    RatingRequested,
    NewMessage,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::BookingCreated => "booking_created",
            NotificationKind::BookingStatusChanged => "booking_status_changed",
            NotificationKind::BookingCancelled => "booking_cancelled",
            NotificationKind::RatingRequested => "rating_requested",
            NotificationKind::NewMessage => "new_message",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port for dispatching notifications to a user.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn notify(
        &self,
        recipient: &UserId,
        kind: NotificationKind,
        data: JsonValue,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_wire_names_match_serde() {
        for kind in [
            NotificationKind::BookingCreated,
            NotificationKind::BookingStatusChanged,
            NotificationKind::BookingCancelled,
            NotificationKind::RatingRequested,
            NotificationKind::NewMessage,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
