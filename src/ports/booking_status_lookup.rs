//! BookingStatusLookup port - one-way read of booking state for conversations.
//!
//! Conversations never hold a booking reference. Every access decision
//! asks this port again, so status changes are visible immediately.

use crate::domain::booking::BookingStatus;
use crate::domain::foundation::{BookingId, DomainError, UserId};
use async_trait::async_trait;

/// The two parties of a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingParticipants {
    pub client_id: UserId,
    pub professional_user_id: UserId,
}

/// Read-only view of bookings needed by the conversation side.
#[async_trait]
pub trait BookingStatusLookup: Send + Sync {
    /// Current status, or `None` if the booking doesn't exist.
    async fn status_of(&self, booking_id: &BookingId) -> Result<Option<BookingStatus>, DomainError>;

    /// Client and professional account of the booking.
    async fn participants_of(
        &self,
        booking_id: &BookingId,
    ) -> Result<Option<BookingParticipants>, DomainError>;
}
