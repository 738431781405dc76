//! ConversationLifecycle port - the booking side's handle on conversations.
//!
//! Booking commands open a conversation when a booking is created and
//! freeze it when the booking completes. Both calls are best-effort from
//! the booking's point of view.

use crate::domain::foundation::{BookingId, ConversationId, DomainError};
use async_trait::async_trait;

#[async_trait]
pub trait ConversationLifecycle: Send + Sync {
    /// Idempotently opens the booking's conversation.
    async fn open_for_booking(&self, booking_id: &BookingId) -> Result<ConversationId, DomainError>;

    /// Makes the booking's conversation read-only. No-op if none exists.
    async fn freeze_for_booking(&self, booking_id: &BookingId) -> Result<(), DomainError>;
}
