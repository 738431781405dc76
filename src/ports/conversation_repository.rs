//! Conversation repository port.
//!
//! Conversations are documents with a unique index on `booking_id` and a
//! secondary index on participants.

use crate::domain::conversation::Conversation;
use crate::domain::foundation::{BookingId, ConversationId, DomainError, UserId};
use async_trait::async_trait;

/// Repository port for Conversation aggregate persistence.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Insert a new conversation.
    ///
    /// # Errors
    ///
    /// - `DuplicateConversation` if one already exists for the booking
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, conversation: &Conversation) -> Result<(), DomainError>;

    /// Persist changes, guarded by `conversation.version()`.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if the conversation doesn't exist
    /// - `ConcurrentModification` on a stale version
    /// - `DatabaseError` on persistence failure
    async fn update(&self, conversation: &mut Conversation) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ConversationId) -> Result<Option<Conversation>, DomainError>;

    async fn find_by_booking_id(
        &self,
        booking_id: &BookingId,
    ) -> Result<Option<Conversation>, DomainError>;

    /// Conversations a user takes part in, most recently updated first.
    async fn find_by_participant(&self, user_id: &UserId)
        -> Result<Vec<Conversation>, DomainError>;
}
