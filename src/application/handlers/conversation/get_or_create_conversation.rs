//! GetOrCreateConversationHandler - ensures a booking has its conversation.

use std::sync::Arc;

use crate::domain::conversation::{Conversation, ConversationError};
use crate::domain::foundation::{BookingId, ErrorCode};
use crate::ports::{BookingStatusLookup, ConversationRepository};

#[derive(Debug, Clone)]
pub struct GetOrCreateConversationCommand {
    pub booking_id: BookingId,
}

#[derive(Debug, Clone)]
pub struct GetOrCreateConversationResult {
    pub conversation: Conversation,
    /// False when the conversation already existed.
    pub created: bool,
}

/// Idempotent conversation creation.
pub struct GetOrCreateConversationHandler {
    conversations: Arc<dyn ConversationRepository>,
    bookings: Arc<dyn BookingStatusLookup>,
}

impl GetOrCreateConversationHandler {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        bookings: Arc<dyn BookingStatusLookup>,
    ) -> Self {
        Self {
            conversations,
            bookings,
        }
    }

    pub async fn handle(
        &self,
        cmd: GetOrCreateConversationCommand,
    ) -> Result<GetOrCreateConversationResult, ConversationError> {
        if let Some(conversation) = self.conversations.find_by_booking_id(&cmd.booking_id).await? {
            return Ok(GetOrCreateConversationResult {
                conversation,
                created: false,
            });
        }

        let participants = self
            .bookings
            .participants_of(&cmd.booking_id)
            .await?
            .ok_or_else(|| {
                ConversationError::not_found(format!("Booking not found: {}", cmd.booking_id))
            })?;

        let conversation = Conversation::open(
            cmd.booking_id,
            participants.client_id,
            participants.professional_user_id,
        )?;

        match self.conversations.insert(&conversation).await {
            Ok(()) => {
                tracing::info!(
                    conversation_id = %conversation.id(),
                    booking_id = %cmd.booking_id,
                    "Conversation opened"
                );
                Ok(GetOrCreateConversationResult {
                    conversation,
                    created: true,
                })
            }
            // Lost a creation race; the unique index kept the other one.
            Err(e) if e.code == ErrorCode::DuplicateConversation => {
                let existing = self
                    .conversations
                    .find_by_booking_id(&cmd.booking_id)
                    .await?
                    .ok_or_else(|| ConversationError::Conflict(e.message.clone()))?;
                Ok(GetOrCreateConversationResult {
                    conversation: existing,
                    created: false,
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}
