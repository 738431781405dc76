//! CanMessageHandler - may a user post to a conversation right now?
//!
//! Answers from the current booking status, read through
//! `BookingStatusLookup` on every call. Never errors: any lookup failure
//! reads as "no".

use std::sync::Arc;

use crate::domain::foundation::{ConversationId, UserId};
use crate::ports::{BookingStatusLookup, ConversationRepository};

#[derive(Debug, Clone)]
pub struct CanMessageQuery {
    pub user_id: UserId,
    pub conversation_id: ConversationId,
}

pub struct CanMessageHandler {
    conversations: Arc<dyn ConversationRepository>,
    bookings: Arc<dyn BookingStatusLookup>,
}

impl CanMessageHandler {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        bookings: Arc<dyn BookingStatusLookup>,
    ) -> Self {
        Self {
            conversations,
            bookings,
        }
    }

    pub async fn handle(&self, query: CanMessageQuery) -> bool {
        let conversation = match self.conversations.find_by_id(&query.conversation_id).await {
            Ok(Some(conversation)) => conversation,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!(
                    conversation_id = %query.conversation_id,
                    error = %e,
                    "Conversation lookup failed during access check"
                );
                return false;
            }
        };
        if !conversation.is_participant(&query.user_id) {
            return false;
        }

        match self.bookings.status_of(conversation.booking_id()).await {
            Ok(Some(status)) => status.is_active(),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(
                    booking_id = %conversation.booking_id(),
                    error = %e,
                    "Booking status lookup failed during access check"
                );
                false
            }
        }
    }
}
