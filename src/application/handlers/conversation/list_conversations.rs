//! ListConversationsHandler - a user's inbox, most recently active first.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::conversation::{Conversation, ConversationError, Message};
use crate::domain::foundation::{BookingId, ConversationId, Timestamp, UserId};
use crate::ports::ConversationRepository;

#[derive(Debug, Clone)]
pub struct ListConversationsQuery {
    pub user_id: UserId,
}

/// One inbox row, seen from the requesting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSummary {
    pub conversation_id: ConversationId,
    pub booking_id: BookingId,
    pub counterpart_id: Option<UserId>,
    pub last_message: Option<Message>,
    pub unread_count: u32,
    pub is_active: bool,
    pub updated_at: Timestamp,
}

impl ConversationSummary {
    pub fn for_user(conversation: &Conversation, user_id: &UserId) -> Self {
        Self {
            conversation_id: *conversation.id(),
            booking_id: *conversation.booking_id(),
            counterpart_id: conversation.counterpart_of(user_id).cloned(),
            last_message: conversation.last_message().cloned(),
            unread_count: conversation.unread_count(user_id),
            is_active: conversation.is_active(),
            updated_at: conversation.updated_at(),
        }
    }
}

pub struct ListConversationsHandler {
    conversations: Arc<dyn ConversationRepository>,
}

impl ListConversationsHandler {
    pub fn new(conversations: Arc<dyn ConversationRepository>) -> Self {
        Self { conversations }
    }

    pub async fn handle(
        &self,
        query: ListConversationsQuery,
    ) -> Result<Vec<ConversationSummary>, ConversationError> {
        let conversations = self.conversations.find_by_participant(&query.user_id).await?;
        Ok(conversations
            .iter()
            .map(|c| ConversationSummary::for_user(c, &query.user_id))
            .collect())
    }
}
