//! GetMessagesHandler - Query handler for a page of messages.

use std::sync::Arc;

use crate::domain::conversation::{ConversationError, Message};
use crate::domain::foundation::{ConversationId, UserId};
use crate::ports::ConversationRepository;

use super::write_retry::not_found;

/// Default page size when the caller gives none.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Query for messages, newest first.
///
/// Negative `limit` or `skip` is treated as zero.
#[derive(Debug, Clone)]
pub struct GetMessagesQuery {
    pub conversation_id: ConversationId,
    pub requester_id: UserId,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

pub struct GetMessagesHandler {
    conversations: Arc<dyn ConversationRepository>,
    default_page_size: u32,
}

impl GetMessagesHandler {
    pub fn new(conversations: Arc<dyn ConversationRepository>, default_page_size: u32) -> Self {
        Self {
            conversations,
            default_page_size,
        }
    }

    /// Works on frozen conversations too; only participation is checked.
    pub async fn handle(&self, query: GetMessagesQuery) -> Result<Vec<Message>, ConversationError> {
        let conversation = self
            .conversations
            .find_by_id(&query.conversation_id)
            .await?
            .ok_or_else(|| not_found(&query.conversation_id))?;
        conversation.authorize(&query.requester_id)?;

        let limit = clamp(query.limit.unwrap_or(i64::from(self.default_page_size)));
        let skip = clamp(query.skip.unwrap_or(0));
        Ok(conversation.messages_newest_first(skip, limit))
    }
}

fn clamp(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}
