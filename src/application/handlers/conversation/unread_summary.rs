//! GetUnreadSummaryHandler - unread badge counts for a user.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::conversation::ConversationError;
use crate::domain::foundation::{ConversationId, UserId};
use crate::ports::ConversationRepository;

#[derive(Debug, Clone)]
pub struct GetUnreadSummaryQuery {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreadSummary {
    pub total: u64,
    /// Only conversations with something unread.
    pub conversations: Vec<(ConversationId, u32)>,
}

pub struct GetUnreadSummaryHandler {
    conversations: Arc<dyn ConversationRepository>,
}

impl GetUnreadSummaryHandler {
    pub fn new(conversations: Arc<dyn ConversationRepository>) -> Self {
        Self { conversations }
    }

    pub async fn handle(
        &self,
        query: GetUnreadSummaryQuery,
    ) -> Result<UnreadSummary, ConversationError> {
        let conversations: Vec<_> = self
            .conversations
            .find_by_participant(&query.user_id)
            .await?
            .iter()
            .map(|c| (*c.id(), c.unread_count(&query.user_id)))
            .filter(|(_, count)| *count > 0)
            .collect();
        let total = conversations.iter().map(|(_, c)| u64::from(*c)).sum();

        Ok(UnreadSummary {
            total,
            conversations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{at, Fixture};

    #[tokio::test]
    async fn sums_unread_across_conversations() {
        let fixture = Fixture::new().await;
        let (_, first) = fixture.booking_with_conversation(at(9, 0)).await;
        let (_, second) = fixture.booking_with_conversation(at(11, 0)).await;
        let (_, quiet) = fixture.booking_with_conversation(at(13, 0)).await;
        fixture.send_text(first, &fixture.client, "a").await;
        fixture.send_text(first, &fixture.client, "b").await;
        fixture.send_text(second, &fixture.client, "c").await;

        let handler = GetUnreadSummaryHandler::new(fixture.conversations.clone());
        let pro = handler
            .handle(GetUnreadSummaryQuery {
                user_id: fixture.general_pro.user_id.clone(),
            })
            .await
            .unwrap();
        assert_eq!(pro.total, 3);
        assert!(pro.conversations.contains(&(first, 2)));
        assert!(pro.conversations.contains(&(second, 1)));
        assert!(!pro.conversations.iter().any(|(id, _)| *id == quiet));

        let client = handler
            .handle(GetUnreadSummaryQuery {
                user_id: fixture.client.clone(),
            })
            .await
            .unwrap();
        assert_eq!(client.total, 0);
        assert!(client.conversations.is_empty());
    }
}
