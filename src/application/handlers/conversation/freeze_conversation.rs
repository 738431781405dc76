//! FreezeConversationHandler - makes a booking's conversation read-only.

use serde_json::json;
use std::sync::Arc;

use crate::domain::conversation::ConversationError;
use crate::domain::foundation::{best_effort, BookingId, SideEffectOutcome};
use crate::ports::{ConversationRepository, RealtimePublisher, EVENT_CONVERSATION_CLOSED};

use super::write_retry::{update_with_retry, WriteRetryPolicy};

#[derive(Debug, Clone)]
pub struct FreezeConversationCommand {
    pub booking_id: BookingId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreezeOutcome {
    Frozen { realtime: SideEffectOutcome },
    AlreadyReadOnly,
    /// The booking has no conversation; nothing to do.
    NoConversation,
}

pub struct FreezeConversationHandler {
    conversations: Arc<dyn ConversationRepository>,
    realtime: Arc<dyn RealtimePublisher>,
    retry: WriteRetryPolicy,
}

impl FreezeConversationHandler {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        realtime: Arc<dyn RealtimePublisher>,
        retry: WriteRetryPolicy,
    ) -> Self {
        Self {
            conversations,
            realtime,
            retry,
        }
    }

    pub async fn handle(
        &self,
        cmd: FreezeConversationCommand,
    ) -> Result<FreezeOutcome, ConversationError> {
        let Some(conversation) = self.conversations.find_by_booking_id(&cmd.booking_id).await?
        else {
            tracing::debug!(booking_id = %cmd.booking_id, "No conversation to freeze");
            return Ok(FreezeOutcome::NoConversation);
        };
        if !conversation.is_active() {
            return Ok(FreezeOutcome::AlreadyReadOnly);
        }

        let (conversation, _) = update_with_retry(
            self.conversations.as_ref(),
            conversation.id(),
            self.retry,
            |conversation| Ok(conversation.freeze()),
        )
        .await?;
        tracing::info!(
            conversation_id = %conversation.id(),
            booking_id = %cmd.booking_id,
            "Conversation frozen"
        );

        let realtime = best_effort(
            "conversation.realtime_closed",
            self.realtime.publish(
                conversation.id(),
                EVENT_CONVERSATION_CLOSED,
                json!({ "booking_id": cmd.booking_id.to_string() }),
            ),
        )
        .await;
        Ok(FreezeOutcome::Frozen { realtime })
    }
}
