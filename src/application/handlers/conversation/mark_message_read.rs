//! MarkMessageReadHandler - recipient acknowledges a message.

use serde_json::json;
use std::sync::Arc;

use crate::domain::conversation::{ConversationError, Message};
use crate::domain::foundation::{
    best_effort, CommandMetadata, ConversationId, MessageId, SideEffectOutcome, UserId,
};
use crate::ports::{ConversationRepository, RealtimePublisher, EVENT_MESSAGE_READ};

use super::write_retry::{update_with_retry, WriteRetryPolicy};

#[derive(Debug, Clone)]
pub struct MarkMessageReadCommand {
    pub conversation_id: ConversationId,
    pub message_id: MessageId,
    pub requester_id: UserId,
}

#[derive(Debug, Clone)]
pub struct MarkMessageReadResult {
    pub message: Message,
    /// Requester's unread count after the decrement.
    pub unread_count: u32,
    pub realtime: SideEffectOutcome,
}

pub struct MarkMessageReadHandler {
    conversations: Arc<dyn ConversationRepository>,
    realtime: Arc<dyn RealtimePublisher>,
    retry: WriteRetryPolicy,
}

impl MarkMessageReadHandler {
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
        cmd: MarkMessageReadCommand,
        metadata: CommandMetadata,
    ) -> Result<MarkMessageReadResult, ConversationError> {
        let (conversation, message) = update_with_retry(
            self.conversations.as_ref(),
            &cmd.conversation_id,
            self.retry,
            |conversation| {
                conversation
                    .mark_read(&cmd.message_id, &cmd.requester_id)
                    .map(Message::clone)
            },
        )
        .await?;

        let unread_count = conversation.unread_count(&cmd.requester_id);
        tracing::debug!(
            conversation_id = %conversation.id(),
            message_id = %message.id(),
            unread_count,
            correlation_id = %metadata.correlation_id(),
            "Message marked read"
        );

        let realtime = best_effort(
            "conversation.realtime_message_read",
            self.realtime.publish(
                conversation.id(),
                EVENT_MESSAGE_READ,
                json!({
                    "message_id": message.id().to_string(),
                    "reader_id": cmd.requester_id.as_str(),
                }),
            ),
        )
        .await;

        Ok(MarkMessageReadResult {
            message,
            unread_count,
            realtime,
        })
    }
}
