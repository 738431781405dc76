//! SendMessageHandler - Command handler for posting a message.
//!
//! Content passes through the moderation pipeline before it is stored:
//!
//! 1. sanitize (markup stripped); empty result is rejected
//! 2. filter (denylist rejects, sensitive data is redacted)
//! 3. review heuristic (never blocks; flags for human review)

use serde_json::json;
use std::sync::Arc;

use crate::domain::conversation::{
    ConversationError, Message, MessageFlaggedForReview, MessageSent, MessageType,
};
use crate::domain::foundation::{
    best_effort, CommandMetadata, ConversationId, DomainError, ErrorCode, EventId,
    SideEffectOutcome, UserId,
};
use crate::domain::moderation::{review_reason, ContentModerationFilter, FilterVerdict};
use crate::ports::{
    ConversationRepository, EventPublisher, NotificationDispatcher, NotificationKind,
    RealtimePublisher, EVENT_NEW_MESSAGE,
};

use super::write_retry::{not_found, update_with_retry, WriteRetryPolicy};
use crate::application::handlers::side_effects::{notify, publish_event};

#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub conversation_id: ConversationId,
    pub sender_id: UserId,
    pub content: String,
    pub message_type: MessageType,
    pub file_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SendMessageResult {
    pub message: Message,
    pub recipient_id: UserId,
    /// True when sensitive data was replaced before storing.
    pub redacted: bool,
    pub flagged_for_review: bool,
    pub notification: SideEffectOutcome,
    pub realtime: SideEffectOutcome,
    pub event: SideEffectOutcome,
    /// `Skipped` unless the message was flagged for review.
    pub review_event: SideEffectOutcome,
}

pub struct SendMessageHandler {
    conversations: Arc<dyn ConversationRepository>,
    moderation: ContentModerationFilter,
    notifier: Arc<dyn NotificationDispatcher>,
    realtime: Arc<dyn RealtimePublisher>,
    event_publisher: Arc<dyn EventPublisher>,
    retry: WriteRetryPolicy,
}

impl SendMessageHandler {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        moderation: ContentModerationFilter,
        notifier: Arc<dyn NotificationDispatcher>,
        realtime: Arc<dyn RealtimePublisher>,
        event_publisher: Arc<dyn EventPublisher>,
        retry: WriteRetryPolicy,
    ) -> Self {
        Self {
            conversations,
            moderation,
            notifier,
            realtime,
            event_publisher,
            retry,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
        metadata: CommandMetadata,
    ) -> Result<SendMessageResult, ConversationError> {
        // 1. Access: exists, participant, writable
        let conversation = self
            .conversations
            .find_by_id(&cmd.conversation_id)
            .await?
            .ok_or_else(|| not_found(&cmd.conversation_id))?;
        conversation.authorize(&cmd.sender_id)?;
        if !conversation.is_active() {
            return Err(ConversationError::ReadOnly);
        }

        // 2. Moderation
        let sanitized = self.moderation.sanitize(&cmd.content);
        if sanitized.is_empty() {
            return Err(ConversationError::bad_request(
                "Message content cannot be empty",
            ));
        }
        let (content, redacted) = match self.moderation.filter(&sanitized) {
            FilterVerdict::Rejected { reason } => {
                tracing::info!(
                    conversation_id = %cmd.conversation_id,
                    sender_id = %cmd.sender_id,
                    "Message rejected by content filter"
                );
                return Err(ConversationError::bad_request(reason));
            }
            FilterVerdict::Redacted { content, .. } => (content, true),
            FilterVerdict::Clean { content } => (content, false),
        };
        let review = review_reason(&content);

        // 3. Append and persist
        let (conversation, message) = update_with_retry(
            self.conversations.as_ref(),
            &cmd.conversation_id,
            self.retry,
            |conversation| {
                conversation
                    .append_message(
                        &cmd.sender_id,
                        content.clone(),
                        cmd.message_type,
                        cmd.file_url.clone(),
                    )
                    .map(Message::clone)
            },
        )
        .await?;

        let recipient_id = conversation
            .counterpart_of(&cmd.sender_id)
            .cloned()
            .ok_or(ConversationError::NotParticipant)?;
        tracing::info!(
            conversation_id = %conversation.id(),
            message_id = %message.id(),
            sender_id = %cmd.sender_id,
            redacted,
            correlation_id = %metadata.correlation_id(),
            "Message sent"
        );

        // 4. Best-effort fan-out
        let notification = notify(
            self.notifier.as_ref(),
            &recipient_id,
            NotificationKind::NewMessage,
            json!({
                "conversation_id": conversation.id().to_string(),
                "booking_id": conversation.booking_id().to_string(),
                "message_id": message.id().to_string(),
                "sender_id": cmd.sender_id.as_str(),
            }),
        )
        .await;
        let realtime = best_effort(
            "conversation.realtime_new_message",
            self.publish_realtime(conversation.id(), &message),
        )
        .await;
        let event = publish_event(
            self.event_publisher.as_ref(),
            &MessageSent {
                event_id: EventId::new(),
                conversation_id: *conversation.id(),
                booking_id: *conversation.booking_id(),
                message_id: *message.id(),
                sender_id: cmd.sender_id.clone(),
                recipient_id: recipient_id.clone(),
                message_type: message.message_type(),
                sent_at: message.created_at(),
            },
            &metadata,
        )
        .await;

        let review_event = match review {
            None => SideEffectOutcome::Skipped,
            Some(reason) => {
                tracing::warn!(
                    conversation_id = %conversation.id(),
                    message_id = %message.id(),
                    reason = reason.as_str(),
                    "Message flagged for moderation review"
                );
                publish_event(
                    self.event_publisher.as_ref(),
                    &MessageFlaggedForReview {
                        event_id: EventId::new(),
                        conversation_id: *conversation.id(),
                        message_id: *message.id(),
                        sender_id: cmd.sender_id.clone(),
                        reason: reason.as_str().to_string(),
                        flagged_at: message.created_at(),
                    },
                    &metadata,
                )
                .await
            }
        };

        Ok(SendMessageResult {
            message,
            recipient_id,
            redacted,
            flagged_for_review: review.is_some(),
            notification,
            realtime,
            event,
            review_event,
        })
    }

    async fn publish_realtime(
        &self,
        conversation_id: &ConversationId,
        message: &Message,
    ) -> Result<(), DomainError> {
        let payload = serde_json::to_value(message).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize message: {}", e),
            )
        })?;
        self.realtime
            .publish(conversation_id, EVENT_NEW_MESSAGE, payload)
            .await
    }
}
