//! Holding queue for messages flagged by the moderation heuristic.
//!
//! Subscribes to `conversation.message_flagged_for_review.v1` and keeps
//! the flagged messages until a reviewer drains them. Redelivery of an
//! event still pending is ignored; draining forgets the drained ids.

use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::Mutex;

use crate::domain::conversation::MessageFlaggedForReview;
use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope, EventId};
use crate::ports::EventHandler;

/// Event type this queue listens to.
pub const FLAGGED_FOR_REVIEW_EVENT: &str = "conversation.message_flagged_for_review.v1";

#[derive(Default)]
struct Queue {
    seen: HashSet<EventId>,
    pending: Vec<(EventId, MessageFlaggedForReview)>,
}

#[derive(Default)]
pub struct ModerationReviewQueue {
    queue: Mutex<Queue>,
}

impl ModerationReviewQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn pending_count(&self) -> usize {
        self.queue.lock().await.pending.len()
    }

    /// Removes and returns everything awaiting review.
    pub async fn drain(&self) -> Vec<MessageFlaggedForReview> {
        let mut queue = self.queue.lock().await;
        let drained = std::mem::take(&mut queue.pending);
        drained
            .into_iter()
            .map(|(event_id, flagged)| {
                queue.seen.remove(&event_id);
                flagged
            })
            .collect()
    }
}

#[async_trait]
impl EventHandler for ModerationReviewQueue {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let flagged: MessageFlaggedForReview = event.payload_as().map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Malformed {} payload: {}", event.event_type, e),
            )
        })?;

        let mut queue = self.queue.lock().await;
        if !queue.seen.insert(event.event_id) {
            return Ok(());
        }
        tracing::info!(
            conversation_id = %flagged.conversation_id,
            message_id = %flagged.message_id,
            reason = %flagged.reason,
            "Message queued for moderation review"
        );
        queue.pending.push((event.event_id, flagged));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ModerationReviewQueue"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{
        ConversationId, MessageId, SerializableDomainEvent, Timestamp, UserId,
    };

    fn flagged() -> MessageFlaggedForReview {
        MessageFlaggedForReview {
            event_id: EventId::new(),
            conversation_id: ConversationId::new(),
            message_id: MessageId::new(),
            sender_id: UserId::new("client").unwrap(),
            reason: "link_heavy".to_string(),
            flagged_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn queues_flagged_messages_once() {
        let queue = ModerationReviewQueue::new();
        let envelope = flagged().to_envelope().unwrap();
        assert_eq!(envelope.event_type, FLAGGED_FOR_REVIEW_EVENT);

        queue.handle(envelope.clone()).await.unwrap();
        queue.handle(envelope).await.unwrap();

        assert_eq!(queue.pending_count().await, 1);
        let drained = queue.drain().await;
        assert_eq!(drained[0].reason, "link_heavy");
        assert_eq!(queue.pending_count().await, 0);
    }

    #[tokio::test]
    async fn draining_forgets_the_drained_event_ids() {
        let queue = ModerationReviewQueue::new();
        for _ in 0..3 {
            queue.handle(flagged().to_envelope().unwrap()).await.unwrap();
        }
        assert_eq!(queue.queue.lock().await.seen.len(), 3);

        assert_eq!(queue.drain().await.len(), 3);

        assert!(queue.queue.lock().await.seen.is_empty());
    }

    #[tokio::test]
    async fn rejects_malformed_payload() {
        let queue = ModerationReviewQueue::new();
        let envelope = EventEnvelope::new(
            FLAGGED_FOR_REVIEW_EVENT,
            "c-1",
            "Conversation",
            serde_json::json!({"unexpected": true}),
        );

        assert!(queue.handle(envelope).await.is_err());
    }
}
