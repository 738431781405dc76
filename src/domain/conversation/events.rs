//! Conversation domain events.

use serde::{Deserialize, Serialize};

use super::MessageType;
use crate::domain::foundation::{
    domain_event, BookingId, ConversationId, EventId, MessageId, Timestamp, UserId,
};

/// Published when a message is appended to a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSent {
    pub event_id: EventId,
    pub conversation_id: ConversationId,
    pub booking_id: BookingId,
    pub message_id: MessageId,
    pub sender_id: UserId,
    pub recipient_id: UserId,
    pub message_type: MessageType,
    pub sent_at: Timestamp,
}

domain_event!(
    MessageSent: "conversation.message_sent.v1"
    for Conversation(conversation_id) at sent_at
);

/// Published when the review heuristic flags a sent message.
///
/// Sending is never blocked; a moderation queue may subscribe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageFlaggedForReview {
    pub event_id: EventId,
    pub conversation_id: ConversationId,
    pub message_id: MessageId,
    pub sender_id: UserId,
    pub reason: String,
    pub flagged_at: Timestamp,
}

domain_event!(
    MessageFlaggedForReview: "conversation.message_flagged_for_review.v1"
    for Conversation(conversation_id) at flagged_at
);
