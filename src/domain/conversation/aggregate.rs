//! Conversation aggregate.
//!
//! Exactly one conversation exists per booking. It holds the two
//! participants, the append-only message log and per-participant unread
//! counters.
//!
//! # Ownership
//!
//! The conversation references its booking by ID only. Whether messaging
//! is still allowed by the booking's status is resolved by the caller
//! through `BookingStatusLookup`; the aggregate itself only knows the
//! irreversible `is_active` freeze.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Message, MessageType};
use crate::domain::foundation::{
    BookingId, ConversationId, DomainError, ErrorCode, MessageId, Timestamp, UserId,
};

/// Conversation aggregate.
///
/// # Invariants
///
/// - `participants` holds two distinct users and never changes
/// - `messages` is append-only, in acceptance order
/// - `is_active` starts true and flips to false at most once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    id: ConversationId,
    booking_id: BookingId,
    participants: [UserId; 2],
    messages: Vec<Message>,
    unread_counts: BTreeMap<UserId, u32>,
    last_message: Option<Message>,
    is_active: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
    version: u64,
}

impl Conversation {
    /// Opens an active conversation between a booking's client and professional.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if both participants are the same user
    pub fn open(
        booking_id: BookingId,
        client_id: UserId,
        professional_user_id: UserId,
    ) -> Result<Self, DomainError> {
        if client_id == professional_user_id {
            return Err(DomainError::validation(
                "participants",
                "A conversation needs two distinct participants",
            ));
        }

        let now = Timestamp::now();
        let unread_counts = [(client_id.clone(), 0), (professional_user_id.clone(), 0)]
            .into_iter()
            .collect();
        Ok(Self {
            id: ConversationId::new(),
            booking_id,
            participants: [client_id, professional_user_id],
            messages: Vec::new(),
            unread_counts,
            last_message: None,
            is_active: true,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn booking_id(&self) -> &BookingId {
        &self.booking_id
    }

    pub fn participants(&self) -> &[UserId; 2] {
        &self.participants
    }

    /// Messages in acceptance order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.last_message.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Unread messages waiting for `user_id` (0 for non-participants).
    pub fn unread_count(&self, user_id: &UserId) -> u32 {
        self.unread_counts.get(user_id).copied().unwrap_or(0)
    }

    pub fn is_participant(&self, user_id: &UserId) -> bool {
        self.participants.contains(user_id)
    }

    /// The participant who is not `user_id`.
    pub fn counterpart_of(&self, user_id: &UserId) -> Option<&UserId> {
        if !self.is_participant(user_id) {
            return None;
        }
        self.participants.iter().find(|p| *p != user_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Access
    // ─────────────────────────────────────────────────────────────────────────

    /// Fails `Forbidden` unless `user_id` is a participant.
    pub fn authorize(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_participant(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "You are not a participant in this conversation",
            ))
        }
    }

    /// Page of messages, newest first, covering `[skip, skip + limit)`.
    pub fn messages_newest_first(&self, skip: usize, limit: usize) -> Vec<Message> {
        self.messages
            .iter()
            .rev()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends a moderated message from `sender_id`.
    ///
    /// Increments the counterpart's unread counter; the sender's is untouched.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the sender is not a participant
    /// - `ConversationReadOnly` once the conversation is frozen
    /// - `ValidationFailed` for blank content or a missing file URL
    pub fn append_message(
        &mut self,
        sender_id: &UserId,
        content: impl Into<String>,
        message_type: MessageType,
        file_url: Option<String>,
    ) -> Result<&Message, DomainError> {
        self.authorize(sender_id)?;
        self.ensure_active()?;

        let message = Message::new(sender_id.clone(), content, message_type, file_url)?;
        if let Some(recipient) = self.counterpart_of(sender_id).cloned() {
            *self.unread_counts.entry(recipient).or_insert(0) += 1;
        }
        self.updated_at = message.created_at();
        self.last_message = Some(message.clone());
        self.messages.push(message);
        Ok(&self.messages[self.messages.len() - 1])
    }

    /// Marks a message read on behalf of its recipient.
    ///
    /// The requester's unread counter is decremented, floored at zero. The
    /// counter is not reconciled against the actual unread messages.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the requester is not a participant
    /// - `MessageNotFound` if the message is not in this conversation
    /// - `ValidationFailed` if the requester authored the message
    pub fn mark_read(
        &mut self,
        message_id: &MessageId,
        requester_id: &UserId,
    ) -> Result<&Message, DomainError> {
        self.authorize(requester_id)?;

        let index = self
            .messages
            .iter()
            .position(|m| m.id() == message_id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::MessageNotFound,
                    format!("Message not found: {}", message_id),
                )
            })?;

        if self.messages[index].sender_id() == requester_id {
            return Err(DomainError::validation(
                "message_id",
                "Cannot mark your own message as read",
            ));
        }

        self.messages[index].mark_read();
        if let Some(last) = self.last_message.as_mut() {
            if last.id() == message_id {
                last.mark_read();
            }
        }
        if let Some(count) = self.unread_counts.get_mut(requester_id) {
            *count = count.saturating_sub(1);
        }
        self.updated_at = Timestamp::now();
        Ok(&self.messages[index])
    }

    /// Makes the conversation read-only. Returns false if it already was.
    pub fn freeze(&mut self) -> bool {
        if !self.is_active {
            return false;
        }
        self.is_active = false;
        self.updated_at = Timestamp::now();
        true
    }

    /// Records that the persisted document moved to the next version.
    pub fn advance_version(&mut self) {
        self.version += 1;
    }

    fn ensure_active(&self) -> Result<(), DomainError> {
        if self.is_active {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::ConversationReadOnly,
                "This conversation is read-only",
            ))
        }
    }
}
