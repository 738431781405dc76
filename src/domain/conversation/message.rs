//! Message entity for booking conversations.
//!
//! Messages are appended to a conversation and never edited, except for
//! the read flag set by the recipient.

use crate::domain::foundation::{DomainError, MessageId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Kind of payload a message carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    #[default]
    Text,
    Image,
    File,
    /// Generated by the platform, e.g. status announcements.
    System,
}

impl MessageType {
    /// Image and file messages must reference an uploaded object.
    pub fn requires_file_url(&self) -> bool {
        matches!(self, MessageType::Image | MessageType::File)
    }
}

/// A message within a conversation.
///
/// # Invariants
///
/// - `content` is non-empty, already-sanitized text
/// - `file_url` is present for image and file messages
/// - `is_read` only ever flips from false to true
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    sender_id: UserId,
    content: String,
    message_type: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_url: Option<String>,
    is_read: bool,
    created_at: Timestamp,
}

impl Message {
    /// Creates an unread message.
    ///
    /// `content` must already have passed moderation.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is blank or a required file URL is missing
    pub fn new(
        sender_id: UserId,
        content: impl Into<String>,
        message_type: MessageType,
        file_url: Option<String>,
    ) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::validation("content", "Message content cannot be empty"));
        }
        let file_url = file_url.filter(|url| !url.trim().is_empty());
        if message_type.requires_file_url() && file_url.is_none() {
            return Err(DomainError::validation(
                "file_url",
                "Image and file messages require a file URL",
            ));
        }

        Ok(Self {
            id: MessageId::new(),
            sender_id,
            content,
            message_type,
            file_url,
            is_read: false,
            created_at: Timestamp::now(),
        })
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn sender_id(&self) -> &UserId {
        &self.sender_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    pub fn is_read(&self) -> bool {
        self.is_read
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub(super) fn mark_read(&mut self) {
        self.is_read = true;
    }
}
