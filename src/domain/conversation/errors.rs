//! Conversation-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ErrorKind};

/// Errors surfaced by conversation commands and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationError {
    /// Conversation, booking or message was not found.
    NotFound(String),
    /// Requester is not a participant.
    NotParticipant,
    /// Conversation is frozen.
    ReadOnly,
    /// Content or precondition rejected.
    BadRequest(String),
    /// Concurrent writers kept winning.
    Conflict(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl ConversationError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ConversationError::NotFound(message.into())
    }
    pub fn bad_request(message: impl Into<String>) -> Self {
        ConversationError::BadRequest(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ConversationError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            ConversationError::NotFound(_) => ErrorCode::ConversationNotFound,
            ConversationError::NotParticipant => ErrorCode::Forbidden,
            ConversationError::ReadOnly => ErrorCode::ConversationReadOnly,
            ConversationError::BadRequest(_) => ErrorCode::ValidationFailed,
            ConversationError::Conflict(_) => ErrorCode::ConcurrentModification,
            ConversationError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }
    pub fn message(&self) -> String {
        match self {
            ConversationError::NotFound(msg) => msg.clone(),
            ConversationError::NotParticipant => {
                "Forbidden: not a participant in this conversation".to_string()
            }
            ConversationError::ReadOnly => "Forbidden: conversation is read-only".to_string(),
            ConversationError::BadRequest(msg) => msg.clone(),
            ConversationError::Conflict(msg) => msg.clone(),
            ConversationError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ConversationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ConversationError {}

impl From<DomainError> for ConversationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ConversationError::NotParticipant,
            ErrorCode::ConversationReadOnly => ConversationError::ReadOnly,
            ErrorCode::ConcurrentModification | ErrorCode::DuplicateConversation => {
                ConversationError::Conflict(err.message)
            }
            _ => match err.kind() {
                ErrorKind::NotFound => ConversationError::NotFound(err.message),
                ErrorKind::BadRequest => ConversationError::BadRequest(err.message),
                _ => ConversationError::Infrastructure(err.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_only_is_forbidden_and_says_so() {
        let err: ConversationError =
            DomainError::new(ErrorCode::ConversationReadOnly, "frozen").into();
        assert_eq!(err, ConversationError::ReadOnly);
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn non_participant_is_forbidden() {
        let err: ConversationError = DomainError::new(ErrorCode::Forbidden, "nope").into();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert!(err.to_string().contains("not a participant"));
    }

    #[test]
    fn missing_message_is_not_found() {
        let err: ConversationError =
            DomainError::new(ErrorCode::MessageNotFound, "Message not found: x").into();
        assert_eq!(err, ConversationError::NotFound("Message not found: x".to_string()));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
