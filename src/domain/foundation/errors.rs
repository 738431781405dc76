//! Errors shared by every domain module.
//!
//! `ErrorCode` is the precise reason; `ErrorKind` is the coarse category
//! a caller reacts to (not found, conflict, bad request, forbidden).

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Rejection raised while constructing a value object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::EmptyField { field: field.into() }
    }

    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        Self::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::EmptyField { field }
            | Self::OutOfRange { field, .. }
            | Self::InvalidFormat { field, .. } => field,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    BadRequest,
    Forbidden,
    /// Infrastructure failure, never the caller's fault.
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::BadRequest => "BAD_REQUEST",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,
    InvalidStateTransition,
    ProfessionalUnavailable,
    ProfessionalTypeMismatch,
    ContentRejected,

    UserNotFound,
    ProfessionalNotFound,
    BookingNotFound,
    ConversationNotFound,
    MessageNotFound,

    SchedulingConflict,
    ConcurrentModification,
    DuplicateConversation,

    Forbidden,
    ConversationReadOnly,

    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// Wire name and category of the code.
    fn describe(&self) -> (&'static str, ErrorKind) {
        use ErrorKind::*;
        match self {
            Self::ValidationFailed => ("VALIDATION_FAILED", BadRequest),
            Self::InvalidStateTransition => ("INVALID_STATE_TRANSITION", BadRequest),
            Self::ProfessionalUnavailable => ("PROFESSIONAL_UNAVAILABLE", BadRequest),
            Self::ProfessionalTypeMismatch => ("PROFESSIONAL_TYPE_MISMATCH", BadRequest),
            Self::ContentRejected => ("CONTENT_REJECTED", BadRequest),
            Self::UserNotFound => ("USER_NOT_FOUND", NotFound),
            Self::ProfessionalNotFound => ("PROFESSIONAL_NOT_FOUND", NotFound),
            Self::BookingNotFound => ("BOOKING_NOT_FOUND", NotFound),
            Self::ConversationNotFound => ("CONVERSATION_NOT_FOUND", NotFound),
            Self::MessageNotFound => ("MESSAGE_NOT_FOUND", NotFound),
            Self::SchedulingConflict => ("SCHEDULING_CONFLICT", Conflict),
            Self::ConcurrentModification => ("CONCURRENT_MODIFICATION", Conflict),
            Self::DuplicateConversation => ("DUPLICATE_CONVERSATION", Conflict),
            Self::Forbidden => ("FORBIDDEN", ErrorKind::Forbidden),
            Self::ConversationReadOnly => ("CONVERSATION_READ_ONLY", ErrorKind::Forbidden),
            Self::DatabaseError => ("DATABASE_ERROR", Internal),
            Self::InternalError => ("INTERNAL_ERROR", Internal),
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.describe().0
    }

    pub fn kind(&self) -> ErrorKind {
        self.describe().1
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type of every port; module errors convert from it.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// `ValidationFailed` with the field recorded under `details["field"]`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Stale write against a versioned aggregate.
    pub fn concurrent_modification(aggregate: &str, id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ConcurrentModification,
            format!("{} {} was modified concurrently", aggregate, id),
        )
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        Self::validation(err.field().to_owned(), err.to_string())
    }
}
