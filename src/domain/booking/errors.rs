//! Booking-specific error types.

use crate::domain::foundation::{BookingId, DomainError, ErrorCode, ErrorKind};

/// Errors surfaced by booking commands and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Booking was not found.
    NotFound(BookingId),
    /// A referenced user or professional does not exist.
    ReferenceNotFound(String),
    /// The requested slot overlaps an active booking.
    SchedulingConflict(String),
    /// Another writer updated the booking first.
    ConcurrentModification(String),
    /// Precondition or state machine violation.
    BadRequest(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl BookingError {
    pub fn not_found(id: BookingId) -> Self {
        BookingError::NotFound(id)
    }
    pub fn reference_not_found(message: impl Into<String>) -> Self {
        BookingError::ReferenceNotFound(message.into())
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        BookingError::SchedulingConflict(message.into())
    }
    pub fn bad_request(message: impl Into<String>) -> Self {
        BookingError::BadRequest(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        BookingError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::NotFound(_) => ErrorCode::BookingNotFound,
            BookingError::ReferenceNotFound(_) => ErrorCode::ProfessionalNotFound,
            BookingError::SchedulingConflict(_) => ErrorCode::SchedulingConflict,
            BookingError::ConcurrentModification(_) => ErrorCode::ConcurrentModification,
            BookingError::BadRequest(_) => ErrorCode::ValidationFailed,
            BookingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }
    pub fn message(&self) -> String {
        match self {
            BookingError::NotFound(id) => format!("Booking not found: {}", id),
            BookingError::ReferenceNotFound(msg) => msg.clone(),
            BookingError::SchedulingConflict(msg) => msg.clone(),
            BookingError::ConcurrentModification(msg) => msg.clone(),
            BookingError::BadRequest(msg) => msg.clone(),
            BookingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BookingError {}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::UserNotFound | ErrorCode::ProfessionalNotFound => {
                BookingError::ReferenceNotFound(err.message)
            }
            ErrorCode::SchedulingConflict => BookingError::SchedulingConflict(err.message),
            ErrorCode::ConcurrentModification => BookingError::ConcurrentModification(err.message),
            _ => match err.kind() {
                ErrorKind::BadRequest => BookingError::BadRequest(err.message),
                _ => BookingError::Infrastructure(err.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_rejections_map_to_bad_request() {
        let err: BookingError =
            DomainError::new(ErrorCode::InvalidStateTransition, "Cannot transition").into();
        assert_eq!(err, BookingError::BadRequest("Cannot transition".to_string()));
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn stale_write_maps_to_conflict_kind() {
        let err: BookingError = DomainError::concurrent_modification("Booking", "b-1").into();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn database_failures_are_internal() {
        let err: BookingError = DomainError::database("connection reset").into();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn not_found_message_names_the_booking() {
        let id = BookingId::new();
        let err = BookingError::not_found(id);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
