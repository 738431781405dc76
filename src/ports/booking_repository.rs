//! Booking repository port.
//!
//! Bookings live in a relational store queryable by professional, status
//! and time range. Writes are guarded by an optimistic version check.

use crate::domain::booking::{Booking, StatusFilter};
use crate::domain::foundation::{BookingId, DomainError, ProfessionalId, UserId};
use crate::domain::scheduling::TimeSlot;
use async_trait::async_trait;

/// Repository port for Booking aggregate persistence.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, booking: &Booking) -> Result<(), DomainError>;

    /// Persist changes to an existing booking.
    ///
    /// Succeeds only if the stored version equals `booking.version()`; on
    /// success the stored version and the in-memory copy both advance by one.
    ///
    /// # Errors
    ///
    /// - `BookingNotFound` if the booking doesn't exist
    /// - `ConcurrentModification` if another writer got there first
    /// - `DatabaseError` on persistence failure
    async fn update(&self, booking: &mut Booking) -> Result<(), DomainError>;

    /// Find a booking by its ID.
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError>;

    /// Active bookings of a professional that may intersect `window`.
    ///
    /// Implementations may return extra active bookings but must not omit
    /// any active booking overlapping the window.
    async fn find_active_for_professional(
        &self,
        professional_id: &ProfessionalId,
        window: &TimeSlot,
    ) -> Result<Vec<Booking>, DomainError>;

    /// Bookings requested by a client, scheduled time descending.
    async fn list_by_requester(
        &self,
        requester_id: &UserId,
        filter: StatusFilter,
    ) -> Result<Vec<Booking>, DomainError>;

    /// Bookings assigned to a professional, scheduled time descending.
    async fn list_by_professional(
        &self,
        professional_id: &ProfessionalId,
        filter: StatusFilter,
    ) -> Result<Vec<Booking>, DomainError>;
}
