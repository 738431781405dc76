//! Repository-backed `BookingStatusLookup`.
//!
//! Reads the booking afresh on every call so conversation access always
//! sees the committed status.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::booking::BookingStatus;
use crate::domain::foundation::{BookingId, DomainError};
use crate::ports::{BookingParticipants, BookingRepository, BookingStatusLookup};

pub struct RepositoryBookingStatusLookup {
    bookings: Arc<dyn BookingRepository>,
}

impl RepositoryBookingStatusLookup {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }
}

#[async_trait]
impl BookingStatusLookup for RepositoryBookingStatusLookup {
    async fn status_of(
        &self,
        booking_id: &BookingId,
    ) -> Result<Option<BookingStatus>, DomainError> {
        Ok(self
            .bookings
            .find_by_id(booking_id)
            .await?
            .map(|b| b.status()))
    }

    async fn participants_of(
        &self,
        booking_id: &BookingId,
    ) -> Result<Option<BookingParticipants>, DomainError> {
        Ok(self
            .bookings
            .find_by_id(booking_id)
            .await?
            .map(|b| BookingParticipants {
                client_id: b.requester_id().clone(),
                professional_user_id: b.professional_user_id().clone(),
            }))
    }
}
