//! In-memory booking repository.
//!
//! Useful for tests and local development. Honours the same optimistic
//! version check as the PostgreSQL adapter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::booking::{Booking, StatusFilter};
use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, ProfessionalId, UserId,
};
use crate::domain::scheduling::TimeSlot;
use crate::ports::BookingRepository;

/// In-memory storage for bookings.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingRepository {
    bookings: Arc<RwLock<HashMap<BookingId, Booking>>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored bookings.
    pub async fn len(&self) -> usize {
        self.bookings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.bookings.read().await.is_empty()
    }
}

fn scheduled_desc(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| b.scheduled_at().cmp(&a.scheduled_at()));
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<(), DomainError> {
        let mut bookings = self.bookings.write().await;
        if bookings.contains_key(booking.id()) {
            return Err(DomainError::database(format!(
                "Booking {} already exists",
                booking.id()
            )));
        }
        bookings.insert(*booking.id(), booking.clone());
        Ok(())
    }

    async fn update(&self, booking: &mut Booking) -> Result<(), DomainError> {
        let mut bookings = self.bookings.write().await;
        let stored = bookings.get(booking.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::BookingNotFound,
                format!("Booking not found: {}", booking.id()),
            )
        })?;
        if stored.version() != booking.version() {
            return Err(DomainError::concurrent_modification("Booking", booking.id()));
        }

        booking.advance_version();
        bookings.insert(*booking.id(), booking.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        Ok(self.bookings.read().await.get(id).cloned())
    }

    async fn find_active_for_professional(
        &self,
        professional_id: &ProfessionalId,
        window: &TimeSlot,
    ) -> Result<Vec<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .values()
            .filter(|b| b.professional_id() == professional_id)
            .filter(|b| b.blocks_schedule())
            .filter(|b| b.slot().overlaps(window))
            .cloned()
            .collect())
    }

    async fn list_by_requester(
        &self,
        requester_id: &UserId,
        filter: StatusFilter,
    ) -> Result<Vec<Booking>, DomainError> {
        let mut found: Vec<Booking> = self
            .bookings
            .read()
            .await
            .values()
            .filter(|b| b.requester_id() == requester_id && filter.matches(b.status()))
            .cloned()
            .collect();
        scheduled_desc(&mut found);
        Ok(found)
    }

    async fn list_by_professional(
        &self,
        professional_id: &ProfessionalId,
        filter: StatusFilter,
    ) -> Result<Vec<Booking>, DomainError> {
        let mut found: Vec<Booking> = self
            .bookings
            .read()
            .await
            .values()
            .filter(|b| b.professional_id() == professional_id && filter.matches(b.status()))
            .cloned()
            .collect();
        scheduled_desc(&mut found);
        Ok(found)
    }
}
