//! GetBookingHandler - Query handler for a single booking.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::BookingId;
use crate::ports::BookingRepository;

#[derive(Debug, Clone)]
pub struct GetBookingQuery {
    pub booking_id: BookingId,
}

pub struct GetBookingHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl GetBookingHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(&self, query: GetBookingQuery) -> Result<Booking, BookingError> {
        self.bookings
            .find_by_id(&query.booking_id)
            .await?
            .ok_or(BookingError::NotFound(query.booking_id))
    }
}
