//! ListBookingsHandler - Query handler for a party's bookings.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError, StatusFilter};
use crate::domain::foundation::{ProfessionalId, UserId};
use crate::ports::BookingRepository;

/// Whose bookings to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingParty {
    Requester(UserId),
    Professional(ProfessionalId),
}

/// Query for bookings ordered by scheduled time, latest first.
#[derive(Debug, Clone)]
pub struct ListBookingsQuery {
    pub party: BookingParty,
    pub filter: StatusFilter,
}

impl ListBookingsQuery {
    pub fn for_requester(user_id: UserId, filter: StatusFilter) -> Self {
        Self {
            party: BookingParty::Requester(user_id),
            filter,
        }
    }

    pub fn for_professional(professional_id: ProfessionalId, filter: StatusFilter) -> Self {
        Self {
            party: BookingParty::Professional(professional_id),
            filter,
        }
    }
}

pub struct ListBookingsHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl ListBookingsHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(&self, query: ListBookingsQuery) -> Result<Vec<Booking>, BookingError> {
        let bookings = match &query.party {
            BookingParty::Requester(user_id) => {
                self.bookings.list_by_requester(user_id, query.filter).await?
            }
            BookingParty::Professional(professional_id) => {
                self.bookings
                    .list_by_professional(professional_id, query.filter)
                    .await?
            }
        };
        Ok(bookings)
    }
}
