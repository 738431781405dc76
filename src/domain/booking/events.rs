//! Booking domain events.

use serde::{Deserialize, Serialize};

use super::{Booking, BookingStatus};
use crate::domain::foundation::{
    domain_event, BookingId, EventId, ProfessionalId, Timestamp, UserId,
};

/// Published when a client books a professional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreated {
    pub event_id: EventId,
    pub booking_id: BookingId,
    pub requester_id: UserId,
    pub professional_id: ProfessionalId,
    pub scheduled_at: Timestamp,
    pub duration_minutes: u32,
    pub created_at: Timestamp,
}

domain_event!(BookingCreated: "booking.created.v1" for Booking(booking_id) at created_at);

impl BookingCreated {
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            event_id: EventId::new(),
            booking_id: *booking.id(),
            requester_id: booking.requester_id().clone(),
            professional_id: *booking.professional_id(),
            scheduled_at: booking.scheduled_at(),
            duration_minutes: booking.duration_minutes(),
            created_at: booking.created_at(),
        }
    }
}

/// Published after every committed status transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingStatusChanged {
    pub event_id: EventId,
    pub booking_id: BookingId,
    pub from: BookingStatus,
    pub to: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub changed_at: Timestamp,
}

domain_event!(
    BookingStatusChanged: "booking.status_changed.v1"
    for Booking(booking_id) at changed_at
);
