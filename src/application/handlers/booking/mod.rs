//! Booking command and query handlers.

mod append_progress_photo;
mod cancel_booking;
mod create_booking;
mod get_booking;
mod list_bookings;
mod update_booking_status;

pub use append_progress_photo::{
    AppendProgressPhotoCommand, AppendProgressPhotoHandler, AppendProgressPhotoResult,
};
pub use cancel_booking::{CancelBookingCommand, CancelBookingHandler, CancelBookingResult};
pub use create_booking::{CreateBookingCommand, CreateBookingHandler, CreateBookingResult};
pub use get_booking::{GetBookingHandler, GetBookingQuery};
pub use list_bookings::{BookingParty, ListBookingsHandler, ListBookingsQuery};
pub use update_booking_status::{
    UpdateBookingStatusCommand, UpdateBookingStatusHandler, UpdateBookingStatusResult,
};

use serde_json::{json, Value as JsonValue};

use crate::domain::booking::Booking;

/// Notification payload describing a booking.
fn booking_summary(booking: &Booking) -> JsonValue {
    json!({
        "booking_id": booking.id().to_string(),
        "status": booking.status().as_str(),
        "category": booking.category(),
        "scheduled_at": booking.scheduled_at().to_string(),
        "duration_minutes": booking.duration_minutes(),
        "requester_id": booking.requester_id().as_str(),
        "professional_id": booking.professional_id().to_string(),
    })
}
