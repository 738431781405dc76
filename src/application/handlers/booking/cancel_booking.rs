//! CancelBookingHandler - Command handler for cancelling a booking.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError, BookingStatusChanged};
use crate::domain::foundation::{BookingId, CommandMetadata, EventId, SideEffectOutcome};
use crate::ports::{BookingRepository, EventPublisher, NotificationDispatcher};

use super::update_booking_status::notify_parties;
use crate::application::handlers::side_effects::publish_event;

/// Command to cancel a PENDING or CONFIRMED booking.
#[derive(Debug, Clone)]
pub struct CancelBookingCommand {
    pub booking_id: BookingId,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct CancelBookingResult {
    pub booking: Booking,
    pub notifications: Vec<SideEffectOutcome>,
    pub event: SideEffectOutcome,
}

pub struct CancelBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    notifier: Arc<dyn NotificationDispatcher>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CancelBookingHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        notifier: Arc<dyn NotificationDispatcher>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            bookings,
            notifier,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CancelBookingCommand,
        metadata: CommandMetadata,
    ) -> Result<CancelBookingResult, BookingError> {
        let mut booking = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or(BookingError::NotFound(cmd.booking_id))?;

        let previous_status = booking.cancel(cmd.reason.clone())?;
        self.bookings.update(&mut booking).await?;
        tracing::info!(
            booking_id = %booking.id(),
            from = %previous_status,
            correlation_id = %metadata.correlation_id(),
            "Booking cancelled"
        );

        let notifications = notify_parties(self.notifier.as_ref(), &booking).await;
        let event = publish_event(
            self.event_publisher.as_ref(),
            &BookingStatusChanged {
                event_id: EventId::new(),
                booking_id: *booking.id(),
                from: previous_status,
                to: booking.status(),
                notes: Some(cmd.reason),
                changed_at: booking.updated_at(),
            },
            &metadata,
        )
        .await;

        Ok(CancelBookingResult {
            booking,
            notifications,
            event,
        })
    }
}
