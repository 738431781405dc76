//! CreateBookingHandler - Command handler for requesting a booking.

use std::sync::Arc;

use crate::domain::booking::{
    Booking, BookingCreated, BookingError, BookingRequest, ProfessionalType, ProjectDetails,
};
use crate::domain::foundation::{
    best_effort, CommandMetadata, ProfessionalId, SideEffectOutcome, Timestamp, UserId,
};
use crate::domain::scheduling::has_conflict;
use crate::ports::{
    BookingRepository, ConversationLifecycle, EventPublisher, NotificationDispatcher,
    NotificationKind, ProfessionalDirectory,
};

use super::booking_summary;
use crate::application::handlers::side_effects::{notify, publish_event};

/// Command to book a professional.
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub requester_id: UserId,
    pub professional_id: ProfessionalId,
    pub professional_type: ProfessionalType,
    pub category: String,
    pub scheduled_at: Timestamp,
    pub duration_minutes: u32,
    pub address: String,
    pub description: String,
    pub estimated_price: i64,
    pub project_details: Option<ProjectDetails>,
    pub reference_images: Vec<String>,
}

/// Result of successful booking creation.
#[derive(Debug, Clone)]
pub struct CreateBookingResult {
    pub booking: Booking,
    pub conversation: SideEffectOutcome,
    pub notification: SideEffectOutcome,
    pub event: SideEffectOutcome,
}

/// Handler for creating bookings.
pub struct CreateBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    directory: Arc<dyn ProfessionalDirectory>,
    conversations: Arc<dyn ConversationLifecycle>,
    notifier: Arc<dyn NotificationDispatcher>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateBookingHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        directory: Arc<dyn ProfessionalDirectory>,
        conversations: Arc<dyn ConversationLifecycle>,
        notifier: Arc<dyn NotificationDispatcher>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            bookings,
            directory,
            conversations,
            notifier,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateBookingCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateBookingResult, BookingError> {
        // 1. Resolve both parties
        if !self.directory.user_exists(&cmd.requester_id).await? {
            return Err(BookingError::reference_not_found(format!(
                "User not found: {}",
                cmd.requester_id
            )));
        }
        let professional = self
            .directory
            .find_professional(&cmd.professional_id)
            .await?
            .ok_or_else(|| {
                BookingError::reference_not_found(format!(
                    "Professional not found: {}",
                    cmd.professional_id
                ))
            })?;

        // 2. Build the aggregate (availability, type and field validation)
        let booking = Booking::request(
            BookingRequest {
                requester_id: cmd.requester_id,
                professional_id: cmd.professional_id,
                professional_type: cmd.professional_type,
                category: cmd.category,
                scheduled_at: cmd.scheduled_at,
                duration_minutes: cmd.duration_minutes,
                address: cmd.address,
                description: cmd.description,
                estimated_price: cmd.estimated_price,
                project_details: cmd.project_details,
                reference_images: cmd.reference_images,
            },
            &professional,
        )?;

        // 3. Reject double booking
        let candidates = self
            .bookings
            .find_active_for_professional(booking.professional_id(), booking.slot())
            .await?;
        let active_slots: Vec<_> = candidates
            .iter()
            .filter(|b| b.blocks_schedule())
            .map(|b| *b.slot())
            .collect();
        if has_conflict(booking.slot(), &active_slots) {
            tracing::info!(
                professional_id = %booking.professional_id(),
                start = %booking.scheduled_at(),
                end = %booking.ends_at(),
                "Booking rejected by scheduling conflict"
            );
            return Err(BookingError::conflict(format!(
                "Professional already has a booking between {} and {}",
                booking.scheduled_at(),
                booking.ends_at()
            )));
        }

        // 4. Persist
        self.bookings.save(&booking).await?;
        tracing::info!(
            booking_id = %booking.id(),
            requester_id = %booking.requester_id(),
            professional_id = %booking.professional_id(),
            correlation_id = %metadata.correlation_id(),
            "Booking created"
        );

        // 5. Best-effort follow-ups
        let conversation = best_effort(
            "booking.open_conversation",
            self.conversations.open_for_booking(booking.id()),
        )
        .await;
        let notification = notify(
            self.notifier.as_ref(),
            booking.professional_user_id(),
            NotificationKind::BookingCreated,
            booking_summary(&booking),
        )
        .await;
        let event = publish_event(
            self.event_publisher.as_ref(),
            &BookingCreated::from_booking(&booking),
            &metadata,
        )
        .await;

        Ok(CreateBookingResult {
            booking,
            conversation,
            notification,
            event,
        })
    }
}
