//! UpdateBookingStatusHandler - Command handler for booking status transitions.

use std::sync::Arc;

use crate::domain::booking::{
    Booking, BookingError, BookingStatus, BookingStatusChanged, PhotoUpload,
};
use crate::domain::foundation::{
    best_effort, BookingId, CommandMetadata, EventId, SideEffectOutcome,
};
use crate::ports::{
    BookingRepository, ConversationLifecycle, EventPublisher, NotificationDispatcher,
    NotificationKind,
};

use super::booking_summary;
use crate::application::handlers::side_effects::{notify, publish_event};

/// Command to move a booking to a new status.
#[derive(Debug, Clone)]
pub struct UpdateBookingStatusCommand {
    pub booking_id: BookingId,
    pub status: BookingStatus,
    pub notes: Option<String>,
    /// Attached on the move to IN_PROGRESS for project-based bookings.
    pub photos: Vec<PhotoUpload>,
}

/// Result of a committed status transition.
#[derive(Debug, Clone)]
pub struct UpdateBookingStatusResult {
    pub booking: Booking,
    pub previous_status: BookingStatus,
    /// One outcome per status-change notification sent.
    pub notifications: Vec<SideEffectOutcome>,
    pub conversation_freeze: SideEffectOutcome,
    pub rating_request: SideEffectOutcome,
    pub event: SideEffectOutcome,
}

/// Handler for booking status transitions.
pub struct UpdateBookingStatusHandler {
    bookings: Arc<dyn BookingRepository>,
    conversations: Arc<dyn ConversationLifecycle>,
    notifier: Arc<dyn NotificationDispatcher>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateBookingStatusHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        conversations: Arc<dyn ConversationLifecycle>,
        notifier: Arc<dyn NotificationDispatcher>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            bookings,
            conversations,
            notifier,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateBookingStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateBookingStatusResult, BookingError> {
        let mut booking = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or(BookingError::NotFound(cmd.booking_id))?;

        let previous_status = booking.transition_to(cmd.status, cmd.notes.clone())?;
        if cmd.status == BookingStatus::InProgress && booking.professional_type().is_project_based()
        {
            for photo in cmd.photos {
                booking.append_progress_photo(photo)?;
            }
        }

        self.bookings.update(&mut booking).await?;
        tracing::info!(
            booking_id = %booking.id(),
            from = %previous_status,
            to = %booking.status(),
            correlation_id = %metadata.correlation_id(),
            "Booking status changed"
        );

        let (conversation_freeze, rating_request) = if booking.status() == BookingStatus::Completed
        {
            (
                best_effort(
                    "booking.freeze_conversation",
                    self.conversations.freeze_for_booking(booking.id()),
                )
                .await,
                notify(
                    self.notifier.as_ref(),
                    booking.requester_id(),
                    NotificationKind::RatingRequested,
                    booking_summary(&booking),
                )
                .await,
            )
        } else {
            (SideEffectOutcome::Skipped, SideEffectOutcome::Skipped)
        };

        let notifications = notify_parties(self.notifier.as_ref(), &booking).await;

        let event = publish_event(
            self.event_publisher.as_ref(),
            &BookingStatusChanged {
                event_id: EventId::new(),
                booking_id: *booking.id(),
                from: previous_status,
                to: booking.status(),
                notes: cmd.notes,
                changed_at: booking.updated_at(),
            },
            &metadata,
        )
        .await;

        Ok(UpdateBookingStatusResult {
            booking,
            previous_status,
            notifications,
            conversation_freeze,
            rating_request,
            event,
        })
    }
}

/// Sends the status-change notification to whoever the new status addresses.
pub(super) async fn notify_parties(
    notifier: &dyn NotificationDispatcher,
    booking: &Booking,
) -> Vec<SideEffectOutcome> {
    let audience = booking.status().notification_audience();
    let kind = if booking.status() == BookingStatus::Cancelled {
        NotificationKind::BookingCancelled
    } else {
        NotificationKind::BookingStatusChanged
    };

    let mut outcomes = Vec::new();
    if audience.client {
        outcomes.push(
            notify(notifier, booking.requester_id(), kind, booking_summary(booking)).await,
        );
    }
    if audience.professional {
        outcomes.push(
            notify(
                notifier,
                booking.professional_user_id(),
                kind,
                booking_summary(booking),
            )
            .await,
        );
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{at, Fixture};
    use crate::domain::foundation::ErrorKind;
    use crate::ports::ConversationRepository;

    async fn advance(
        fixture: &Fixture,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> Result<UpdateBookingStatusResult, BookingError> {
        fixture
            .update_status_handler()
            .handle(
                UpdateBookingStatusCommand {
                    booking_id,
                    status,
                    notes: None,
                    photos: vec![],
                },
                fixture.metadata(),
            )
            .await
    }

    #[tokio::test]
    async fn pending_cannot_jump_to_completed() {
        let fixture = Fixture::new().await;
        let booking = fixture.general_booking(at(9, 0), 60).await;

        let err = advance(&fixture, *booking.id(), BookingStatus::Completed)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert!(err.to_string().contains("PENDING"));
        assert!(err.to_string().contains("COMPLETED"));
    }

    #[tokio::test]
    async fn full_path_stamps_timestamps_and_freezes_conversation() {
        let fixture = Fixture::new().await;
        let booking = fixture.general_booking(at(9, 0), 60).await;
        let id = *booking.id();

        advance(&fixture, id, BookingStatus::Confirmed).await.unwrap();
        let started = advance(&fixture, id, BookingStatus::InProgress).await.unwrap();
        assert!(started.booking.started_at().is_some());
        assert_eq!(started.conversation_freeze, SideEffectOutcome::Skipped);

        let completed = advance(&fixture, id, BookingStatus::Completed).await.unwrap();
        assert!(completed.booking.started_at().is_some());
        assert!(completed.booking.completed_at().is_some());
        assert!(completed.conversation_freeze.is_completed());
        assert!(completed.rating_request.is_completed());
        assert_eq!(completed.previous_status, BookingStatus::InProgress);

        let conversation = fixture
            .conversations
            .find_by_booking_id(&id)
            .await
            .unwrap()
            .unwrap();
        assert!(!conversation.is_active());
        assert_eq!(
            fixture
                .notifier
                .sent_to(&fixture.client, NotificationKind::RatingRequested)
                .await,
            1
        );
    }

    #[tokio::test]
    async fn notifications_follow_the_audience_table() {
        let fixture = Fixture::new().await;
        let booking = fixture.general_booking(at(9, 0), 60).await;
        let id = *booking.id();

        let confirmed = advance(&fixture, id, BookingStatus::Confirmed).await.unwrap();
        assert_eq!(confirmed.notifications.len(), 1);

        let cancelled = advance(&fixture, id, BookingStatus::Cancelled).await.unwrap();
        assert_eq!(cancelled.notifications.len(), 2);
        assert_eq!(
            fixture
                .notifier
                .sent_to(&fixture.general_pro.user_id, NotificationKind::BookingCancelled)
                .await,
            1
        );
    }

    #[tokio::test]
    async fn disputes_notify_nobody() {
        let fixture = Fixture::new().await;
        let booking = fixture.general_booking(at(9, 0), 60).await;
        let id = *booking.id();
        advance(&fixture, id, BookingStatus::Confirmed).await.unwrap();
        advance(&fixture, id, BookingStatus::InProgress).await.unwrap();

        let disputed = advance(&fixture, id, BookingStatus::Disputed).await.unwrap();
        assert!(disputed.notifications.is_empty());
        let resolved = advance(&fixture, id, BookingStatus::Resolved).await.unwrap();
        assert!(resolved.notifications.is_empty());
    }

    #[tokio::test]
    async fn cancellation_notes_become_the_reason() {
        let fixture = Fixture::new().await;
        let booking = fixture.general_booking(at(9, 0), 60).await;

        let result = fixture
            .update_status_handler()
            .handle(
                UpdateBookingStatusCommand {
                    booking_id: *booking.id(),
                    status: BookingStatus::Cancelled,
                    notes: Some("client travelling".to_string()),
                    photos: vec![],
                },
                fixture.metadata(),
            )
            .await
            .unwrap();

        assert!(result.booking.cancelled_at().is_some());
        assert_eq!(result.booking.cancellation_reason(), Some("client travelling"));
    }

    #[tokio::test]
    async fn photos_attach_when_project_work_starts() {
        let fixture = Fixture::new().await;
        let booking = fixture.project_booking(at(9, 0), 240).await;
        let id = *booking.id();
        advance(&fixture, id, BookingStatus::Confirmed).await.unwrap();

        let started = fixture
            .update_status_handler()
            .handle(
                UpdateBookingStatusCommand {
                    booking_id: id,
                    status: BookingStatus::InProgress,
                    notes: None,
                    photos: vec![PhotoUpload::new(
                        "https://cdn.example.com/before.jpg",
                        Some("before".to_string()),
                    )],
                },
                fixture.metadata(),
            )
            .await
            .unwrap();

        assert_eq!(started.booking.progress_photos().len(), 1);
        assert_eq!(
            started.booking.progress_photos()[0].uploaded_by,
            fixture.project_pro.id
        );
    }

    #[tokio::test]
    async fn missing_booking_is_not_found() {
        let fixture = Fixture::new().await;
        let err = advance(&fixture, BookingId::new(), BookingStatus::Confirmed)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn freeze_failure_does_not_fail_completion() {
        let fixture = Fixture::new().await;
        let booking = fixture.general_booking(at(9, 0), 60).await;
        let id = *booking.id();
        advance(&fixture, id, BookingStatus::Confirmed).await.unwrap();
        advance(&fixture, id, BookingStatus::InProgress).await.unwrap();

        let handler = fixture.update_status_handler_with_failing_collaborators();
        let result = handler
            .handle(
                UpdateBookingStatusCommand {
                    booking_id: id,
                    status: BookingStatus::Completed,
                    notes: None,
                    photos: vec![],
                },
                fixture.metadata(),
            )
            .await
            .unwrap();

        assert!(result.conversation_freeze.is_failed());
        assert!(result.rating_request.is_failed());
        assert_eq!(result.booking.status(), BookingStatus::Completed);
    }
}
