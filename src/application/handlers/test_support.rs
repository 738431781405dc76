//! In-memory wiring shared by handler tests.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::adapters::{
    ConversationRooms, InMemoryBookingRepository, InMemoryConversationRepository,
    InMemoryEventBus, InMemoryProfessionalDirectory, RecordingNotificationDispatcher,
    RepositoryBookingStatusLookup,
};
use crate::domain::booking::{
    Booking, BookingRequest, ProfessionalProfile, ProfessionalType, ProjectDetails,
};
use crate::domain::conversation::{Message, MessageType};
use crate::domain::foundation::{
    BookingId, CommandMetadata, ConversationId, DomainError, ErrorCode, EventEnvelope,
    ProfessionalId, Timestamp, UserId,
};
use crate::domain::moderation::ContentModerationFilter;
use crate::ports::{
    BookingRepository, ConversationLifecycle, ConversationRepository, EventPublisher,
    RealtimePublisher,
};

use super::booking::{
    CancelBookingHandler, CreateBookingCommand, CreateBookingHandler, UpdateBookingStatusHandler,
};
use super::conversation::{
    CanMessageHandler, ConversationLifecycleService, FreezeConversationHandler,
    GetMessagesHandler, GetOrCreateConversationHandler, MarkMessageReadHandler,
    SendMessageCommand, SendMessageHandler, WriteRetryPolicy, DEFAULT_PAGE_SIZE,
};

pub fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

/// A fixed day; tests only vary the time of day.
pub fn at(hour: u32, minute: u32) -> Timestamp {
    Timestamp::from_datetime(Utc.with_ymd_and_hms(2030, 6, 3, hour, minute, 0).unwrap())
}

fn unavailable(what: &str) -> DomainError {
    DomainError::new(ErrorCode::InternalError, format!("{} unavailable", what))
}

struct FailingLifecycle;

#[async_trait]
impl ConversationLifecycle for FailingLifecycle {
    async fn open_for_booking(&self, _: &BookingId) -> Result<ConversationId, DomainError> {
        Err(unavailable("conversation service"))
    }

    async fn freeze_for_booking(&self, _: &BookingId) -> Result<(), DomainError> {
        Err(unavailable("conversation service"))
    }
}

struct FailingEventPublisher;

#[async_trait]
impl EventPublisher for FailingEventPublisher {
    async fn publish(&self, _: EventEnvelope) -> Result<(), DomainError> {
        Err(unavailable("event bus"))
    }
}

struct FailingRealtime;

#[async_trait]
impl RealtimePublisher for FailingRealtime {
    async fn publish(&self, _: &ConversationId, _: &str, _: JsonValue) -> Result<(), DomainError> {
        Err(unavailable("realtime gateway"))
    }
}

pub struct Fixture {
    pub client: UserId,
    pub general_pro: ProfessionalProfile,
    pub project_pro: ProfessionalProfile,
    pub bookings: Arc<InMemoryBookingRepository>,
    pub conversations: Arc<InMemoryConversationRepository>,
    pub directory: Arc<InMemoryProfessionalDirectory>,
    pub notifier: Arc<RecordingNotificationDispatcher>,
    pub events: Arc<InMemoryEventBus>,
    pub rooms: Arc<ConversationRooms>,
}

impl Fixture {
    pub async fn new() -> Self {
        let client = user("client-1");
        let general_pro = ProfessionalProfile {
            id: ProfessionalId::new(),
            user_id: user("handyman-1"),
            professional_type: ProfessionalType::GeneralService,
            is_available: true,
        };
        let project_pro = ProfessionalProfile {
            id: ProfessionalId::new(),
            user_id: user("artist-1"),
            professional_type: ProfessionalType::ProjectBased,
            is_available: true,
        };

        let directory = Arc::new(InMemoryProfessionalDirectory::new());
        directory.add_user(client.clone()).await;
        directory.add_professional(general_pro.clone()).await;
        directory.add_professional(project_pro.clone()).await;

        Self {
            client,
            general_pro,
            project_pro,
            bookings: Arc::new(InMemoryBookingRepository::new()),
            conversations: Arc::new(InMemoryConversationRepository::new()),
            directory,
            notifier: Arc::new(RecordingNotificationDispatcher::new()),
            events: Arc::new(InMemoryEventBus::recording()),
            rooms: Arc::new(ConversationRooms::default()),
        }
    }

    pub fn metadata(&self) -> CommandMetadata {
        CommandMetadata::new(self.client.clone())
    }

    fn lifecycle(&self) -> Arc<dyn ConversationLifecycle> {
        Arc::new(ConversationLifecycleService::new(
            self.get_or_create_handler(),
            self.freeze_handler(),
        ))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Booking handlers
    // ─────────────────────────────────────────────────────────────────────

    pub fn create_booking_handler(&self) -> CreateBookingHandler {
        CreateBookingHandler::new(
            self.bookings.clone(),
            self.directory.clone(),
            self.lifecycle(),
            self.notifier.clone(),
            self.events.clone(),
        )
    }

    pub fn create_booking_handler_with_failing_collaborators(&self) -> CreateBookingHandler {
        CreateBookingHandler::new(
            self.bookings.clone(),
            self.directory.clone(),
            Arc::new(FailingLifecycle),
            Arc::new(RecordingNotificationDispatcher::failing()),
            Arc::new(FailingEventPublisher),
        )
    }

    pub fn update_status_handler(&self) -> UpdateBookingStatusHandler {
        UpdateBookingStatusHandler::new(
            self.bookings.clone(),
            self.lifecycle(),
            self.notifier.clone(),
            self.events.clone(),
        )
    }

    pub fn update_status_handler_with_failing_collaborators(&self) -> UpdateBookingStatusHandler {
        UpdateBookingStatusHandler::new(
            self.bookings.clone(),
            Arc::new(FailingLifecycle),
            Arc::new(RecordingNotificationDispatcher::failing()),
            Arc::new(FailingEventPublisher),
        )
    }

    pub fn cancel_handler(&self) -> CancelBookingHandler {
        CancelBookingHandler::new(
            self.bookings.clone(),
            self.notifier.clone(),
            self.events.clone(),
        )
    }

    // ─────────────────────────────────────────────────────────────────────
    // Conversation handlers
    // ─────────────────────────────────────────────────────────────────────

    pub fn get_or_create_handler(&self) -> GetOrCreateConversationHandler {
        GetOrCreateConversationHandler::new(
            self.conversations.clone(),
            Arc::new(RepositoryBookingStatusLookup::new(self.bookings.clone())),
        )
    }

    pub fn freeze_handler(&self) -> FreezeConversationHandler {
        FreezeConversationHandler::new(
            self.conversations.clone(),
            self.rooms.clone(),
            WriteRetryPolicy::default(),
        )
    }

    pub fn send_message_handler(&self) -> SendMessageHandler {
        SendMessageHandler::new(
            self.conversations.clone(),
            ContentModerationFilter::default(),
            self.notifier.clone(),
            self.rooms.clone(),
            self.events.clone(),
            WriteRetryPolicy::default(),
        )
    }

    pub fn send_message_handler_with_failing_collaborators(&self) -> SendMessageHandler {
        SendMessageHandler::new(
            self.conversations.clone(),
            ContentModerationFilter::default(),
            Arc::new(RecordingNotificationDispatcher::failing()),
            Arc::new(FailingRealtime),
            Arc::new(FailingEventPublisher),
            WriteRetryPolicy::default(),
        )
    }

    pub fn mark_read_handler(&self) -> MarkMessageReadHandler {
        MarkMessageReadHandler::new(
            self.conversations.clone(),
            self.rooms.clone(),
            WriteRetryPolicy::default(),
        )
    }

    pub fn get_messages_handler(&self) -> GetMessagesHandler {
        GetMessagesHandler::new(self.conversations.clone(), DEFAULT_PAGE_SIZE)
    }

    pub fn can_message_handler(&self) -> CanMessageHandler {
        CanMessageHandler::new(
            self.conversations.clone(),
            Arc::new(RepositoryBookingStatusLookup::new(self.bookings.clone())),
        )
    }

    // ─────────────────────────────────────────────────────────────────────
    // Seed data
    // ─────────────────────────────────────────────────────────────────────

    fn request(
        &self,
        professional: &ProfessionalProfile,
        start: Timestamp,
        minutes: u32,
    ) -> BookingRequest {
        let project_details = professional
            .professional_type
            .is_project_based()
            .then(|| ProjectDetails {
                title: "Living room mural".to_string(),
                scope: "One wall, botanical theme".to_string(),
                dimensions: Some("4m x 2.5m".to_string()),
                deadline: None,
            });
        BookingRequest {
            requester_id: self.client.clone(),
            professional_id: professional.id,
            professional_type: professional.professional_type,
            category: "home".to_string(),
            scheduled_at: start,
            duration_minutes: minutes,
            address: "1 Main St".to_string(),
            description: "Test booking".to_string(),
            estimated_price: 10_000,
            project_details,
            reference_images: vec![],
        }
    }

    async fn create_through_handler(
        &self,
        professional: &ProfessionalProfile,
        start: Timestamp,
        minutes: u32,
    ) -> Booking {
        let request = self.request(professional, start, minutes);
        self.create_booking_handler()
            .handle(
                CreateBookingCommand {
                    requester_id: request.requester_id,
                    professional_id: request.professional_id,
                    professional_type: request.professional_type,
                    category: request.category,
                    scheduled_at: request.scheduled_at,
                    duration_minutes: request.duration_minutes,
                    address: request.address,
                    description: request.description,
                    estimated_price: request.estimated_price,
                    project_details: request.project_details,
                    reference_images: request.reference_images,
                },
                self.metadata(),
            )
            .await
            .unwrap()
            .booking
    }

    /// Pending general-service booking, created with its conversation.
    pub async fn general_booking(&self, start: Timestamp, minutes: u32) -> Booking {
        let professional = self.general_pro.clone();
        self.create_through_handler(&professional, start, minutes).await
    }

    /// Pending project-based booking, created with its conversation.
    pub async fn project_booking(&self, start: Timestamp, minutes: u32) -> Booking {
        let professional = self.project_pro.clone();
        self.create_through_handler(&professional, start, minutes).await
    }

    /// Booking stored directly, bypassing conversation creation.
    pub async fn booking_without_conversation(&self, start: Timestamp, minutes: u32) -> Booking {
        let booking =
            Booking::request(self.request(&self.general_pro, start, minutes), &self.general_pro)
                .unwrap();
        self.bookings.save(&booking).await.unwrap();
        booking
    }

    /// One-hour general booking and the conversation opened for it.
    pub async fn booking_with_conversation(&self, start: Timestamp) -> (BookingId, ConversationId) {
        let booking = self.general_booking(start, 60).await;
        let conversation = self
            .conversations
            .find_by_booking_id(booking.id())
            .await
            .unwrap()
            .unwrap();
        (*booking.id(), *conversation.id())
    }

    /// Sends a plain text message and returns the stored copy.
    pub async fn send_text(
        &self,
        conversation_id: ConversationId,
        sender: &UserId,
        content: &str,
    ) -> Message {
        self.send_message_handler()
            .handle(
                SendMessageCommand {
                    conversation_id,
                    sender_id: sender.clone(),
                    content: content.to_string(),
                    message_type: MessageType::Text,
                    file_url: None,
                },
                self.metadata(),
            )
            .await
            .unwrap()
            .message
    }
}
