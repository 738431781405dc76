use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use tradeswork::adapters::{
    ConversationRooms, InMemoryEventBus, ModerationReviewQueue, PostgresBookingRepository,
    PostgresConversationRepository, PostgresProfessionalDirectory,
    RepositoryBookingStatusLookup, TracingNotificationDispatcher,
};
use tradeswork::adapters::events::FLAGGED_FOR_REVIEW_EVENT;
use tradeswork::application::{
    AppendProgressPhotoHandler, CanMessageHandler, CancelBookingHandler,
    ConversationLifecycleService, CreateBookingHandler, FreezeConversationHandler,
    GetBookingHandler, GetMessagesHandler, GetOrCreateConversationHandler,
    GetUnreadSummaryHandler, ListBookingsHandler, ListConversationsHandler,
    MarkMessageReadHandler, SendMessageHandler, UpdateBookingStatusHandler,
};
use tradeswork::config::{AppConfig, LogFormat, ServerConfig};
use tradeswork::domain::moderation::ContentModerationFilter;
use tradeswork::ports::{
    BookingRepository, BookingStatusLookup, ConversationLifecycle, ConversationRepository,
    EventPublisher, EventSubscriber, NotificationDispatcher, ProfessionalDirectory,
    RealtimePublisher,
};

/// Every handler, wired against PostgreSQL and the in-process transports.
#[allow(dead_code)]
struct Services {
    create_booking: CreateBookingHandler,
    update_booking_status: UpdateBookingStatusHandler,
    cancel_booking: CancelBookingHandler,
    append_progress_photo: AppendProgressPhotoHandler,
    get_booking: GetBookingHandler,
    list_bookings: ListBookingsHandler,
    get_or_create_conversation: GetOrCreateConversationHandler,
    send_message: SendMessageHandler,
    get_messages: GetMessagesHandler,
    mark_message_read: MarkMessageReadHandler,
    freeze_conversation: FreezeConversationHandler,
    can_message: CanMessageHandler,
    list_conversations: ListConversationsHandler,
    unread_summary: GetUnreadSummaryHandler,
    review_queue: Arc<ModerationReviewQueue>,
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match server.effective_log_format() {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn wire(config: &AppConfig, pool: sqlx::PgPool) -> Services {
    let messaging = &config.messaging;
    let retry = messaging.write_retry_policy();

    let bookings: Arc<dyn BookingRepository> =
        Arc::new(PostgresBookingRepository::new(pool.clone()));
    let conversations: Arc<dyn ConversationRepository> =
        Arc::new(PostgresConversationRepository::new(pool.clone()));
    let directory: Arc<dyn ProfessionalDirectory> =
        Arc::new(PostgresProfessionalDirectory::new(pool));
    let status_lookup: Arc<dyn BookingStatusLookup> =
        Arc::new(RepositoryBookingStatusLookup::new(bookings.clone()));
    let notifier: Arc<dyn NotificationDispatcher> = Arc::new(TracingNotificationDispatcher::new());
    let realtime: Arc<dyn RealtimePublisher> =
        Arc::new(ConversationRooms::new(messaging.realtime_channel_capacity));

    let event_bus = Arc::new(InMemoryEventBus::new());
    let review_queue = Arc::new(ModerationReviewQueue::new());
    event_bus.subscribe(&[FLAGGED_FOR_REVIEW_EVENT], review_queue.clone());
    let events: Arc<dyn EventPublisher> = event_bus;

    let lifecycle: Arc<dyn ConversationLifecycle> = Arc::new(ConversationLifecycleService::new(
        GetOrCreateConversationHandler::new(conversations.clone(), status_lookup.clone()),
        FreezeConversationHandler::new(conversations.clone(), realtime.clone(), retry),
    ));

    Services {
        create_booking: CreateBookingHandler::new(
            bookings.clone(),
            directory,
            lifecycle.clone(),
            notifier.clone(),
            events.clone(),
        ),
        update_booking_status: UpdateBookingStatusHandler::new(
            bookings.clone(),
            lifecycle,
            notifier.clone(),
            events.clone(),
        ),
        cancel_booking: CancelBookingHandler::new(
            bookings.clone(),
            notifier.clone(),
            events.clone(),
        ),
        append_progress_photo: AppendProgressPhotoHandler::new(bookings.clone()),
        get_booking: GetBookingHandler::new(bookings.clone()),
        list_bookings: ListBookingsHandler::new(bookings),
        get_or_create_conversation: GetOrCreateConversationHandler::new(
            conversations.clone(),
            status_lookup.clone(),
        ),
        send_message: SendMessageHandler::new(
            conversations.clone(),
            ContentModerationFilter::default(),
            notifier,
            realtime.clone(),
            events,
            retry,
        ),
        get_messages: GetMessagesHandler::new(conversations.clone(), messaging.default_page_size),
        mark_message_read: MarkMessageReadHandler::new(
            conversations.clone(),
            realtime.clone(),
            retry,
        ),
        freeze_conversation: FreezeConversationHandler::new(
            conversations.clone(),
            realtime,
            retry,
        ),
        can_message: CanMessageHandler::new(conversations.clone(), status_lookup),
        list_conversations: ListConversationsHandler::new(conversations.clone()),
        unread_summary: GetUnreadSummaryHandler::new(conversations),
        review_queue,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.server);

    info!(environment = ?config.server.environment, "Tradeswork starting");

    let pool = config.database.pool_options().connect(&config.database.url).await?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to PostgreSQL"
    );

    let services = wire(&config, pool.clone());
    info!(
        page_size = config.messaging.default_page_size,
        write_attempts = config.messaging.conversation_write_attempts,
        "Handlers wired"
    );

    tokio::signal::ctrl_c().await?;
    info!(
        pending_reviews = services.review_queue.pending_count().await,
        "Shutting down"
    );
    pool.close().await;

    Ok(())
}
