//! Shared best-effort side effects for command handlers.

use serde_json::Value as JsonValue;

use crate::domain::foundation::{
    best_effort, CommandMetadata, SerializableDomainEvent, SideEffectOutcome, UserId,
};
use crate::ports::{EventPublisher, NotificationDispatcher, NotificationKind};

/// Publishes a domain event stamped with the command's correlation context.
pub(crate) async fn publish_event<E>(
    publisher: &dyn EventPublisher,
    event: &E,
    metadata: &CommandMetadata,
) -> SideEffectOutcome
where
    E: SerializableDomainEvent,
{
    best_effort(event.event_type(), async {
        publisher
            .publish(event.to_envelope()?.caused_by(metadata))
            .await
    })
    .await
}

/// Sends one notification, logging instead of failing.
pub(crate) async fn notify(
    dispatcher: &dyn NotificationDispatcher,
    recipient: &UserId,
    kind: NotificationKind,
    data: JsonValue,
) -> SideEffectOutcome {
    best_effort(kind.as_str(), dispatcher.notify(recipient, kind, data)).await
}
