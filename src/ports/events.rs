//! Domain event delivery.
//!
//! Handlers publish `EventEnvelope`s and never learn who consumes them.
//! Consumers register an `EventHandler` per event type.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Hands one envelope to the transport.
    ///
    /// An error means at least one consumer failed; callers treat
    /// publishing as a side effect and do not roll back on it.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;
}

/// Reacts to envelopes of the event types it was subscribed to.
///
/// The same envelope can arrive twice, so implementations key their
/// work on `event_id`.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Shown in logs and aggregated delivery errors.
    fn name(&self) -> &'static str;
}

pub trait EventSubscriber: Send + Sync {
    /// Registers `handler` for every type in `event_types`.
    fn subscribe(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn ports_are_object_safe(
        _: &dyn EventPublisher,
        _: &dyn EventHandler,
        _: &dyn EventSubscriber,
    ) {
    }
}
