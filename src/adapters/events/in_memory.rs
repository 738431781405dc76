//! Single-process publish/subscribe.
//!
//! Envelopes are delivered to their subscribers in registration order.
//! A bus built with [`InMemoryEventBus::recording`] also appends them to a
//! log that tests can read back; the plain bus retains nothing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

#[derive(Default)]
struct BusState {
    routes: HashMap<String, Vec<Arc<dyn EventHandler>>>,
    log: Vec<EventEnvelope>,
}

#[derive(Default)]
pub struct InMemoryEventBus {
    state: Mutex<BusState>,
    recording: bool,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bus that keeps every published envelope. Unbounded; tests only.
    pub fn recording() -> Self {
        Self {
            recording: true,
            ..Self::default()
        }
    }

    // A handler that panicked mid-delivery leaves the state intact.
    fn state(&self) -> MutexGuard<'_, BusState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every envelope published so far, oldest first. Empty unless recording.
    pub fn published(&self) -> Vec<EventEnvelope> {
        self.state().log.clone()
    }

    pub fn published_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.state()
            .log
            .iter()
            .filter(|envelope| envelope.event_type == event_type)
            .cloned()
            .collect()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.state()
            .log
            .iter()
            .any(|envelope| envelope.event_type == event_type)
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let subscribers = {
            let mut state = self.state();
            if self.recording {
                state.log.push(event.clone());
            }
            state.routes.get(&event.event_type).cloned().unwrap_or_default()
        };

        let mut failures = Vec::new();
        for subscriber in subscribers {
            if let Err(err) = subscriber.handle(event.clone()).await {
                tracing::warn!(
                    handler = subscriber.name(),
                    event_type = %event.event_type,
                    event_id = %event.event_id,
                    error = %err,
                    "Event handler failed"
                );
                failures.push(format!("{}: {}", subscriber.name(), err.message));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Delivery of {} failed ({})", event.event_type, failures.join("; ")),
            ))
        }
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        let mut state = self.state();
        for event_type in event_types {
            state
                .routes
                .entry((*event_type).to_string())
                .or_default()
                .push(Arc::clone(&handler));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn booking_event(event_type: &str) -> EventEnvelope {
        EventEnvelope::new(event_type, "booking-1", "Booking", json!({"status": "PENDING"}))
    }

    struct Tally(AtomicUsize);

    #[async_trait]
    impl EventHandler for Tally {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "Tally"
        }
    }

    struct Broken;

    #[async_trait]
    impl EventHandler for Broken {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "review store offline"))
        }

        fn name(&self) -> &'static str {
            "Broken"
        }
    }

    #[tokio::test]
    async fn routes_by_event_type_and_logs_everything() {
        let bus = InMemoryEventBus::recording();
        let tally = Arc::new(Tally(AtomicUsize::new(0)));
        bus.subscribe(
            &["booking.created.v1", "booking.status_changed.v1"],
            tally.clone(),
        );

        for event_type in [
            "booking.created.v1",
            "booking.status_changed.v1",
            "conversation.message_sent.v1",
        ] {
            bus.publish(booking_event(event_type)).await.unwrap();
        }

        assert_eq!(tally.0.load(Ordering::SeqCst), 2);
        assert_eq!(bus.published().len(), 3);
        assert_eq!(bus.published_of_type("booking.created.v1").len(), 1);
        assert!(bus.has_event("conversation.message_sent.v1"));
        assert!(!bus.has_event("conversation.closed.v1"));
    }

    #[tokio::test]
    async fn a_failing_handler_does_not_starve_the_others() {
        let bus = InMemoryEventBus::recording();
        let tally = Arc::new(Tally(AtomicUsize::new(0)));
        bus.subscribe(&["booking.created.v1"], Arc::new(Broken));
        bus.subscribe(&["booking.created.v1"], tally.clone());

        let err = bus
            .publish(booking_event("booking.created.v1"))
            .await
            .unwrap_err();

        assert!(err.message.contains("Broken: review store offline"));
        assert_eq!(tally.0.load(Ordering::SeqCst), 1);
        assert_eq!(bus.published().len(), 1);
    }

    #[tokio::test]
    async fn plain_bus_delivers_without_retaining_envelopes() {
        let bus = InMemoryEventBus::new();
        let tally = Arc::new(Tally(AtomicUsize::new(0)));
        bus.subscribe(&["conversation.message_sent.v1"], tally.clone());

        for _ in 0..10_000 {
            bus.publish(booking_event("conversation.message_sent.v1"))
                .await
                .unwrap();
        }

        assert_eq!(tally.0.load(Ordering::SeqCst), 10_000);
        assert!(bus.published().is_empty());
        assert_eq!(bus.state().log.capacity(), 0);
    }
}
