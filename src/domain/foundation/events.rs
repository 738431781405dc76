//! Domain events and their transport envelope.
//!
//! Events are plain serializable structs. `domain_event!` ties a struct to
//! its routing key and aggregate; `to_envelope` turns it into the JSON
//! form that publishers and subscribers exchange.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::{CommandMetadata, DomainError, ErrorCode, Timestamp};

pub trait DomainEvent: Send + Sync {
    /// Routing key, `<aggregate>.<fact>.v<schema>`.
    fn event_type(&self) -> &'static str;

    fn aggregate_id(&self) -> String;

    fn aggregate_type(&self) -> &'static str;

    fn occurred_at(&self) -> Timestamp;

    /// Stable across redelivery; consumers deduplicate on it.
    fn event_id(&self) -> EventId;
}

/// Envelope conversion for every event that can be serialized.
pub trait SerializableDomainEvent: DomainEvent + Serialize {
    fn to_envelope(&self) -> Result<EventEnvelope, DomainError> {
        let payload = serde_json::to_value(self).map_err(|err| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Cannot encode {} payload: {}", self.event_type(), err),
            )
        })?;

        Ok(EventEnvelope {
            event_id: self.event_id(),
            event_type: self.event_type().to_owned(),
            schema_version: schema_version_of(self.event_type()),
            aggregate_id: self.aggregate_id(),
            aggregate_type: self.aggregate_type().to_owned(),
            occurred_at: self.occurred_at(),
            payload,
            metadata: EventMetadata::default(),
        })
    }
}

impl<T: DomainEvent + Serialize> SerializableDomainEvent for T {}

/// Implements [`DomainEvent`] for a struct with an `event_id: EventId` field.
///
/// ```ignore
/// domain_event!(BookingCreated: "booking.created.v1" for Booking(booking_id) at created_at);
/// ```
#[macro_export]
macro_rules! domain_event {
    ($event:ident: $event_type:literal for $aggregate:ident($id:ident) at $at:ident) => {
        impl $crate::domain::foundation::DomainEvent for $event {
            fn event_type(&self) -> &'static str {
                $event_type
            }

            fn aggregate_id(&self) -> String {
                self.$id.to_string()
            }

            fn aggregate_type(&self) -> &'static str {
                stringify!($aggregate)
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$at
            }

            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.event_id
            }
        }
    };
}

pub use domain_event;

/// Reads the trailing `.vN` of an event type; unversioned types are v1.
fn schema_version_of(event_type: &str) -> u32 {
    event_type
        .rsplit('.')
        .next()
        .and_then(|segment| segment.strip_prefix('v'))
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Request context copied from the command that caused the event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,
}

impl From<&CommandMetadata> for EventMetadata {
    fn from(command: &CommandMetadata) -> Self {
        Self {
            correlation_id: Some(command.correlation_id().to_owned()),
            actor_id: Some(command.actor_id.to_string()),
        }
    }
}

/// What actually travels between publisher and subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: EventId,
    pub event_type: String,
    pub schema_version: u32,
    pub aggregate_id: String,
    pub aggregate_type: String,
    pub occurred_at: Timestamp,
    pub payload: JsonValue,
    pub metadata: EventMetadata,
}

impl EventEnvelope {
    /// Builds an envelope around a raw payload, stamped now.
    pub fn new(
        event_type: impl Into<String>,
        aggregate_id: impl Into<String>,
        aggregate_type: impl Into<String>,
        payload: JsonValue,
    ) -> Self {
        let event_type = event_type.into();
        Self {
            event_id: EventId::new(),
            schema_version: schema_version_of(&event_type),
            event_type,
            aggregate_id: aggregate_id.into(),
            aggregate_type: aggregate_type.into(),
            occurred_at: Timestamp::now(),
            payload,
            metadata: EventMetadata::default(),
        }
    }

    pub fn caused_by(mut self, command: &CommandMetadata) -> Self {
        self.metadata = EventMetadata::from(command);
        self
    }

    /// Decodes the payload back into the event struct.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{BookingId, UserId};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct PriceQuoted {
        event_id: EventId,
        booking_id: BookingId,
        amount: i64,
        quoted_at: Timestamp,
    }

    domain_event!(PriceQuoted: "booking.price_quoted.v2" for Booking(booking_id) at quoted_at);

    fn quote() -> PriceQuoted {
        PriceQuoted {
            event_id: EventId::new(),
            booking_id: BookingId::new(),
            amount: 12_500,
            quoted_at: Timestamp::now(),
        }
    }

    #[test]
    fn schema_version_comes_from_the_suffix() {
        assert_eq!(schema_version_of("booking.created.v1"), 1);
        assert_eq!(schema_version_of("booking.price_quoted.v12"), 12);
        assert_eq!(schema_version_of("booking.created"), 1);
    }

    #[test]
    fn envelope_mirrors_the_event() {
        let event = quote();
        let envelope = event.to_envelope().unwrap();

        assert_eq!(envelope.event_id, event.event_id);
        assert_eq!(envelope.event_type, "booking.price_quoted.v2");
        assert_eq!(envelope.schema_version, 2);
        assert_eq!(envelope.aggregate_type, "Booking");
        assert_eq!(envelope.aggregate_id, event.booking_id.to_string());
        assert_eq!(envelope.payload["amount"], 12_500);
        assert_eq!(envelope.metadata, EventMetadata::default());

        let decoded: PriceQuoted = envelope.payload_as().unwrap();
        assert_eq!(decoded.booking_id, event.booking_id);
    }

    #[test]
    fn caused_by_copies_command_context() {
        let command = CommandMetadata::new(UserId::new("client-7").unwrap())
            .with_correlation_id("req-9");
        let envelope = quote().to_envelope().unwrap().caused_by(&command);

        assert_eq!(envelope.metadata.correlation_id.as_deref(), Some("req-9"));
        assert_eq!(envelope.metadata.actor_id.as_deref(), Some("client-7"));
    }

    #[test]
    fn empty_metadata_is_omitted_from_json() {
        let json = serde_json::to_value(EventMetadata::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
