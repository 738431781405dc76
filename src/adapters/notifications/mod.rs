//! Notification dispatcher adapters.
//!
//! - `TracingNotificationDispatcher` - emits each notification as a
//!   structured log line; stands in until a delivery transport is wired.
//! - `RecordingNotificationDispatcher` - captures notifications in memory
//!   for assertions, optionally failing every call.

mod recording;
mod tracing_dispatcher;

pub use recording::{RecordedNotification, RecordingNotificationDispatcher};
pub use tracing_dispatcher::TracingNotificationDispatcher;
