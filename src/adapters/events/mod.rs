//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process publish/subscribe bus
//! - `ModerationReviewQueue` - Subscriber collecting messages flagged for review

mod in_memory;
mod review_queue;

pub use in_memory::InMemoryEventBus;
pub use review_queue::{ModerationReviewQueue, FLAGGED_FOR_REVIEW_EVENT};
