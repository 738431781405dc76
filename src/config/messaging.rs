//! Conversation tuning knobs.

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::handlers::conversation::{
    WriteRetryPolicy, DEFAULT_PAGE_SIZE, DEFAULT_WRITE_ATTEMPTS,
};
use crate::adapters::realtime::DEFAULT_ROOM_CAPACITY;

#[derive(Debug, Clone, Deserialize)]
pub struct MessagingConfig {
    /// Messages per page when a caller gives no limit.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Attempts for a conversation write that keeps losing version races.
    #[serde(default = "default_write_attempts")]
    pub conversation_write_attempts: u32,

    /// Buffered events per conversation room before slow receivers lag.
    #[serde(default = "default_channel_capacity")]
    pub realtime_channel_capacity: usize,
}

impl MessagingConfig {
    pub fn write_retry_policy(&self) -> WriteRetryPolicy {
        WriteRetryPolicy::new(self.conversation_write_attempts)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let zero = [
            ("messaging.default_page_size", self.default_page_size == 0),
            (
                "messaging.conversation_write_attempts",
                self.conversation_write_attempts == 0,
            ),
            (
                "messaging.realtime_channel_capacity",
                self.realtime_channel_capacity == 0,
            ),
        ];
        match zero.into_iter().find(|(_, is_zero)| *is_zero) {
            Some((name, _)) => Err(ValidationError::Zero(name)),
            None => Ok(()),
        }
    }
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            conversation_write_attempts: default_write_attempts(),
            realtime_channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_write_attempts() -> u32 {
    DEFAULT_WRITE_ATTEMPTS
}

fn default_channel_capacity() -> usize {
    DEFAULT_ROOM_CAPACITY
}
