use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{NotificationDispatcher, NotificationKind};

/// Logs notifications instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct TracingNotificationDispatcher;

impl TracingNotificationDispatcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationDispatcher for TracingNotificationDispatcher {
    async fn notify(
        &self,
        recipient: &UserId,
        kind: NotificationKind,
        data: JsonValue,
    ) -> Result<(), DomainError> {
        tracing::info!(
            recipient = %recipient,
            kind = %kind,
            data = %data,
            "Notification dispatched"
        );
        Ok(())
    }
}
