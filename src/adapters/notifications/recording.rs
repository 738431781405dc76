use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{NotificationDispatcher, NotificationKind};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedNotification {
    pub recipient: UserId,
    pub kind: NotificationKind,
    pub data: JsonValue,
}

/// Captures notifications for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotificationDispatcher {
    sent: Arc<Mutex<Vec<RecordedNotification>>>,
    fail: bool,
}

impl RecordingNotificationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher whose every call fails, recording nothing.
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    pub async fn sent(&self) -> Vec<RecordedNotification> {
        self.sent.lock().await.clone()
    }

    /// Notifications of `kind` addressed to `recipient`.
    pub async fn sent_to(&self, recipient: &UserId, kind: NotificationKind) -> usize {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|n| &n.recipient == recipient && n.kind == kind)
            .count()
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingNotificationDispatcher {
    async fn notify(
        &self,
        recipient: &UserId,
        kind: NotificationKind,
        data: JsonValue,
    ) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Notification transport unavailable",
            ));
        }
        self.sent.lock().await.push(RecordedNotification {
            recipient: recipient.clone(),
            kind,
            data,
        });
        Ok(())
    }
}
