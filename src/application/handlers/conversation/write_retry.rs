//! Optimistic write loop for conversation documents.
//!
//! Each attempt reloads the conversation, reapplies the mutation and
//! writes it back under the loaded version. A stale version triggers
//! another attempt until the policy runs out.

use crate::domain::conversation::{Conversation, ConversationError};
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode};
use crate::ports::ConversationRepository;

/// Default number of attempts for a contended conversation write.
pub const DEFAULT_WRITE_ATTEMPTS: u32 = 3;

/// How many times a conversation write is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteRetryPolicy {
    max_attempts: u32,
}

impl WriteRetryPolicy {
    /// At least one attempt is always made.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for WriteRetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_WRITE_ATTEMPTS)
    }
}

/// Loads, mutates and saves a conversation, retrying stale writes.
///
/// Returns the saved conversation and whatever the mutation produced.
/// Mutation errors are returned immediately without retrying.
pub(super) async fn update_with_retry<T, F>(
    repository: &dyn ConversationRepository,
    conversation_id: &ConversationId,
    policy: WriteRetryPolicy,
    mut mutate: F,
) -> Result<(Conversation, T), ConversationError>
where
    F: FnMut(&mut Conversation) -> Result<T, DomainError>,
{
    for attempt in 1..=policy.max_attempts() {
        let mut conversation = repository
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| not_found(conversation_id))?;

        let output = mutate(&mut conversation)?;

        match repository.update(&mut conversation).await {
            Ok(()) => return Ok((conversation, output)),
            Err(e) if e.code == ErrorCode::ConcurrentModification => {
                tracing::debug!(
                    conversation_id = %conversation_id,
                    attempt,
                    "Conversation write lost a race, retrying"
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::warn!(
        conversation_id = %conversation_id,
        attempts = policy.max_attempts(),
        "Conversation write abandoned after repeated conflicts"
    );
    Err(ConversationError::Conflict(format!(
        "Conversation {} was modified concurrently; gave up after {} attempts",
        conversation_id,
        policy.max_attempts()
    )))
}

pub(super) fn not_found(conversation_id: &ConversationId) -> ConversationError {
    ConversationError::not_found(format!("Conversation not found: {}", conversation_id))
}
