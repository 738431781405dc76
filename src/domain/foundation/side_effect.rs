//! Fire-and-forget side effects with logged failure.
//!
//! Notifications, conversation bookkeeping and event publication run after
//! the primary write has committed. Their failure is recorded as a
//! [`SideEffectOutcome`] on the command result and logged; it never turns
//! a successful command into an error.

use std::fmt;
use std::future::Future;

/// Result of a best-effort side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffectOutcome {
    /// The collaborator accepted the work.
    Completed,
    /// The side effect did not apply (nothing to do for this command).
    Skipped,
    /// The collaborator failed; the reason was logged.
    Failed(String),
}

impl SideEffectOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SideEffectOutcome::Completed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SideEffectOutcome::Failed(_))
    }
}

/// Awaits a side effect and folds its error into a logged outcome.
///
/// `label` names the effect in the warning (e.g. "booking.notify_professional").
pub async fn best_effort<F, T, E>(label: &'static str, effect: F) -> SideEffectOutcome
where
    F: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    match effect.await {
        Ok(_) => SideEffectOutcome::Completed,
        Err(e) => {
            tracing::warn!(side_effect = label, error = %e, "Best-effort side effect failed");
            SideEffectOutcome::Failed(e.to_string())
        }
    }
}
