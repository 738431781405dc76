//! Status enums as explicit transition tables.

use std::fmt;

use super::ValidationError;

/// A status enum whose legal moves are listed once in `successors`.
///
/// ```ignore
/// impl StateMachine for BookingStatus {
///     fn successors(&self) -> &'static [Self] {
///         match self {
///             Pending => &[Confirmed, Rejected, Cancelled],
///             Completed => &[],
///             // ...
///         }
///     }
/// }
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + fmt::Display + 'static {
    fn successors(&self) -> &'static [Self];

    fn can_transition_to(&self, target: &Self) -> bool {
        self.successors().contains(target)
    }

    /// `target` if the edge exists, otherwise an error naming both ends.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if !self.can_transition_to(&target) {
            return Err(ValidationError::invalid_format(
                "status",
                format!("Cannot transition from {} to {}", self, target),
            ));
        }
        Ok(target)
    }

    /// No outgoing edges.
    fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }
}
