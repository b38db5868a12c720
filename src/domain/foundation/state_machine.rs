//! Transition table contract for stage enums.

use super::ValidationError;

/// A finite set of states with an explicit table of allowed moves.
///
/// Implementors list the moves in `valid_transitions`; `transition_to`
/// checks a move against that table.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn can_transition_to(&self, target: &Self) -> bool;

    /// States reachable in one move from `self`.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns `target` if the move is allowed.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            return Ok(target);
        }
        Err(ValidationError::invalid_format(
            "stage",
            format!("cannot move from {:?} to {:?}", self, target),
        ))
    }

    /// A state with no outgoing moves.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
