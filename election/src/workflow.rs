//! The election's phase, and the only way to move it.

use ballot_types::{Transition, WorkflowStatus};
use serde::{Deserialize, Serialize};

use crate::error::ElectionError;

/// Holds the current [`WorkflowStatus`].
///
/// The status only changes through [`WorkflowStateMachine::advance`], which
/// accepts a transition only from its designated predecessor phase, so the
/// status never skips, never repeats and never goes back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStateMachine {
    status: WorkflowStatus,
}

impl WorkflowStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn restore(status: WorkflowStatus) -> Self {
        Self { status }
    }

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    /// Fail unless the current status is exactly `expected`.
    pub fn ensure(&self, expected: WorkflowStatus) -> Result<(), ElectionError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(ElectionError::WrongPhase {
                expected,
                actual: self.status,
            })
        }
    }

    /// Check that `transition` is legal now without applying it.
    pub fn check(&self, transition: Transition) -> Result<(), ElectionError> {
        self.ensure(transition.from_status())
    }

    /// Apply `transition`, returning `(previous, new)`.
    pub(crate) fn advance(
        &mut self,
        transition: Transition,
    ) -> Result<(WorkflowStatus, WorkflowStatus), ElectionError> {
        self.check(transition)?;
        let previous = self.status;
        self.status = transition.to_status();
        Ok((previous, self.status))
    }
}
