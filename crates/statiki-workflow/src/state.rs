//! Workflow states and the transitions between them

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    #[default]
    Idle,
    /// Create-repository call in flight
    Submitting,
    /// Waiting on the user to confirm publishing into an existing repository
    AwaitingConfirmation,
    /// Configure call in flight
    Configuring,
    Succeeded,
    Failed,
    /// The server reported neither a created nor an existing repository.
    /// Not terminal and not an error; the workflow simply stops here.
    Inconclusive,
}

impl WorkflowState {
    /// A submission is in flight; new submissions must be refused
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Self::Submitting | Self::AwaitingConfirmation | Self::Configuring
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    pub fn accepts_submission(&self) -> bool {
        !self.is_active()
    }

    pub fn can_transition_to(&self, next: WorkflowState) -> bool {
        use WorkflowState::*;

        matches!(
            (self, next),
            (Idle, Submitting)
                | (Submitting, Configuring)
                | (Submitting, AwaitingConfirmation)
                | (Submitting, Failed)
                | (Submitting, Inconclusive)
                | (AwaitingConfirmation, Configuring)
                | (AwaitingConfirmation, Failed)
                | (Configuring, Succeeded)
                | (Configuring, Failed)
                | (_, Idle)
        )
    }
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Submitting => write!(f, "submitting"),
            Self::AwaitingConfirmation => write!(f, "awaiting confirmation"),
            Self::Configuring => write!(f, "configuring"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
            Self::Inconclusive => write!(f, "inconclusive"),
        }
    }
}
