//! Workflow and backend error types

use statiki_protocol::ContractError;
use thiserror::Error;

use crate::WorkflowState;

/// Failure of one of the two backend calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The call itself failed; `body` is what the server (or the transport) said
    #[error("{}", transport_summary(.status, .body))]
    Transport { status: Option<u16>, body: String },

    /// A success response that does not satisfy the response contract
    #[error("malformed response: {reason}")]
    Malformed { reason: String },
}

fn transport_summary(status: &Option<u16>, body: &str) -> String {
    match status {
        Some(code) => format!("HTTP {}: {}", code, body),
        None => format!("transport error: {}", body),
    }
}

impl BackendError {
    pub fn transport(status: Option<u16>, body: impl Into<String>) -> Self {
        Self::Transport {
            status,
            body: body.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    /// Text shown to the user. Transport bodies are passed through verbatim.
    pub fn display_body(&self) -> String {
        match self {
            Self::Transport { body, .. } => body.clone(),
            Self::Malformed { reason } => {
                format!("Unexpected response from the server: {}", reason)
            }
        }
    }
}

impl From<ContractError> for BackendError {
    fn from(err: ContractError) -> Self {
        Self::malformed(err.to_string())
    }
}

/// A submission the controller refused before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("invalid repository name: {0}")]
    InvalidRepoName(#[from] ContractError),

    #[error("a submission is already in progress ({state})")]
    Busy { state: WorkflowState },
}
