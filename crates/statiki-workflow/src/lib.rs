//! Statiki Workflow - repository provisioning state machine
//!
//! The [`WorkflowController`] submits a repository name to the backend,
//! decides whether the user must confirm publishing into an existing
//! repository, and fires the configure call exactly when it should.
//! Everything it talks to is injected:
//! - [`RepoBackend`] for the two network calls
//! - [`ConfirmationPrompt`] for the overwrite/publish decision
//! - [`StatusReporter`] for progress, results and failures

mod backend;
mod controller;
mod error;
pub mod messages;
mod prompt;
mod reporter;
mod state;

pub use backend::RepoBackend;
pub use controller::WorkflowController;
pub use error::{BackendError, WorkflowError};
pub use prompt::{
    prompt_channel, AutoPrompt, ChannelPrompt, ConfirmationPrompt, ConfirmationRequest, Decision,
    PendingConfirmation, PromptReceiver,
};
pub use reporter::StatusReporter;
pub use state::WorkflowState;
