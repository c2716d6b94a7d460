//! The create → (confirm) → configure state machine

use std::sync::Arc;

use statiki_protocol::{
    ConfigureRequest, CreateOutcome, CreateRepoRequest, CreateRepoResult, RepoName,
};
use tracing::{debug, info, warn};

use crate::messages;
use crate::{
    BackendError, ConfirmationPrompt, ConfirmationRequest, RepoBackend, StatusReporter,
    WorkflowError, WorkflowState,
};

/// Drives one repository submission at a time.
///
/// The controller suspends in exactly three places: the create-repository
/// call, the confirmation prompt (only for existing repositories), and the
/// configure call. The configure call is issued at most once per submission
/// and never before the create-repository call has answered.
pub struct WorkflowController {
    owner_prefix: String,
    backend: Arc<dyn RepoBackend>,
    prompt: Arc<dyn ConfirmationPrompt>,
    reporter: Arc<dyn StatusReporter>,
    state: WorkflowState,
    last_result: Option<CreateRepoResult>,
}

impl WorkflowController {
    pub fn new(
        owner_prefix: impl Into<String>,
        backend: Arc<dyn RepoBackend>,
        prompt: Arc<dyn ConfirmationPrompt>,
        reporter: Arc<dyn StatusReporter>,
    ) -> Self {
        Self {
            owner_prefix: owner_prefix.into(),
            backend,
            prompt,
            reporter,
            state: WorkflowState::Idle,
            last_result: None,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// The most recent create-repository result, if the current submission got one
    pub fn last_result(&self) -> Option<&CreateRepoResult> {
        self.last_result.as_ref()
    }

    pub fn owner_prefix(&self) -> &str {
        &self.owner_prefix
    }

    /// Drop the current submission and go back to `Idle`.
    ///
    /// Needed after a submission future was abandoned mid-flight, which
    /// otherwise leaves the controller busy.
    pub fn reset(&mut self) {
        if self.state != WorkflowState::Idle {
            debug!(from = %self.state, "resetting workflow");
        }
        self.state = WorkflowState::Idle;
        self.last_result = None;
    }

    /// Submit a repository name and drive the workflow until it settles.
    ///
    /// Returns the settled state (`Succeeded`, `Failed` or `Inconclusive`).
    /// Backend failures are reported through the [`StatusReporter`] and settle
    /// in `Failed`; `Err` means the submission was refused and nothing was sent.
    pub async fn start(&mut self, repo_name: &str) -> Result<WorkflowState, WorkflowError> {
        if !self.state.accepts_submission() {
            return Err(WorkflowError::Busy { state: self.state });
        }
        let repo_name = RepoName::parse(repo_name)?;

        self.reset();
        self.transition(WorkflowState::Submitting);
        self.reporter.hide_form();
        self.reporter
            .show_progress(&messages::processing(&self.owner_prefix, &repo_name));
        info!(repo = %repo_name, owner = %self.owner_prefix, "creating repository");

        let result = match self
            .backend
            .create_repo(&CreateRepoRequest::new(repo_name))
            .await
            .and_then(|result| {
                result.validate()?;
                Ok(result)
            }) {
            Ok(result) => result,
            Err(err) => return Ok(self.fail(err)),
        };

        if !result.message.is_empty() {
            self.reporter.show_result(&result.message);
        }
        self.last_result = Some(result.clone());

        let request = match result.outcome() {
            CreateOutcome::Inconclusive => {
                warn!("server reported neither a created nor an existing repository");
                self.transition(WorkflowState::Inconclusive);
                return Ok(self.state);
            }
            CreateOutcome::Created => {
                self.transition(WorkflowState::Configuring);
                ConfigureRequest {
                    overwrite: false,
                    full_name: result.full_name,
                }
            }
            CreateOutcome::Exists => {
                self.transition(WorkflowState::AwaitingConfirmation);
                let decision = self
                    .prompt
                    .ask(ConfirmationRequest::from_result(&result))
                    .await;

                if !decision.proceed {
                    info!(full_name = %decision.full_name, "user cancelled");
                    self.transition(WorkflowState::Failed);
                    self.reporter.show_result(messages::CANCELLED);
                    self.reporter.show_form();
                    return Ok(self.state);
                }

                self.transition(WorkflowState::Configuring);
                ConfigureRequest {
                    overwrite: decision.overwrite,
                    full_name: decision.full_name,
                }
            }
        };

        info!(
            full_name = %request.full_name,
            overwrite = request.overwrite,
            "configuring repository"
        );
        match self.backend.configure(&request).await {
            Ok(configured) => {
                self.transition(WorkflowState::Succeeded);
                self.reporter.show_result(&configured.message);
                self.reporter.hide_form();
                Ok(self.state)
            }
            Err(err) => Ok(self.fail(err)),
        }
    }

    fn fail(&mut self, err: BackendError) -> WorkflowState {
        warn!(error = %err, state = %self.state, "backend call failed");
        self.transition(WorkflowState::Failed);
        self.reporter.show_failure(&err.display_body());
        self.reporter.hide_form();
        self.state
    }

    fn transition(&mut self, next: WorkflowState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "workflow transition");
        self.state = next;
    }
}
