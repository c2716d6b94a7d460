//! Test doubles for the workflow's collaborators
//!
//! MockBackend returns queued responses and records every call in order;
//! RecordingPrompt answers with a fixed decision and records what it was
//! shown; RecordingReporter keeps the full history of status updates.

#![allow(dead_code)]

use async_trait::async_trait;
use statiki_protocol::{
    ConfigureRequest, ConfigureResult, CreateRepoRequest, CreateRepoResult,
};
use statiki_workflow::{
    BackendError, ConfirmationPrompt, ConfirmationRequest, Decision, RepoBackend, StatusReporter,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A backend call as the workflow issued it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(CreateRepoRequest),
    Configure(ConfigureRequest),
}

#[derive(Default)]
pub struct MockBackend {
    create_responses: Mutex<VecDeque<Result<CreateRepoResult, BackendError>>>,
    configure_responses: Mutex<VecDeque<Result<ConfigureResult, BackendError>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_create(&self, response: Result<CreateRepoResult, BackendError>) {
        self.create_responses.lock().unwrap().push_back(response);
    }

    pub fn queue_configure(&self, response: Result<ConfigureResult, BackendError>) {
        self.configure_responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn configure_calls(&self) -> Vec<ConfigureRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Configure(request) => Some(request),
                Call::Create(_) => None,
            })
            .collect()
    }

    pub fn create_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Create(_)))
            .count()
    }
}

#[async_trait]
impl RepoBackend for MockBackend {
    async fn create_repo(
        &self,
        request: &CreateRepoRequest,
    ) -> Result<CreateRepoResult, BackendError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Create(request.clone()));
        self.create_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::transport(None, "no create response queued")))
    }

    async fn configure(&self, request: &ConfigureRequest) -> Result<ConfigureResult, BackendError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Configure(request.clone()));
        self.configure_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(BackendError::transport(None, "no configure response queued"))
            })
    }
}

pub struct RecordingPrompt {
    proceed: bool,
    asked: Mutex<Vec<ConfirmationRequest>>,
}

impl RecordingPrompt {
    pub fn confirming() -> Self {
        Self {
            proceed: true,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn cancelling() -> Self {
        Self {
            proceed: false,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<ConfirmationRequest> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfirmationPrompt for RecordingPrompt {
    async fn ask(&self, request: ConfirmationRequest) -> Decision {
        let decision = if self.proceed {
            Decision::proceed(&request)
        } else {
            Decision::cancel(&request)
        };
        self.asked.lock().unwrap().push(request);
        decision
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Progress(String),
    Result(String),
    Failure(String),
    HideForm,
    ShowForm,
}

pub struct RecordingReporter {
    history: Mutex<Vec<Report>>,
    form_visible: Mutex<bool>,
}

impl Default for RecordingReporter {
    fn default() -> Self {
        Self {
            history: Mutex::new(Vec::new()),
            form_visible: Mutex::new(true),
        }
    }
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Report> {
        self.history.lock().unwrap().clone()
    }

    /// The status text currently on display
    pub fn current(&self) -> Option<String> {
        self.history().into_iter().rev().find_map(|report| match report {
            Report::Progress(text) | Report::Result(text) | Report::Failure(text) => Some(text),
            Report::HideForm | Report::ShowForm => None,
        })
    }

    pub fn form_visible(&self) -> bool {
        *self.form_visible.lock().unwrap()
    }

    fn record(&self, report: Report) {
        self.history.lock().unwrap().push(report);
    }
}

impl StatusReporter for RecordingReporter {
    fn show_progress(&self, text: &str) {
        self.record(Report::Progress(text.to_string()));
    }

    fn show_result(&self, html: &str) {
        self.record(Report::Result(html.to_string()));
    }

    fn show_failure(&self, raw_body: &str) {
        self.record(Report::Failure(raw_body.to_string()));
    }

    fn hide_form(&self) {
        *self.form_visible.lock().unwrap() = false;
        self.record(Report::HideForm);
    }

    fn show_form(&self) {
        *self.form_visible.lock().unwrap() = true;
        self.record(Report::ShowForm);
    }
}
