//! Confirmation prompt for publishing into an existing repository
//!
//! The workflow hands the prompt a [`ConfirmationRequest`] and waits for
//! exactly one [`Decision`]. There is no timeout: an unanswered prompt keeps
//! the workflow suspended until the user responds.

use async_trait::async_trait;
use statiki_protocol::{CreateRepoResult, FileEntry};
use tokio::sync::{mpsc, oneshot};

/// What the user is asked to confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    /// Heading shown above the file previews
    pub message: String,
    /// Files to preview, in server order
    pub contents: Vec<FileEntry>,
    /// Server's suggested default
    pub overwrite: bool,
    pub full_name: String,
}

impl ConfirmationRequest {
    pub fn from_result(result: &CreateRepoResult) -> Self {
        Self {
            message: result.message.clone(),
            contents: result.contents.clone(),
            overwrite: result.overwrite,
            full_name: result.full_name.clone(),
        }
    }

    /// Label of the affirmative action
    pub fn action_label(&self) -> &'static str {
        if self.overwrite {
            "Overwrite"
        } else {
            "Publish"
        }
    }
}

/// The user's answer, carrying `overwrite`/`full_name` forward to the configure call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub proceed: bool,
    pub overwrite: bool,
    pub full_name: String,
}

impl Decision {
    pub fn proceed(request: &ConfirmationRequest) -> Self {
        Self {
            proceed: true,
            overwrite: request.overwrite,
            full_name: request.full_name.clone(),
        }
    }

    pub fn cancel(request: &ConfirmationRequest) -> Self {
        Self {
            proceed: false,
            overwrite: request.overwrite,
            full_name: request.full_name.clone(),
        }
    }
}

#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    async fn ask(&self, request: ConfirmationRequest) -> Decision;
}

/// Answers every prompt the same way, for non-interactive runs
#[derive(Debug, Clone, Copy)]
pub struct AutoPrompt {
    proceed: bool,
}

impl AutoPrompt {
    pub fn confirm() -> Self {
        Self { proceed: true }
    }

    pub fn decline() -> Self {
        Self { proceed: false }
    }
}

#[async_trait]
impl ConfirmationPrompt for AutoPrompt {
    async fn ask(&self, request: ConfirmationRequest) -> Decision {
        tracing::info!(
            full_name = %request.full_name,
            proceed = self.proceed,
            "answering confirmation without asking"
        );
        if self.proceed {
            Decision::proceed(&request)
        } else {
            Decision::cancel(&request)
        }
    }
}

/// A confirmation waiting for an answer from another part of the program
#[derive(Debug)]
pub struct PendingConfirmation {
    pub request: ConfirmationRequest,
    response_tx: oneshot::Sender<Decision>,
}

impl PendingConfirmation {
    pub fn respond(self, decision: Decision) {
        // The asking side may have been dropped; nothing left to answer then
        let _ = self.response_tx.send(decision);
    }

    pub fn confirm(self) {
        let decision = Decision::proceed(&self.request);
        self.respond(decision);
    }

    pub fn cancel(self) {
        let decision = Decision::cancel(&self.request);
        self.respond(decision);
    }
}

/// Prompt half of the channel (held by the workflow)
#[derive(Clone)]
pub struct ChannelPrompt {
    sender: mpsc::Sender<PendingConfirmation>,
}

#[async_trait]
impl ConfirmationPrompt for ChannelPrompt {
    async fn ask(&self, request: ConfirmationRequest) -> Decision {
        let fallback = Decision::cancel(&request);
        let (response_tx, response_rx) = oneshot::channel();
        let pending = PendingConfirmation {
            request,
            response_tx,
        };

        if self.sender.send(pending).await.is_err() {
            tracing::warn!("confirmation receiver closed, treating as cancel");
            return fallback;
        }

        match response_rx.await {
            Ok(decision) => decision,
            Err(_) => {
                tracing::warn!("confirmation dropped without an answer, treating as cancel");
                fallback
            }
        }
    }
}

/// Receiving half of the channel (held by whatever renders the prompt)
pub struct PromptReceiver {
    receiver: mpsc::Receiver<PendingConfirmation>,
}

impl PromptReceiver {
    pub async fn recv(&mut self) -> Option<PendingConfirmation> {
        self.receiver.recv().await
    }
}

/// Create a connected prompt/receiver pair
pub fn prompt_channel(buffer: usize) -> (ChannelPrompt, PromptReceiver) {
    let (sender, receiver) = mpsc::channel(buffer);
    (ChannelPrompt { sender }, PromptReceiver { receiver })
}
