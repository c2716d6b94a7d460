//! The repository-name form.
//!
//! Reads names from the shared input and feeds them to the controller until
//! the reporter hides the form for good or input runs out.

use colored::Colorize;
use statiki_workflow::{WorkflowController, WorkflowError, WorkflowState};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::prompt::SharedInput;

/// Anything that can tell whether the form is currently on screen
pub trait FormVisibility {
    fn form_visible(&self) -> bool;
}

impl<W: std::io::Write + Send> FormVisibility for crate::reporter::TerminalReporter<W> {
    fn form_visible(&self) -> bool {
        crate::reporter::TerminalReporter::form_visible(self)
    }
}

pub struct Form<R, W> {
    input: SharedInput<R>,
    output: W,
    color: bool,
}

impl<R, W> Form<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(input: SharedInput<R>, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run submissions until the form is hidden or input ends.
    ///
    /// Returns the state the last submission settled in, `None` if nothing
    /// was submitted.
    pub async fn run<V>(
        &mut self,
        controller: &mut WorkflowController,
        screen: &V,
    ) -> std::io::Result<Option<WorkflowState>>
    where
        V: FormVisibility + ?Sized,
    {
        let mut settled = None;

        while screen.form_visible() {
            let Some(name) = self.read_name(controller.owner_prefix()).await? else {
                break;
            };

            match controller.start(&name).await {
                Ok(state) => settled = Some(state),
                Err(WorkflowError::InvalidRepoName(_)) => {
                    self.hint("Please enter a repository name.").await?;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "submission refused");
                    self.hint(&err.to_string()).await?;
                }
            }
        }

        Ok(settled)
    }

    async fn read_name(&mut self, owner_prefix: &str) -> std::io::Result<Option<String>> {
        let label = format!("Repository name: {}", owner_prefix);
        let label = if self.color {
            label.cyan().bold().to_string()
        } else {
            label
        };
        self.output.write_all(label.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.lock().await.read_line(&mut line).await? == 0 {
            self.output.write_all(b"\n").await?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn hint(&mut self, text: &str) -> std::io::Result<()> {
        let text = if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        };
        self.output.write_all(format!("{}\n", text).as_bytes()).await?;
        self.output.flush().await
    }
}
