//! Interactive confirmation on the terminal

use async_trait::async_trait;
use statiki_protocol::FileEntry;
use statiki_workflow::{ConfirmationPrompt, ConfirmationRequest, Decision};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::markup;

/// Input shared between the repository-name form and the prompt, so neither
/// loses lines the other has buffered.
pub type SharedInput<R> = Arc<Mutex<R>>;

/// Asks `<Label> <full_name>? [y/N]` after previewing the files.
///
/// Only `y`/`yes` confirms. Anything else, end of input, or an I/O error
/// cancels.
pub struct TerminalPrompt<R, W> {
    input: SharedInput<R>,
    output: Mutex<W>,
    preview_lines: usize,
}

impl<R, W> TerminalPrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(input: SharedInput<R>, output: W, preview_lines: usize) -> Self {
        Self {
            input,
            output: Mutex::new(output),
            preview_lines,
        }
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    async fn converse(&self, request: &ConfirmationRequest) -> std::io::Result<bool> {
        let rendered = render_request(request, self.preview_lines);
        {
            let mut output = self.output.lock().await;
            output.write_all(rendered.as_bytes()).await?;
            output.flush().await?;
        }

        let mut answer = String::new();
        let read = self.input.lock().await.read_line(&mut answer).await?;
        if read == 0 {
            tracing::info!("input closed while waiting for confirmation");
            return Ok(false);
        }

        Ok(is_yes(&answer))
    }
}

#[async_trait]
impl<R, W> ConfirmationPrompt for TerminalPrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn ask(&self, request: ConfirmationRequest) -> Decision {
        match self.converse(&request).await {
            Ok(true) => Decision::proceed(&request),
            Ok(false) => Decision::cancel(&request),
            Err(err) => {
                tracing::warn!(error = %err, "confirmation prompt failed, cancelling");
                Decision::cancel(&request)
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub fn render_request(request: &ConfirmationRequest, preview_lines: usize) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&markup::to_plain_text(&request.message));
    out.push_str("\n\n");
    for file in &request.contents {
        render_file(&mut out, file, preview_lines);
    }
    out.push_str(&format!(
        "{} {}? [y/N] ",
        request.action_label(),
        request.full_name
    ));
    out
}

fn render_file(out: &mut String, file: &FileEntry, preview_lines: usize) {
    out.push_str(&format!("▸ {}\n", file.name));

    let lines: Vec<&str> = file.content.lines().collect();
    for line in lines.iter().take(preview_lines) {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    if lines.len() > preview_lines {
        out.push_str(&format!(
            "    … {} more lines\n",
            lines.len() - preview_lines
        ));
    }
    out.push('\n');
}
