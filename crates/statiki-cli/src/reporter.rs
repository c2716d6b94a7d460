//! Terminal status output

use colored::Colorize;
use serde::Serialize;
use statiki_workflow::StatusReporter;
use std::io::Write;
use std::sync::Mutex;

use crate::markup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Progress,
    Result,
    Failure,
}

/// The status currently on display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

struct Screen {
    current: Option<Status>,
    form_visible: bool,
}

/// Prints status lines to a writer (stdout by default).
///
/// A terminal cannot take back what it printed, so "replacing" the status
/// means the reporter only ever remembers the latest line. With `quiet` set
/// nothing is printed and only that bookkeeping happens.
pub struct TerminalReporter<W: Write + Send> {
    out: Mutex<W>,
    screen: Mutex<Screen>,
    color: bool,
    quiet: bool,
}

impl TerminalReporter<std::io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(std::io::stdout(), color)
    }
}

impl<W: Write + Send> TerminalReporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out: Mutex::new(out),
            screen: Mutex::new(Screen {
                current: None,
                form_visible: true,
            }),
            color,
            quiet: false,
        }
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn current(&self) -> Option<Status> {
        self.screen.lock().ok().and_then(|screen| screen.current.clone())
    }

    pub fn form_visible(&self) -> bool {
        self.screen.lock().map(|screen| screen.form_visible).unwrap_or(false)
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn replace(&self, kind: StatusKind, text: String) {
        let line = self.render(kind, &text);
        if let Ok(mut screen) = self.screen.lock() {
            screen.current = Some(Status { kind, text });
        }
        self.print(&line);
    }

    fn render(&self, kind: StatusKind, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        match kind {
            StatusKind::Progress => text.dimmed().to_string(),
            StatusKind::Result => text.green().to_string(),
            StatusKind::Failure => text.red().to_string(),
        }
    }

    fn print(&self, line: &str) {
        if self.quiet {
            return;
        }
        if let Ok(mut out) = self.out.lock() {
            // Nowhere left to report a broken stdout
            let _ = writeln!(out, "{}", line);
            let _ = out.flush();
        }
    }

    fn set_form_visible(&self, visible: bool) {
        if let Ok(mut screen) = self.screen.lock() {
            screen.form_visible = visible;
        }
    }
}

impl<W: Write + Send> StatusReporter for TerminalReporter<W> {
    fn show_progress(&self, text: &str) {
        self.replace(StatusKind::Progress, text.to_string());
    }

    fn show_result(&self, html: &str) {
        self.replace(StatusKind::Result, markup::to_plain_text(html));
    }

    fn show_failure(&self, raw_body: &str) {
        self.replace(StatusKind::Failure, raw_body.to_string());
    }

    fn hide_form(&self) {
        self.set_form_visible(false);
    }

    fn show_form(&self) {
        self.set_form_visible(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(reporter: TerminalReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_latest_status_replaces_previous() {
        let reporter = TerminalReporter::new(Vec::new(), false);
        reporter.show_progress("Processing to create org/foo ...");
        reporter.show_result("Created");

        assert_eq!(
            reporter.current(),
            Some(Status {
                kind: StatusKind::Result,
                text: "Created".to_string(),
            })
        );
        assert_eq!(
            output(reporter),
            "Processing to create org/foo ...\nCreated\n"
        );
    }

    #[test]
    fn test_failure_body_is_raw() {
        let reporter = TerminalReporter::new(Vec::new(), false);
        reporter.show_failure("<b>rate limited</b>");

        assert_eq!(reporter.current().unwrap().text, "<b>rate limited</b>");
        assert_eq!(output(reporter), "<b>rate limited</b>\n");
    }

    #[test]
    fn test_result_markup_is_stripped() {
        let reporter = TerminalReporter::new(Vec::new(), false);
        reporter.show_result(r#"Done: <a href="http://org.github.io/foo">your site</a>"#);

        assert_eq!(
            reporter.current().unwrap().text,
            "Done: your site (http://org.github.io/foo)"
        );
    }

    #[test]
    fn test_form_visibility() {
        let reporter = TerminalReporter::new(Vec::new(), false);
        assert!(reporter.form_visible());
        reporter.hide_form();
        assert!(!reporter.form_visible());
        reporter.show_form();
        assert!(reporter.form_visible());
    }

    #[test]
    fn test_quiet_prints_nothing() {
        let reporter = TerminalReporter::new(Vec::new(), false).quiet();
        reporter.show_result("Configured");

        assert_eq!(reporter.current().unwrap().text, "Configured");
        assert!(output(reporter).is_empty());
    }
}
