/// Where the workflow shows what it is doing.
///
/// Every `show_*` call replaces whatever status was shown before. The form and
/// the status area are never visible at the same time.
pub trait StatusReporter: Send + Sync {
    fn show_progress(&self, text: &str);

    /// Show a server message, which may contain markup
    fn show_result(&self, html: &str);

    /// Show a failure body exactly as received
    fn show_failure(&self, raw_body: &str);

    fn hide_form(&self);

    fn show_form(&self);
}
