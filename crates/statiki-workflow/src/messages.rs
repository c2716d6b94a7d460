//! User-facing status text produced by the workflow itself.
//!
//! Everything else the user sees comes from the server.

use statiki_protocol::RepoName;

pub const CANCELLED: &str =
    "Cancelled. Nothing was published; enter another repository name to try again.";

pub const INCONCLUSIVE: &str =
    "The server could neither create nor find the repository. Nothing else was done.";

/// Progress line shown as soon as a name is submitted
pub fn processing(owner_prefix: &str, repo_name: &RepoName) -> String {
    format!("Processing to create {}{} ...", owner_prefix, repo_name)
}
