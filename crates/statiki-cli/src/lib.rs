//! Statiki CLI - Command-line interface
//!
//! This crate provides the `statiki` binary:
//! - `statiki create [NAME]`: provision and publish a repository, or run the
//!   interactive form when no name is given
//! - `statiki config`: inspect the effective configuration

pub mod commands;
pub mod config;
pub mod form;
pub mod markup;
pub mod prompt;
pub mod reporter;

pub use commands::{Cli, Commands, ConfigCommands, PromptMode};
pub use form::{Form, FormVisibility};
pub use prompt::{SharedInput, TerminalPrompt};
pub use reporter::{Status, StatusKind, TerminalReporter};
