//! Statiki Protocol - Shared request/response types
//!
//! This crate defines the shapes exchanged with the provisioning backend:
//! - Repository names as submitted by the user
//! - The create-repository and configure payloads
//! - Boundary validation of the create-repository result

mod error;
mod types;

pub use error::ContractError;
pub use types::*;
