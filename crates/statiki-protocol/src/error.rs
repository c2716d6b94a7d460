//! Contract violation errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("repository name must not be empty")]
    EmptyRepoName,

    #[error("server reported {full_name} as both created and already existing")]
    ConflictingFlags { full_name: String },

    #[error("server response is missing full_name")]
    MissingFullName,
}
