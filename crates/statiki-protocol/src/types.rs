//! Request and response types for the provisioning endpoints

use serde::{Deserialize, Serialize};

use crate::ContractError;

/// A user-supplied repository name, trimmed and guaranteed non-empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RepoName(String);

impl RepoName {
    pub fn parse(raw: &str) -> Result<Self, ContractError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ContractError::EmptyRepoName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for RepoName {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for RepoName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of the create-repository call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRepoRequest {
    pub repo_name: RepoName,
}

impl CreateRepoRequest {
    pub fn new(repo_name: RepoName) -> Self {
        Self { repo_name }
    }
}

/// Body of the configure (`manage`) call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigureRequest {
    pub overwrite: bool,
    pub full_name: String,
}

/// A file of a pre-existing repository, offered for preview only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub content: String,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Which branch a create-repository result selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Repository was freshly created
    Created,
    /// Repository already existed and needs confirmation
    Exists,
    /// Neither flag is set
    Inconclusive,
}

/// Result of the create-repository call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRepoResult {
    #[serde(default)]
    pub created: bool,
    #[serde(default)]
    pub exists: bool,
    /// Server's suggested overwrite default
    #[serde(default)]
    pub overwrite: bool,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub contents: Vec<FileEntry>,
}

impl CreateRepoResult {
    pub fn created(full_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            created: true,
            full_name: full_name.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn exists(
        full_name: impl Into<String>,
        message: impl Into<String>,
        overwrite: bool,
        contents: Vec<FileEntry>,
    ) -> Self {
        Self {
            exists: true,
            overwrite,
            full_name: full_name.into(),
            message: message.into(),
            contents,
            ..Default::default()
        }
    }

    pub fn outcome(&self) -> CreateOutcome {
        if self.created {
            CreateOutcome::Created
        } else if self.exists {
            CreateOutcome::Exists
        } else {
            CreateOutcome::Inconclusive
        }
    }

    /// Check the invariants the workflow depends on.
    ///
    /// `created` and `exists` are mutually exclusive, and any result that lets
    /// the workflow advance must name the repository it refers to.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.created && self.exists {
            return Err(ContractError::ConflictingFlags {
                full_name: self.full_name.clone(),
            });
        }
        if (self.created || self.exists) && self.full_name.trim().is_empty() {
            return Err(ContractError::MissingFullName);
        }
        Ok(())
    }
}

/// Successful result of the configure call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigureResult {
    #[serde(default)]
    pub message: String,
}

impl ConfigureResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
