//! Backend trait for the two provisioning calls

use async_trait::async_trait;
use statiki_protocol::{ConfigureRequest, ConfigureResult, CreateRepoRequest, CreateRepoResult};

use crate::BackendError;

/// The provisioning service as seen by the workflow
#[async_trait]
pub trait RepoBackend: Send + Sync {
    /// Create (or look up) the remote repository
    async fn create_repo(&self, request: &CreateRepoRequest)
        -> Result<CreateRepoResult, BackendError>;

    /// Enable continuous integration on the repository
    async fn configure(&self, request: &ConfigureRequest) -> Result<ConfigureResult, BackendError>;
}
