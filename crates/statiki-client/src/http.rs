use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use statiki_protocol::{ConfigureRequest, ConfigureResult, CreateRepoRequest, CreateRepoResult};
use statiki_workflow::{BackendError, RepoBackend};
use url::Url;

use crate::ClientError;

const DEFAULT_CREATE_REPO_PATH: &str = "/create_repo";
const DEFAULT_CONFIGURE_PATH: &str = "/manage";

/// Longest slice of an undecodable body quoted back in a malformed-response error
const MAX_QUOTED_BODY: usize = 200;

#[derive(Debug)]
pub struct HttpBackendConfig {
    pub base_url: String,
    /// Resolved against `base_url`
    pub create_repo_path: String,
    /// Resolved against `base_url`
    pub configure_path: String,
    /// Sent as `Authorization: token <value>`
    pub auth_token: Option<SecretString>,
}

impl HttpBackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            create_repo_path: DEFAULT_CREATE_REPO_PATH.to_string(),
            configure_path: DEFAULT_CONFIGURE_PATH.to_string(),
            auth_token: None,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(SecretString::from(token.into()));
        self
    }
}

#[derive(Debug)]
pub struct HttpBackend {
    client: Client,
    create_repo_url: Url,
    configure_url: Url,
    auth_token: Option<SecretString>,
}

impl HttpBackend {
    pub fn new(config: HttpBackendConfig) -> Result<Self, ClientError> {
        let base = parse_url(&config.base_url)?;
        let client = Client::builder()
            .user_agent(concat!("statiki/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            create_repo_url: join_url(&base, &config.create_repo_path)?,
            configure_url: join_url(&base, &config.configure_path)?,
            auth_token: config.auth_token,
        })
    }

    pub fn create_repo_url(&self) -> &Url {
        &self.create_repo_url
    }

    pub fn configure_url(&self) -> &Url {
        &self.configure_url
    }

    async fn post_form<B, T>(&self, url: &Url, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self
            .client
            .post(url.clone())
            .header(ACCEPT, "application/json")
            .form(body);

        if let Some(token) = &self.auth_token {
            request = request.header(AUTHORIZATION, format!("token {}", token.expose_secret()));
        }

        tracing::debug!(%url, "posting form");
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::transport(None, e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::transport(Some(status.as_u16()), e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "backend returned an error");
            return Err(BackendError::transport(Some(status.as_u16()), text));
        }

        serde_json::from_str(&text).map_err(|e| {
            BackendError::malformed(format!("{} in body {:?}", e, quote_body(&text)))
        })
    }
}

#[async_trait]
impl RepoBackend for HttpBackend {
    async fn create_repo(
        &self,
        request: &CreateRepoRequest,
    ) -> Result<CreateRepoResult, BackendError> {
        self.post_form(&self.create_repo_url, request).await
    }

    async fn configure(&self, request: &ConfigureRequest) -> Result<ConfigureResult, BackendError> {
        self.post_form(&self.configure_url, request).await
    }
}

fn parse_url(raw: &str) -> Result<Url, ClientError> {
    Url::parse(raw).map_err(|source| ClientError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

fn join_url(base: &Url, path: &str) -> Result<Url, ClientError> {
    base.join(path).map_err(|source| ClientError::InvalidUrl {
        url: format!("{}{}", base, path),
        source,
    })
}

fn quote_body(text: &str) -> &str {
    match text.char_indices().nth(MAX_QUOTED_BODY) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let backend = HttpBackend::new(HttpBackendConfig::new("http://localhost:5000")).unwrap();
        assert_eq!(
            backend.create_repo_url().as_str(),
            "http://localhost:5000/create_repo"
        );
        assert_eq!(backend.configure_url().as_str(), "http://localhost:5000/manage");
    }

    #[test]
    fn test_relative_paths_resolve_under_base() {
        let mut config = HttpBackendConfig::new("https://statiki.example/app/");
        config.create_repo_path = "create_repo".to_string();
        config.configure_path = "manage".to_string();
        let backend = HttpBackend::new(config).unwrap();
        assert_eq!(
            backend.create_repo_url().as_str(),
            "https://statiki.example/app/create_repo"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpBackend::new(HttpBackendConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { .. }));
    }

    #[test]
    fn test_quote_body_truncates() {
        let long = "x".repeat(500);
        assert_eq!(quote_body(&long).len(), MAX_QUOTED_BODY);
        assert_eq!(quote_body("short"), "short");
    }
}
