use serde::{Deserialize, Serialize};
use statiki_telemetry::TelemetryConfig;

/// Main statiki configuration
///
/// Configuration is loaded from (in priority order):
/// 1. `statiki.jsonc` - JSON with comments
/// 2. `statiki.json` - Standard JSON
/// 3. `statiki.yml` / `statiki.yaml` - YAML format
/// 4. `statiki.toml` - TOML format
///
/// Also checks hidden variants (`.statiki.*`) and `~/.config/statiki/` for global config.
///
/// # Example
///
/// ```yaml
/// owner: octocat/
/// server:
///   base_url: https://statiki.herokuapp.com
///   auth_token: ${STATIKI_SESSION_TOKEN}
/// prompt:
///   preview_lines: 20
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatikiConfig {
    /// Namespace shown in front of the repository name, e.g. `octocat/`
    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub prompt: PromptSettings,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Where the provisioning backend lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_create_repo_path")]
    pub create_repo_path: String,

    #[serde(default = "default_configure_path")]
    pub configure_path: String,

    /// Sent as `Authorization: token <value>`; never printed by `config show`
    #[serde(default, skip_serializing)]
    pub auth_token: Option<String>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_create_repo_path() -> String {
    "/create_repo".to_string()
}

fn default_configure_path() -> String {
    "/manage".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            create_repo_path: default_create_repo_path(),
            configure_path: default_configure_path(),
            auth_token: None,
        }
    }
}

// ============================================================================
// Prompt Configuration
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptSettings {
    /// Lines of each file shown before the preview is folded
    #[serde(default = "default_preview_lines")]
    pub preview_lines: usize,
}

fn default_preview_lines() -> usize {
    10
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            preview_lines: default_preview_lines(),
        }
    }
}
