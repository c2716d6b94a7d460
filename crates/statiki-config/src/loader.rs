use crate::schema::StatikiConfig;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_SERVER: &str = "STATIKI_SERVER";
pub const ENV_OWNER: &str = "STATIKI_OWNER";
pub const ENV_TOKEN: &str = "STATIKI_TOKEN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Jsonc,
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;

        match ext {
            "jsonc" => Some(Self::Jsonc),
            "json" => Some(Self::Json),
            "yml" | "yaml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: StatikiConfig,
    /// `None` when no file was found and defaults were used
    pub path: Option<PathBuf>,
    pub format: Option<ConfigFormat>,
}

/// Load the configuration, falling back to defaults when no file exists.
///
/// An explicit `config_path` must exist. Environment overrides
/// (`STATIKI_SERVER`, `STATIKI_OWNER`, `STATIKI_TOKEN`) are applied last.
pub fn load_config(config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let resolved = match config_path.map(Path::to_path_buf).or_else(find_config_file) {
        Some(path) => load_config_from_file(&path)?,
        None => ResolvedConfig {
            config: StatikiConfig::default(),
            path: None,
            format: None,
        },
    };

    Ok(ResolvedConfig {
        config: apply_env_overrides(resolved.config),
        ..resolved
    })
}

pub fn load_config_from_file(path: &Path) -> Result<ResolvedConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| anyhow!("Unknown config format for: {}", path.display()))?;

    let config = parse_config_content(&content, format)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    Ok(ResolvedConfig {
        config: expand_env_vars(config),
        path: Some(path.to_path_buf()),
        format: Some(format),
    })
}

fn parse_config_content(content: &str, format: ConfigFormat) -> Result<StatikiConfig> {
    match format {
        ConfigFormat::Jsonc => json5::from_str(content).context("Failed to parse JSONC"),
        ConfigFormat::Json => serde_json::from_str(content).context("Failed to parse JSON"),
        ConfigFormat::Yaml => serde_yaml_ng::from_str(content).context("Failed to parse YAML"),
        ConfigFormat::Toml => toml::from_str(content).context("Failed to parse TOML"),
    }
}

const CONFIG_CANDIDATES: &[&str] = &[
    "statiki.jsonc",
    "statiki.json",
    "statiki.yml",
    "statiki.yaml",
    "statiki.toml",
    ".statiki.jsonc",
    ".statiki.json",
    ".statiki.yml",
    ".statiki.yaml",
    ".statiki.toml",
];

pub fn find_config_file() -> Option<PathBuf> {
    let cwd = env::current_dir().ok();
    let global = dirs::home_dir().map(|home| home.join(".config").join("statiki"));

    [cwd, global]
        .into_iter()
        .flatten()
        .find_map(|dir| find_config_in(&dir))
}

fn find_config_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| dir.join(candidate))
        .find(|path| path.exists())
}

fn expand_env_vars(mut config: StatikiConfig) -> StatikiConfig {
    config.owner = expand_env_string(&config.owner);
    config.server.base_url = expand_env_string(&config.server.base_url);
    config.server.create_repo_path = expand_env_string(&config.server.create_repo_path);
    config.server.configure_path = expand_env_string(&config.server.configure_path);
    config.server.auth_token = config
        .server
        .auth_token
        .as_deref()
        .map(expand_env_string);
    config
}

fn apply_env_overrides(config: StatikiConfig) -> StatikiConfig {
    apply_overrides(config, |name| env::var(name).ok())
}

fn apply_overrides(
    mut config: StatikiConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> StatikiConfig {
    if let Some(server) = lookup(ENV_SERVER).filter(|v| !v.is_empty()) {
        config.server.base_url = server;
    }
    if let Some(owner) = lookup(ENV_OWNER) {
        config.owner = owner;
    }
    if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.is_empty()) {
        config.server.auth_token = Some(token);
    }
    config
}

fn expand_env_string(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        if chars.peek() == Some(&'{') {
            chars.next();
            let mut var_name = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '}' {
                    closed = true;
                    break;
                }
                var_name.push(c);
            }
            match env::var(&var_name) {
                Ok(value) if closed => result.push_str(&value),
                _ => {
                    result.push_str("${");
                    result.push_str(&var_name);
                    if closed {
                        result.push('}');
                    }
                }
            }
            continue;
        }

        // $VAR: peek so the delimiter after the name is kept
        let mut var_name = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                var_name.push(c);
                chars.next();
            } else {
                break;
            }
        }
        if var_name.is_empty() {
            result.push('$');
        } else if let Ok(value) = env::var(&var_name) {
            result.push_str(&value);
        } else {
            result.push('$');
            result.push_str(&var_name);
        }
    }

    result
}
