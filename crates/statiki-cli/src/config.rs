//! CLI configuration

use statiki_client::HttpBackendConfig;
use statiki_config::{ResolvedConfig, StatikiConfig};

use crate::commands::Cli;

/// Apply command-line flags on top of the loaded configuration.
///
/// Flags win over the environment, which already won over the file.
pub fn apply_cli_overrides(mut config: StatikiConfig, cli: &Cli) -> StatikiConfig {
    if let Some(ref server) = cli.server {
        config.server.base_url = server.clone();
    }
    if let Some(ref owner) = cli.owner {
        config.owner = owner.clone();
    }
    if cli.verbose {
        config.telemetry = config.telemetry.verbose();
    }
    config
}

pub fn backend_config(config: &StatikiConfig) -> HttpBackendConfig {
    let mut backend = HttpBackendConfig::new(&config.server.base_url);
    backend.create_repo_path = config.server.create_repo_path.clone();
    backend.configure_path = config.server.configure_path.clone();
    match config.server.auth_token {
        Some(ref token) if !token.is_empty() => backend.with_auth_token(token.clone()),
        _ => backend,
    }
}

/// Human-readable description of where the configuration came from
pub fn describe_source(resolved: &ResolvedConfig) -> String {
    match (&resolved.path, resolved.format) {
        (Some(path), Some(format)) => format!("{} ({:?})", path.display(), format),
        (Some(path), None) => path.display().to_string(),
        _ => "no config file found, using defaults".to_string(),
    }
}
