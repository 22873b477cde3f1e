//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Process variable that roots the router history.
pub const BASE_URL_VAR: &str = "BASE_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay deployment variables from the process environment.
///
/// `BASE_URL` replaces `router.base_url`; `API_HOST` and `WEBSOCKET_URL`
/// replace the matching `[env]` entries. Empty variables are ignored.
pub fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(base) = std::env::var(BASE_URL_VAR) {
        if !base.is_empty() {
            tracing::debug!(base_url = %base, "BASE_URL taken from environment");
            config.router.base_url = base;
        }
    }
    config.env.overlay_process_env();
}
