//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the shell
//! server. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::config::env::EnvOverrides;

/// Root configuration for the shell server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Client-side router settings.
    pub router: RouterConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Overrides injected into the browser as `window.__ENV__`.
    pub env: EnvOverrides,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5173").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5173".to_string(),
        }
    }
}

/// How navigation state is reflected in the address bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// Real paths (`/base/game`), deep-linkable.
    #[default]
    Web,
    /// Fragment paths (`/base/#/game`).
    Hash,
}

/// Client-side router settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Base path the history is rooted at.
    pub base_url: String,

    /// History strategy.
    pub history: HistoryMode,

    /// Match paths case-sensitively.
    pub sensitive: bool,

    /// Reject a trailing slash the route path does not have.
    pub strict: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            history: HistoryMode::Web,
            sensitive: false,
            strict: false,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:5173");
        assert_eq!(config.router.base_url, "/");
        assert_eq!(config.router.history, HistoryMode::Web);
        assert!(config.env.is_empty());
    }

    #[test]
    fn test_full_config() {
        let raw = r#"
            [listener]
            bind_address = "127.0.0.1:3000"

            [router]
            base_url = "/play/"
            history = "hash"
            strict = true

            [env]
            API_HOST = "https://api.example.com"
        "#;
        let config: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.router.base_url, "/play/");
        assert_eq!(config.router.history, HistoryMode::Hash);
        assert!(config.router.strict);
        assert!(!config.router.sensitive);
        assert_eq!(config.env.get("API_HOST"), Some("https://api.example.com"));
        assert_eq!(config.env.get("WEBSOCKET_URL"), None);
    }
}
