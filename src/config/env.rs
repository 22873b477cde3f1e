//! Client endpoint resolution.
//!
//! The host page injects a mapping of overrides (`window.__ENV__`) before the
//! application starts. Two keys are recognized, `API_HOST` and
//! `WEBSOCKET_URL`. A key that is missing or empty falls back to the
//! local-development default. Nothing is validated: any non-empty string is
//! taken as-is.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Override key for the REST API base URL.
pub const API_HOST_KEY: &str = "API_HOST";

/// Override key for the websocket endpoint.
pub const WEBSOCKET_URL_KEY: &str = "WEBSOCKET_URL";

/// Default API base URL for local development.
pub const DEFAULT_API_HOST: &str = "http://localhost:8080";

/// Default websocket endpoint for local development.
pub const DEFAULT_WEBSOCKET_URL: &str = "ws://localhost:8080";

static CLIENT_CONFIG: OnceLock<ClientConfig> = OnceLock::new();

/// Deployment-time overrides, keyed by variable name.
///
/// Unknown keys are kept so they survive a round trip into `window.__ENV__`,
/// but only [`API_HOST_KEY`] and [`WEBSOCKET_URL_KEY`] are ever read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct EnvOverrides(BTreeMap<String, String>);

impl EnvOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Value for `key` if present and non-empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlay the recognized keys from the process environment.
    ///
    /// Empty process variables are ignored so they cannot blank out a value
    /// coming from the config file.
    pub fn overlay_process_env(&mut self) {
        for key in [API_HOST_KEY, WEBSOCKET_URL_KEY] {
            if let Ok(value) = std::env::var(key) {
                if !value.is_empty() {
                    self.0.insert(key.to_string(), value);
                }
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for EnvOverrides
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Endpoints the client uses to reach the game backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(rename = "API_HOST")]
    pub api_host: String,
    #[serde(rename = "WEBSOCKET_URL")]
    pub websocket_url: String,
}

impl ClientConfig {
    /// Resolve endpoints from optional overrides. Never fails.
    pub fn resolve(overrides: Option<&EnvOverrides>) -> Self {
        Self {
            api_host: pick(overrides, API_HOST_KEY, DEFAULT_API_HOST),
            websocket_url: pick(overrides, WEBSOCKET_URL_KEY, DEFAULT_WEBSOCKET_URL),
        }
    }

    /// The `window.__ENV__` assignment served to the browser.
    pub fn to_env_script(&self) -> String {
        // ClientConfig holds two strings; serialization cannot fail.
        let json = serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string());
        format!("window.__ENV__ = {};\n", json)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::resolve(None)
    }
}

fn pick(overrides: Option<&EnvOverrides>, key: &str, default: &str) -> String {
    match overrides.and_then(|o| o.get(key)) {
        Some(value) => value.to_string(),
        None => {
            tracing::debug!(key, default, "No override set, using default");
            default.to_string()
        }
    }
}

/// Resolve the process-wide client config exactly once.
///
/// The first call wins. Later calls return the already resolved value and
/// ignore their argument.
pub fn init(overrides: Option<&EnvOverrides>) -> &'static ClientConfig {
    let mut fresh = false;
    let config = CLIENT_CONFIG.get_or_init(|| {
        fresh = true;
        ClientConfig::resolve(overrides)
    });
    if fresh {
        tracing::info!(
            api_host = %config.api_host,
            websocket_url = %config.websocket_url,
            "Client endpoints resolved"
        );
    } else if overrides.is_some() {
        tracing::warn!("Client endpoints already resolved; ignoring new overrides");
    }
    config
}

/// The process-wide client config, resolved with no overrides if
/// [`init`] has not run yet.
pub fn client_config() -> &'static ClientConfig {
    CLIENT_CONFIG.get_or_init(ClientConfig::default)
}

/// Resolved `API_HOST`.
pub fn api_host() -> &'static str {
    &client_config().api_host
}

/// Resolved `WEBSOCKET_URL`.
pub fn websocket_url() -> &'static str {
    &client_config().websocket_url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_host_override_is_taken() {
        for host in ["https://api.example.com", "not even a url", "x"] {
            let overrides = EnvOverrides::new().with(API_HOST_KEY, host);
            let config = ClientConfig::resolve(Some(&overrides));
            assert_eq!(config.api_host, host);
        }
    }

    #[test]
    fn test_absent_object_uses_defaults() {
        let config = ClientConfig::resolve(None);
        assert_eq!(config.api_host, "http://localhost:8080");
        assert_eq!(config.websocket_url, "ws://localhost:8080");
    }

    #[test]
    fn test_missing_and_empty_keys_fall_back() {
        let empty = EnvOverrides::new();
        assert_eq!(ClientConfig::resolve(Some(&empty)), ClientConfig::default());

        let blank = EnvOverrides::new()
            .with(API_HOST_KEY, "")
            .with(WEBSOCKET_URL_KEY, "");
        assert_eq!(ClientConfig::resolve(Some(&blank)), ClientConfig::default());
    }

    #[test]
    fn test_websocket_override_is_taken() {
        let overrides = EnvOverrides::new().with(WEBSOCKET_URL_KEY, "wss://game.example.com/ws");
        let config = ClientConfig::resolve(Some(&overrides));
        assert_eq!(config.websocket_url, "wss://game.example.com/ws");
        assert_eq!(config.api_host, DEFAULT_API_HOST);
    }

    #[test]
    fn test_partial_overrides() {
        let overrides: EnvOverrides = [(API_HOST_KEY, "https://api.example.com")]
            .into_iter()
            .collect();
        let config = ClientConfig::resolve(Some(&overrides));
        assert_eq!(
            config,
            ClientConfig {
                api_host: "https://api.example.com".into(),
                websocket_url: "ws://localhost:8080".into(),
            }
        );
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let overrides = EnvOverrides::new().with("FEATURE_FLAG", "on");
        assert_eq!(ClientConfig::resolve(Some(&overrides)), ClientConfig::default());
    }

    #[test]
    fn test_env_script() {
        let script = ClientConfig::default().to_env_script();
        assert_eq!(
            script,
            "window.__ENV__ = {\"API_HOST\":\"http://localhost:8080\",\"WEBSOCKET_URL\":\"ws://localhost:8080\"};\n"
        );
    }

    // The only test in this crate that touches the process-wide value.
    #[test]
    fn test_init_resolves_once() {
        let first = EnvOverrides::new().with(API_HOST_KEY, "https://first.example.com");
        let second = EnvOverrides::new().with(API_HOST_KEY, "https://second.example.com");

        let a = init(Some(&first));
        let b = init(Some(&second));

        assert!(std::ptr::eq(a, b));
        assert_eq!(api_host(), "https://first.example.com");
        assert_eq!(websocket_url(), DEFAULT_WEBSOCKET_URL);
    }
}
