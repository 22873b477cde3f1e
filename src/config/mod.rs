//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (overlay BASE_URL / API_HOST / WEBSOCKET_URL from process env)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!
//! AppConfig.env (the overrides table)
//!     → env.rs (resolve once per process)
//!     → ClientConfig { api_host, websocket_url }
//!     → injected into the browser as window.__ENV__
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults to allow minimal configs
//! - Client endpoint resolution is total: bad or missing overrides fall back
//!   to local-development defaults instead of failing startup

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::{ClientConfig, EnvOverrides};
pub use loader::{load_config, ConfigError};
pub use schema::{AppConfig, HistoryMode, ListenerConfig, RouterConfig};
