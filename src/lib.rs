//! Single-page shell for the number-guessing game.
//!
//! Two independent pieces:
//! - [`config::env`]: resolves `API_HOST` and `WEBSOCKET_URL` once per process
//! - [`routing`]: the route table and a history-backed router with lazily
//!   loaded views
//!
//! The [`http`] host serves them to a browser.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod views;

pub use config::env::{api_host, websocket_url};
pub use config::{AppConfig, ClientConfig, EnvOverrides};
pub use http::ShellServer;
pub use lifecycle::Shutdown;
pub use routing::{create_router, Router};
