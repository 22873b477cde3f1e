//! HTTP host subsystem.
//!
//! Serves the single-page shell the way the hosting page does in a browser
//! deployment: it injects `window.__ENV__` and answers deep links for every
//! declared route so history-mode URLs survive a reload.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → tower-http layers (assign / propagate x-request-id, trace, timeout)
//!     → server.rs /healthz
//!     → server.rs fallback: strip the router base literally, then
//!         env.js / env.json / routes.json, or
//!         routing::Router (resolve + lazy view load)
//!     → HTML shell mounting the view, or 404 when nothing matches
//! ```

pub mod server;

pub use server::{AppState, ShellServer};
