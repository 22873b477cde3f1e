//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (navigation, view-load and request counters)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - RUST_LOG wins over the configured level
//! - Metrics are cheap (atomic increments); without an installed recorder
//!   they are no-ops, so library users and tests pay nothing

pub mod logging;
pub mod metrics;
