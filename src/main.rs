//! guess-shell host server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser                     ┌──────────────────────────────────────────┐
//!     ───────────────────────────▶│  http::server                            │
//!     GET /game                   │    ├─ /env.js  ← config::env (resolved   │
//!                                 │    │             once from [env] + vars) │
//!                                 │    └─ fallback → routing::Router         │
//!                                 │                   ├─ history (base path) │
//!                                 │                   ├─ matcher (literal)   │
//!                                 │                   └─ route (lazy view)   │
//!     ◀───────────────────────────│  HTML shell with data-view=GameView      │
//!                                 └──────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use guess_shell::config::{loader, AppConfig};
use guess_shell::lifecycle::{self, Shutdown};
use guess_shell::observability::logging;

#[derive(Parser)]
#[command(name = "guess-shell")]
#[command(about = "Serve the number-guessing game shell", long_about = None)]
struct Args {
    /// TOML config file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => loader::load_config(path)?,
        None => AppConfig::default(),
    };
    loader::apply_env_overrides(&mut config);
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("guess-shell v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        base_url = %config.router.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();
    lifecycle::start(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
