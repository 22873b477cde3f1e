//! Shared utilities for integration tests.

use std::net::SocketAddr;

use guess_shell::config::{AppConfig, ClientConfig, EnvOverrides};
use guess_shell::{create_router, ShellServer, Shutdown};
use tokio::net::TcpListener;

/// A shell server running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a server with the given config; `[env]` resolves the client endpoints.
pub async fn start_server(config: AppConfig) -> TestServer {
    let client = ClientConfig::resolve(Some(&config.env));
    let router = create_router(&config.router).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = ShellServer::new(config, router, client);
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

#[allow(dead_code)]
pub fn overrides(pairs: &[(&str, &str)]) -> EnvOverrides {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}
