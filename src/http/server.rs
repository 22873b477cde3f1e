//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router and wire up middleware (request ID, tracing, timeout)
//! - Serve env.js, env.json and routes.json under the router base
//! - Hand every other GET to the client-side router and render the shell
//!
//! # Design Decisions
//! - Only `/healthz` goes through Axum path syntax; everything under the
//!   base is dispatched by the fallback, so a base such as `/:play` or
//!   `/{room}` is matched literally instead of as a route pattern
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{AppConfig, ClientConfig};
use crate::observability::metrics;
use crate::routing::{Navigation, NavigationError, Router};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<Router>,
    pub client: Arc<ClientConfig>,
    /// Absolute URL of the env script, under the router base.
    pub env_script: Arc<str>,
}

/// One row of `routes.json`.
#[derive(Debug, Serialize)]
struct RouteInfo {
    path: String,
    name: String,
    href: String,
    loaded: bool,
}

/// Host server for the single-page shell.
pub struct ShellServer {
    app: axum::Router,
    config: AppConfig,
}

impl ShellServer {
    pub fn new(config: AppConfig, router: Router, client: ClientConfig) -> Self {
        let base = router.history().base().to_string();
        let state = AppState {
            env_script: under_base(&base, "/env.js").into(),
            router: Arc::new(router),
            client: Arc::new(client),
        };
        let app = Self::build_router(&config, state);
        Self { app, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> axum::Router {
        axum::Router::new()
            .route("/healthz", get(health))
            .fallback(shell_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The Axum app, for serving elsewhere or driving in tests.
    pub fn app(&self) -> axum::Router {
        self.app.clone()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Shell server starting");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("Shell server stopped");
        Ok(())
    }
}

/// Join an absolute asset path onto the router base.
fn under_base(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

async fn health() -> &'static str {
    "ok"
}

fn env_js(state: &AppState) -> Response {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        state.client.to_env_script(),
    )
        .into_response()
}

fn env_json(state: &AppState) -> Response {
    Json(state.client.as_ref().clone()).into_response()
}

fn routes_json(state: &AppState) -> Response {
    let routes = state
        .router
        .routes()
        .iter()
        .map(|r| RouteInfo {
            path: r.path().to_string(),
            name: r.name().to_string(),
            href: state.router.href(r.path()),
            loaded: r.is_loaded(),
        })
        .collect::<Vec<_>>();
    Json(routes).into_response()
}

/// Serve the base-relative endpoints, or resolve a deep link through the
/// client router and render the shell.
async fn shell_handler(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        metrics::record_request(405);
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let endpoint = match state.router.strip_base(uri.path()) {
        Some("/env.js") => Some(env_js(&state)),
        Some("/env.json") => Some(env_json(&state)),
        Some("/routes.json") => Some(routes_json(&state)),
        _ => None,
    };
    if let Some(response) = endpoint {
        metrics::record_request(response.status().as_u16());
        return response;
    }

    let url = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let Some(location) = state.router.location_from_url(url) else {
        tracing::warn!(url, base = %state.router.history().base(), "Request outside router base");
        metrics::record_request(404);
        return (StatusCode::NOT_FOUND, "No matching route found").into_response();
    };

    match state.router.load(&location).await {
        Ok(nav) => {
            metrics::record_request(200);
            Html(render_shell(&nav, &state.env_script)).into_response()
        }
        Err(NavigationError::ViewLoad { path, source }) => {
            tracing::error!(route = %path, error = %source, "View failed to load");
            metrics::record_request(500);
            (StatusCode::INTERNAL_SERVER_ERROR, "View failed to load").into_response()
        }
        Err(_) => {
            metrics::record_request(404);
            (StatusCode::NOT_FOUND, "No matching route found").into_response()
        }
    }
}

fn render_shell(nav: &Navigation, env_script: &str) -> String {
    let mounted = nav.view.mount();
    format!(
        r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{title}</title>
    <script src="{env_script}"></script>
  </head>
  <body>
    <div id="app" data-view="{component}" data-route="{name}" data-location="{location}"></div>
  </body>
</html>
"#,
        env_script = escape_attr(env_script),
        title = mounted.title,
        component = mounted.component,
        name = nav.name,
        location = escape_attr(&nav.location),
    )
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnvOverrides, RouterConfig};
    use crate::routing::create_router;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn server(router_config: RouterConfig, client: ClientConfig) -> ShellServer {
        let config = AppConfig {
            router: router_config.clone(),
            ..AppConfig::default()
        };
        let router = create_router(&router_config).unwrap();
        ShellServer::new(config, router, client)
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, String, Option<String>) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let request_id = resp
            .headers()
            .get("x-request-id")
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap(), request_id)
    }

    #[tokio::test]
    async fn test_deep_links_render_views() {
        let app = server(RouterConfig::default(), ClientConfig::default()).app();

        let (status, body, request_id) = get(app.clone(), "/game").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"data-view="GameView""#));
        assert!(body.contains(r#"data-route="game""#));
        assert!(body.contains(r#"<script src="/env.js">"#));
        let request_id = request_id.unwrap();
        assert_eq!(
            uuid::Uuid::parse_str(&request_id).unwrap().get_version_num(),
            4
        );

        let (status, body, _) = get(app.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"data-view="LoginView""#));
        assert!(body.contains(r#"data-route="""#));

        let (status, body, _) = get(app, "/room-selection?room=3").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"data-location="/room-selection?room=3""#));
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let app = server(RouterConfig::default(), ClientConfig::default()).app();
        let (status, _, _) = get(app, "/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_env_endpoints() {
        let overrides = EnvOverrides::new().with("API_HOST", "https://api.example.com");
        let client = ClientConfig::resolve(Some(&overrides));
        let app = server(RouterConfig::default(), client).app();

        let (status, body, _) = get(app.clone(), "/env.js").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("window.__ENV__ = "));
        assert!(body.contains("https://api.example.com"));
        assert!(body.contains("ws://localhost:8080"));

        let (_, body, _) = get(app, "/env.json").await;
        let parsed: ClientConfig = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.api_host, "https://api.example.com");
        assert_eq!(parsed.websocket_url, "ws://localhost:8080");
    }

    #[tokio::test]
    async fn test_base_path() {
        let config = RouterConfig {
            base_url: "/play/".into(),
            ..RouterConfig::default()
        };
        let app = server(config, ClientConfig::default()).app();

        let (status, body, _) = get(app.clone(), "/play/game").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<script src="/play/env.js">"#));

        let (status, _, _) = get(app.clone(), "/play/env.js").await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, _) = get(app.clone(), "/game").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body, _) = get(app, "/play/routes.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#""href":"/play/room-selection""#));
        assert!(body.contains(r#""loaded":true"#));
    }

    #[tokio::test]
    async fn test_base_match_follows_sensitivity() {
        let config = RouterConfig {
            base_url: "/play/".into(),
            ..RouterConfig::default()
        };
        let app = server(config, ClientConfig::default()).app();

        let (status, body, _) = get(app.clone(), "/PLAY/game").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"data-view="GameView""#));

        let (status, _, _) = get(app, "/Play/env.json").await;
        assert_eq!(status, StatusCode::OK);

        let config = RouterConfig {
            base_url: "/play/".into(),
            sensitive: true,
            ..RouterConfig::default()
        };
        let app = server(config, ClientConfig::default()).app();

        let (status, _, _) = get(app.clone(), "/PLAY/game").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = get(app, "/PLAY/env.js").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_pattern_like_bases_are_literal() {
        for base in ["/:play", "/*rest"] {
            let config = RouterConfig {
                base_url: base.into(),
                ..RouterConfig::default()
            };
            let app = server(config, ClientConfig::default()).app();

            let (status, body, _) = get(app.clone(), &format!("{base}/env.js")).await;
            assert_eq!(status, StatusCode::OK, "{base}");
            assert!(body.starts_with("window.__ENV__ = "));

            let (status, body, _) = get(app.clone(), &format!("{base}/game")).await;
            assert_eq!(status, StatusCode::OK, "{base}");
            assert!(body.contains(&format!(r#"<script src="{base}/env.js">"#)));

            let (status, _, _) = get(app.clone(), "/other/env.js").await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{base}");

            let (status, _, _) = get(app, "/other/game").await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{base}");
        }
    }

    #[tokio::test]
    async fn test_brace_base_does_not_capture() {
        let config = RouterConfig {
            base_url: "/{room}".into(),
            ..RouterConfig::default()
        };
        let app = server(config, ClientConfig::default()).app();

        let (status, _, _) = get(app.clone(), "/other/env.js").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = get(app.clone(), "/other/game").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body, _) = get(app, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_rejects_non_get() {
        let app = server(RouterConfig::default(), ClientConfig::default()).app();
        let resp = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/game")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_under_base() {
        assert_eq!(under_base("/", "/env.js"), "/env.js");
        assert_eq!(under_base("/play", "/env.js"), "/play/env.js");
    }
}
