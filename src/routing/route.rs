//! Route entries and the validated route table.
//!
//! # Responsibilities
//! - Pair a literal path and a logical name with a deferred view loader
//! - Run the loader on first use only and cache the view
//! - Reject tables with conflicting paths or names

use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::observability::metrics;
use crate::routing::matcher::trim_slash;
use crate::views::View;

/// Future produced by a view loader.
pub type ViewFuture = BoxFuture<'static, Result<Arc<dyn View>, ViewLoadError>>;

/// Zero-argument factory for a view.
pub type ViewLoader = Arc<dyn Fn() -> ViewFuture + Send + Sync>;

/// A view loader gave up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ViewLoadError {
    reason: String,
}

impl ViewLoadError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Problems found while assembling a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("route path {0:?} must start with '/'")]
    InvalidPath(String),
    #[error("route path {0:?} is declared twice")]
    DuplicatePath(String),
    #[error("route name {0:?} is declared twice")]
    DuplicateName(String),
}

/// One navigable screen.
pub struct RouteEntry {
    path: String,
    name: String,
    loader: ViewLoader,
    view: OnceCell<Arc<dyn View>>,
}

impl RouteEntry {
    /// Declare a route whose view is produced by `load` on first navigation.
    pub fn new<F, Fut, V>(path: impl Into<String>, name: impl Into<String>, load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, ViewLoadError>> + Send + 'static,
        V: View + 'static,
    {
        let loader: ViewLoader = Arc::new(move || {
            let fut = load();
            Box::pin(async move { fut.await.map(|view| Arc::new(view) as Arc<dyn View>) })
        });
        Self {
            path: path.into(),
            name: name.into(),
            loader,
            view: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Logical name; may be empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True once the view has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.view.initialized()
    }

    /// The view, loading it first if this is the first request.
    ///
    /// Concurrent first requests share one loader run. A failed load is not
    /// cached, so the next request runs the loader again.
    pub async fn view(&self) -> Result<Arc<dyn View>, ViewLoadError> {
        self.view
            .get_or_try_init(|| async {
                tracing::debug!(path = %self.path, name = %self.name, "Loading view");
                let result = (self.loader)().await;
                match &result {
                    Ok(_) => metrics::record_view_load(&self.path, "ok"),
                    Err(e) => {
                        tracing::error!(path = %self.path, error = %e, "View failed to load");
                        metrics::record_view_load(&self.path, "error");
                    }
                }
                result
            })
            .await
            .cloned()
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// Ordered, conflict-free set of routes.
#[derive(Debug)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteTableError> {
        let mut paths = HashSet::new();
        let mut names = HashSet::new();

        for entry in &entries {
            if !entry.path.starts_with('/') {
                return Err(RouteTableError::InvalidPath(entry.path.clone()));
            }
            if !paths.insert(trim_slash(&entry.path).to_ascii_lowercase()) {
                return Err(RouteTableError::DuplicatePath(entry.path.clone()));
            }
            // Empty names mark unnamed routes and may repeat.
            if !entry.name.is_empty() && !names.insert(entry.name.clone()) {
                return Err(RouteTableError::DuplicateName(entry.name.clone()));
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
