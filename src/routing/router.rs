//! Route lookup and navigation.
//!
//! # Responsibilities
//! - Resolve an app location or browser URL to at most one route
//! - Load the route's view before a navigation completes
//! - Drive the history stack (push, replace, back, forward)
//! - Track the currently mounted route
//!
//! # Design Decisions
//! - The route table is immutable after construction (shareable via Arc)
//! - First match wins, in declaration order
//! - Explicit NoMatch rather than a silent default route
//! - A failed navigation leaves history and the current route untouched

use std::sync::Arc;

use thiserror::Error;

use crate::observability::metrics;
use crate::routing::history::History;
use crate::routing::matcher::{LiteralMatcher, Matcher};
use crate::routing::route::{RouteEntry, RouteTable, ViewLoadError};
use crate::views::View;

/// Matching policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterOptions {
    /// Match paths case-sensitively.
    pub sensitive: bool,
    /// Require trailing slashes to match exactly.
    pub strict: bool,
}

/// Why a navigation did not complete.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("no route matches {0:?}")]
    NoMatch(String),
    #[error("no route named {0:?}")]
    UnknownName(String),
    #[error("view for {path:?} failed to load: {source}")]
    ViewLoad {
        path: String,
        #[source]
        source: ViewLoadError,
    },
    #[error("no history entry {0} steps away")]
    OutOfRange(isize),
}

/// A completed (or resolved-and-loaded) navigation.
#[derive(Debug, Clone)]
pub struct Navigation {
    /// App location as requested, query and fragment included.
    pub location: String,
    /// Path of the matched route.
    pub path: String,
    /// Name of the matched route.
    pub name: String,
    pub view: Arc<dyn View>,
}

/// Router owning the route table and a history strategy.
#[derive(Debug)]
pub struct Router {
    table: RouteTable,
    matchers: Vec<Box<dyn Matcher>>,
    history: Box<dyn History>,
    options: RouterOptions,
    current: Option<Navigation>,
}

impl Router {
    pub fn new(history: Box<dyn History>, table: RouteTable, options: RouterOptions) -> Self {
        let matchers = table
            .entries()
            .iter()
            .map(|entry| {
                Box::new(LiteralMatcher::new(entry.path(), options.sensitive, options.strict))
                    as Box<dyn Matcher>
            })
            .collect();

        tracing::debug!(
            routes = table.len(),
            base = %history.base(),
            "Router constructed"
        );

        Self {
            table,
            matchers,
            history,
            options,
            current: None,
        }
    }

    pub fn routes(&self) -> &[RouteEntry] {
        self.table.entries()
    }

    pub fn history(&self) -> &dyn History {
        self.history.as_ref()
    }

    /// The route currently mounted, if any navigation has completed.
    pub fn current(&self) -> Option<&Navigation> {
        self.current.as_ref()
    }

    /// Browser URL for an app location.
    pub fn href(&self, location: &str) -> String {
        self.history.create_href(location)
    }

    /// Find the route for an app location. Query and fragment are ignored.
    pub fn resolve(&self, location: &str) -> Option<&RouteEntry> {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or(location);
        self.matchers
            .iter()
            .position(|m| m.matches(path))
            .map(|i| &self.table.entries()[i])
    }

    /// App location for a browser URL. The base is compared with the same
    /// case policy as route paths.
    pub fn location_from_url(&self, url: &str) -> Option<String> {
        self.history.location_from_url(url, self.options.sensitive)
    }

    /// Path below the history base, compared literally (never as a pattern).
    pub fn strip_base<'a>(&self, path: &'a str) -> Option<&'a str> {
        self.history.strip_base(path, self.options.sensitive)
    }

    /// Find the route for a browser URL, going through the history base.
    pub fn resolve_url(&self, url: &str) -> Option<&RouteEntry> {
        let location = self.location_from_url(url)?;
        self.resolve(&location)
    }

    /// Named lookup. The empty name never matches.
    pub fn route_by_name(&self, name: &str) -> Option<&RouteEntry> {
        if name.is_empty() {
            return None;
        }
        self.routes().iter().find(|r| r.name() == name)
    }

    /// Resolve `location` and load its view without touching history.
    pub async fn load(&self, location: &str) -> Result<Navigation, NavigationError> {
        let Some(route) = self.resolve(location) else {
            tracing::warn!(location, "No route matched");
            return Err(NavigationError::NoMatch(location.to_string()));
        };

        let view = route.view().await.map_err(|source| NavigationError::ViewLoad {
            path: route.path().to_string(),
            source,
        })?;

        Ok(Navigation {
            location: location.to_string(),
            path: route.path().to_string(),
            name: route.name().to_string(),
            view,
        })
    }

    /// Mount whatever the history currently points at.
    pub async fn start(&mut self) -> Result<Navigation, NavigationError> {
        let location = self.history.location().to_string();
        let nav = self.load(&location).await?;
        Ok(self.commit(nav))
    }

    /// Navigate to `location`, adding a history entry.
    pub async fn push(&mut self, location: &str) -> Result<Navigation, NavigationError> {
        let nav = self.load(location).await?;
        self.history.push(location);
        Ok(self.commit(nav))
    }

    /// Navigate to `location`, replacing the current history entry.
    pub async fn replace(&mut self, location: &str) -> Result<Navigation, NavigationError> {
        let nav = self.load(location).await?;
        self.history.replace(location);
        Ok(self.commit(nav))
    }

    /// Navigate to the route called `name`.
    pub async fn push_named(&mut self, name: &str) -> Result<Navigation, NavigationError> {
        let path = self
            .route_by_name(name)
            .ok_or_else(|| NavigationError::UnknownName(name.to_string()))?
            .path()
            .to_string();
        self.push(&path).await
    }

    /// Move `delta` entries through history.
    pub async fn go(&mut self, delta: isize) -> Result<Navigation, NavigationError> {
        let location = self
            .history
            .peek(delta)
            .ok_or(NavigationError::OutOfRange(delta))?
            .to_string();
        let nav = self.load(&location).await?;
        self.history.go(delta);
        Ok(self.commit(nav))
    }

    pub async fn back(&mut self) -> Result<Navigation, NavigationError> {
        self.go(-1).await
    }

    pub async fn forward(&mut self) -> Result<Navigation, NavigationError> {
        self.go(1).await
    }

    fn commit(&mut self, nav: Navigation) -> Navigation {
        tracing::info!(
            location = %nav.location,
            route = %nav.name,
            href = %self.history.create_href(&nav.location),
            "Navigation complete"
        );
        metrics::record_navigation(&nav.path);
        self.current = Some(nav.clone());
        nav
    }
}
