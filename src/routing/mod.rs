//! Client-side routing subsystem.
//!
//! # Data Flow
//! ```text
//! Browser URL (/base/game?room=7)
//!     → history.rs (strip base / read fragment → app location "/game?room=7")
//!     → router.rs (drop query & fragment, first literal match wins)
//!     → matcher.rs (case / trailing-slash policy)
//!     → route.rs (load view on first use, cache for router lifetime)
//!     → Navigation { location, name, view } or NavigationError
//!
//! Route declaration (at startup):
//!     table.rs (the app's three screens)
//!     → RouteTable (reject duplicate paths / names)
//!     → Router (immutable table + mutable history)
//! ```
//!
//! # Design Decisions
//! - Routes fixed at construction; only history and the view caches change
//! - Views are never loaded at construction, only when navigated to
//! - A navigation commits to history only after its view has loaded
//! - No catch-all: an unknown path is an explicit NoMatch

pub mod history;
pub mod matcher;
pub mod route;
pub mod router;
pub mod table;

pub use history::{HashHistory, History, WebHistory};
pub use route::{RouteEntry, RouteTable, RouteTableError, ViewLoadError};
pub use router::{Navigation, NavigationError, Router, RouterOptions};
pub use table::{app_routes, create_router};
