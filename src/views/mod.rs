//! Views the router can mount.
//!
//! The router knows nothing about a view beyond [`View::mount`]. The concrete
//! screens here only describe what the browser bundle should mount; their
//! rendering and game behavior live in the client code.

use std::fmt;

mod game;
mod login;
mod room_selection;

pub use game::GameView;
pub use login::LoginView;
pub use room_selection::RoomSelectionView;

/// A unit the host can mount into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mounted {
    /// Component identifier handed to the client bundle.
    pub component: &'static str,
    /// Document title while mounted.
    pub title: String,
}

/// Anything that can produce a mountable unit.
pub trait View: Send + Sync + fmt::Debug {
    fn mount(&self) -> Mounted;
}
