//! The game's route table.
//!
//! | path              | name            | view              |
//! |-------------------|-----------------|-------------------|
//! | `/`               | (empty)         | LoginView         |
//! | `/room-selection` | `roomSelection` | RoomSelectionView |
//! | `/game`           | `game`          | GameView          |

use crate::config::schema::{HistoryMode, RouterConfig};
use crate::routing::history::{HashHistory, History, WebHistory};
use crate::routing::route::{RouteEntry, RouteTable, RouteTableError, ViewLoadError};
use crate::routing::router::{Router, RouterOptions};
use crate::views::{GameView, LoginView, RoomSelectionView, View};

async fn load<V: View + Default>() -> Result<V, ViewLoadError> {
    Ok(V::default())
}

/// Route entries in declaration order. No view is constructed here.
pub fn app_routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::new("/", "", load::<LoginView>),
        RouteEntry::new("/room-selection", "roomSelection", load::<RoomSelectionView>),
        RouteEntry::new("/game", "game", load::<GameView>),
    ]
}

/// Build the application router rooted at `config.base_url`.
pub fn create_router(config: &RouterConfig) -> Result<Router, RouteTableError> {
    let history: Box<dyn History> = match config.history {
        HistoryMode::Web => Box::new(WebHistory::new(&config.base_url)),
        HistoryMode::Hash => Box::new(HashHistory::new(&config.base_url)),
    };
    let options = RouterOptions {
        sensitive: config.sensitive,
        strict: config.strict,
    };
    Ok(Router::new(history, RouteTable::new(app_routes())?, options))
}
