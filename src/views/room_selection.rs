use super::{Mounted, View};

/// Lobby where a player creates or joins a game room.
#[derive(Debug, Default)]
pub struct RoomSelectionView;

impl View for RoomSelectionView {
    fn mount(&self) -> Mounted {
        Mounted {
            component: "RoomSelectionView",
            title: "Choose a room".to_string(),
        }
    }
}
