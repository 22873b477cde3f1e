use super::{Mounted, View};

#[derive(Debug, Default)]
pub struct GameView;

impl View for GameView {
    fn mount(&self) -> Mounted {
        Mounted {
            component: "GameView",
            title: "Guess the number".to_string(),
        }
    }
}
