use super::{Mounted, View};

/// Sign-in screen, mounted at the root path.
#[derive(Debug, Default)]
pub struct LoginView;

impl View for LoginView {
    fn mount(&self) -> Mounted {
        Mounted {
            component: "LoginView",
            title: "Login".to_string(),
        }
    }
}
