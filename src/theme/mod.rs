use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// Concrete theme to render, given the platform preference.
    pub fn resolve(self, prefers_dark: bool) -> Theme {
        match self {
            Theme::System if prefers_dark => Theme::Dark,
            Theme::System => Theme::Light,
            theme => theme,
        }
    }
}

/// Sole owner of the theme. Everything else reads through a
/// [`ThemeSubscription`] and cannot write.
#[derive(Debug)]
pub struct ThemeStore {
    sender: watch::Sender<Theme>,
}

impl ThemeStore {
    pub fn new(initial: Theme) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    pub fn current(&self) -> Theme {
        *self.sender.borrow()
    }

    /// Returns whether subscribers were notified.
    pub fn set(&self, theme: Theme) -> bool {
        let changed = self.sender.send_if_modified(|current| {
            if *current == theme {
                return false;
            }
            *current = theme;
            true
        });

        if changed {
            debug!(?theme, subscribers = self.sender.receiver_count(), "theme changed");
        }
        changed
    }

    /// Flips between light and dark. `System` resolves against
    /// `prefers_dark` first.
    pub fn toggle(&self, prefers_dark: bool) -> Theme {
        let next = match self.current().resolve(prefers_dark) {
            Theme::Dark => Theme::Light,
            _ => Theme::Dark,
        };
        self.set(next);
        next
    }

    pub fn subscribe(&self) -> ThemeSubscription {
        ThemeSubscription {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

#[derive(Debug, Clone)]
pub struct ThemeSubscription {
    receiver: watch::Receiver<Theme>,
}

impl ThemeSubscription {
    pub fn current(&self) -> Theme {
        *self.receiver.borrow()
    }

    /// Returns the new theme if it changed since the last look.
    pub fn poll(&mut self) -> Option<Theme> {
        match self.receiver.has_changed() {
            Ok(true) => Some(*self.receiver.borrow_and_update()),
            _ => None,
        }
    }

    /// Waits for the next change. `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<Theme> {
        self.receiver.changed().await.ok()?;
        Some(*self.receiver.borrow_and_update())
    }
}
