//! Display theme preference
//!
//! A single light/dark flag. Light is the default; the only transition is
//! a toggle.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::config::keys::THEME_MODE;
use crate::error::Result;
use crate::preference::{HydrateOutcome, Preference};
use crate::storage::KeyValueStore;

/// Display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Mode for a stored dark flag
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    /// Check if this is dark mode
    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }

    /// The other mode
    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => f.write_str("light"),
            ThemeMode::Dark => f.write_str("dark"),
        }
    }
}

/// Theme flag mirrored to the `themeMode` storage key (`true` = dark)
pub struct ThemePreference {
    dark: Preference<bool>,
}

impl ThemePreference {
    /// Create the flag in light mode; call [`initialize`](Self::initialize) to load it
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            dark: Preference::new(store, THEME_MODE, false),
        }
    }

    /// Create the flag and load the stored mode
    pub async fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let theme = Self::new(store);
        theme.initialize().await;
        theme
    }

    /// Load the stored mode. Never fails; on error the mode is left as it was.
    pub async fn initialize(&self) -> HydrateOutcome {
        self.dark.hydrate().await
    }

    /// Switch between light and dark. Returns the new mode.
    pub fn toggle_theme(&self) -> ThemeMode {
        let mut mode = ThemeMode::Light;
        self.dark.update(|dark| {
            *dark = !*dark;
            mode = ThemeMode::from_dark(*dark);
            true
        });
        debug!(%mode, "theme toggled");
        mode
    }

    /// Current flag: `false` for light, `true` for dark
    pub fn get_theme(&self) -> bool {
        self.dark.get()
    }

    /// Current mode
    pub fn mode(&self) -> ThemeMode {
        ThemeMode::from_dark(self.get_theme())
    }

    /// Observe the flag
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.dark.subscribe()
    }

    /// Wait for pending writes; fails if any of them failed
    pub async fn flush(&self) -> Result<()> {
        self.dark.flush().await
    }
}
