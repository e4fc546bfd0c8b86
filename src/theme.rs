use crate::storage::KeyValueStore;
use std::fmt;

pub const THEME_KEY: &str = "theme";

/// Display preference, persisted alongside the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Stored theme, or `Dark` when absent or unrecognized.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get(THEME_KEY).as_deref().map(str::trim) {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn persist<S: KeyValueStore + ?Sized>(self, store: &mut S) {
        if let Err(e) = store.set(THEME_KEY, self.as_str()) {
            log::warn!("Failed to save theme: {e}");
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
