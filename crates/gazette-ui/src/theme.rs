//! Color scheme preference.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Storage key holding the persisted preference.
pub const THEME_STORAGE_KEY: &str = "data-theme";

/// Class added to the document root so the switch animates.
pub const TRANSITION_CLASS: &str = "transition";

/// Site color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The opposite scheme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Scheme a stored preference renders as. Only the exact value `"dark"`
    /// is dark; the stylesheet has no rule for anything else.
    pub fn from_stored(value: &str) -> Self {
        if value == Self::Dark.as_str() {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Scheme implied by the OS-level `prefers-color-scheme` signal.
    pub fn from_os(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown theme: {0:?}")]
pub struct UnknownTheme(pub String);

/// Persistent string storage (the browser's `localStorage`).
pub trait ThemeStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl ThemeStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// DOM updates for the color scheme, on page load or a switch toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeChange {
    /// New scheme, written to the root `data-theme` attribute
    pub theme: Theme,
    /// `aria-checked` on the switch
    pub aria_checked: bool,
    /// Classes added to the document root
    pub root_classes_added: Vec<&'static str>,
}

/// Current scheme: the stored preference, else the OS signal.
///
/// Any stored value counts as a preference; values other than `"dark"`
/// render light, so toggling them switches to dark.
pub fn current_theme(store: &impl ThemeStore, prefers_dark: bool) -> Theme {
    match store.get(THEME_STORAGE_KEY) {
        Some(value) => Theme::from_stored(&value),
        None => Theme::from_os(prefers_dark),
    }
}

/// Apply the current scheme when the page loads. Nothing is persisted and
/// the switch does not animate.
pub fn load_theme(store: &impl ThemeStore, prefers_dark: bool) -> ThemeChange {
    let theme = current_theme(store, prefers_dark);

    ThemeChange {
        theme,
        aria_checked: theme == Theme::Dark,
        root_classes_added: Vec::new(),
    }
}

/// Flip the scheme and persist the new preference.
pub fn toggle_theme(store: &mut impl ThemeStore, prefers_dark: bool) -> ThemeChange {
    let theme = current_theme(store, prefers_dark).toggled();
    store.set(THEME_STORAGE_KEY, theme.as_str());

    ThemeChange {
        theme,
        aria_checked: theme == Theme::Dark,
        root_classes_added: vec![TRANSITION_CLASS],
    }
}

/// Scheme applied to embedded tweets on page load.
pub fn tweet_theme(store: &impl ThemeStore, prefers_dark: bool) -> Theme {
    current_theme(store, prefers_dark)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn preference_round_trips() {
        let mut store = MemoryStore::new();
        store.set(THEME_STORAGE_KEY, "dark");

        assert_eq!(store.get(THEME_STORAGE_KEY).as_deref(), Some("dark"));
        assert_eq!(current_theme(&store, false), Theme::Dark);
    }

    #[test]
    fn defaults_to_os_signal() {
        let store = MemoryStore::new();

        assert_eq!(current_theme(&store, true), Theme::Dark);
        assert_eq!(current_theme(&store, false), Theme::Light);
    }

    #[test]
    fn unknown_stored_values_are_not_dark() {
        let mut store = MemoryStore::new();
        store.set(THEME_STORAGE_KEY, "sepia");

        assert_eq!(current_theme(&store, true), Theme::Light);
        assert_eq!(toggle_theme(&mut store, true).theme, Theme::Dark);

        store.set(THEME_STORAGE_KEY, "Dark");
        assert_eq!(current_theme(&store, true), Theme::Light);
    }

    #[test]
    fn load_applies_stored_preference() {
        let mut store = MemoryStore::new();
        store.set(THEME_STORAGE_KEY, "dark");

        assert_eq!(
            load_theme(&store, false),
            ThemeChange {
                theme: Theme::Dark,
                aria_checked: true,
                root_classes_added: vec![],
            }
        );
    }

    #[test]
    fn load_then_toggle_changes_os_dark_page() {
        let mut store = MemoryStore::new();

        let loaded = load_theme(&store, true);
        let toggled = toggle_theme(&mut store, true);

        assert_eq!(loaded.theme, Theme::Dark);
        assert_eq!(toggled.theme, Theme::Light);
        assert_ne!(loaded.theme, toggled.theme);
    }

    #[test]
    fn toggle_flips_and_persists() {
        let mut store = MemoryStore::new();

        let change = toggle_theme(&mut store, false);
        assert_eq!(
            change,
            ThemeChange {
                theme: Theme::Dark,
                aria_checked: true,
                root_classes_added: vec!["transition"],
            }
        );
        assert_eq!(store.get(THEME_STORAGE_KEY).as_deref(), Some("dark"));

        let change = toggle_theme(&mut store, false);
        assert_eq!(change.theme, Theme::Light);
        assert!(!change.aria_checked);
    }

    #[test]
    fn stored_preference_beats_os_signal() {
        let mut store = MemoryStore::new();
        store.set(THEME_STORAGE_KEY, "light");

        assert_eq!(tweet_theme(&store, true), Theme::Light);

        store.clear();
        assert_eq!(tweet_theme(&store, true), Theme::Dark);
    }

    #[test]
    fn parses_theme_names() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("blue".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.to_string(), "light");
    }
}
