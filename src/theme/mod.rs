//! Display themes: built-ins, user-defined themes and the current selection
//!
//! The collection is always rebuilt as built-ins followed by custom themes.
//! Built-ins come from a constant list and are never replaced; a custom
//! theme with a built-in name only lives in the custom overlay.

use crate::storage::{KeyValueStore, StorageError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Storage key for the JSON array of custom themes
pub const CUSTOM_THEMES_KEY: &str = "customThemes";

/// Storage key for the JSON-encoded name of the current theme
pub const CURRENT_THEME_KEY: &str = "currentTheme";

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Unknown theme: {0}")]
    Unknown(String),

    #[error("Failed to persist themes: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to encode themes: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A named set of style tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    /// Background token
    pub bg: String,
    /// Default text token
    pub text: String,
    /// Header and prompt chrome
    pub prompt: String,
    /// Echoed command text
    pub command: String,
    /// Command output
    pub output: String,
    /// Error output
    pub error: String,
    /// Separator lines
    pub border: String,
    /// Footer tips
    pub tip: String,
}

impl Theme {
    /// Build a theme from its name followed by the eight style tokens in
    /// field order. Returns `None` when fewer than nine values are given.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Option<Self> {
        if tokens.len() < 9 {
            return None;
        }
        let t = |i: usize| tokens[i].as_ref().to_string();
        Some(Self {
            name: tokens[0].as_ref().to_lowercase(),
            bg: t(1),
            text: t(2),
            prompt: t(3),
            command: t(4),
            output: t(5),
            error: t(6),
            border: t(7),
            tip: t(8),
        })
    }
}

#[allow(clippy::too_many_arguments)]
fn builtin(
    name: &str,
    bg: &str,
    text: &str,
    prompt: &str,
    command: &str,
    output: &str,
    error: &str,
    border: &str,
    tip: &str,
) -> Theme {
    Theme {
        name: name.to_string(),
        bg: bg.to_string(),
        text: text.to_string(),
        prompt: prompt.to_string(),
        command: command.to_string(),
        output: output.to_string(),
        error: error.to_string(),
        border: border.to_string(),
        tip: tip.to_string(),
    }
}

/// The built-in themes, in display order
pub fn builtin_themes() -> Vec<Theme> {
    vec![
        builtin(
            "classic",
            "bg-black",
            "text-green-400",
            "text-green-500",
            "text-green-400",
            "text-green-300",
            "text-red-400",
            "border-green-900",
            "text-green-700",
        ),
        builtin(
            "light",
            "bg-white",
            "text-black",
            "text-gray-600",
            "text-black",
            "text-gray-700",
            "text-red-500",
            "border-gray-300",
            "text-gray-500",
        ),
        builtin(
            "blue",
            "bg-slate-900",
            "text-blue-400",
            "text-blue-500",
            "text-blue-400",
            "text-blue-300",
            "text-red-400",
            "border-blue-900",
            "text-blue-700",
        ),
        builtin(
            "purple",
            "bg-gray-900",
            "text-purple-400",
            "text-purple-500",
            "text-purple-400",
            "text-purple-300",
            "text-red-400",
            "border-purple-900",
            "text-purple-700",
        ),
    ]
}

/// Theme collection with persisted custom themes and selection
pub struct ThemeStore {
    store: Box<dyn KeyValueStore>,
    custom: Vec<Theme>,
    themes: Vec<Theme>,
    current: String,
}

impl ThemeStore {
    /// Load custom themes and the saved selection from `store`.
    ///
    /// Malformed custom theme data is logged and dropped; the store is
    /// still usable with the built-ins alone.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let custom = match Self::read_custom(store.as_ref()) {
            Ok(custom) => custom,
            Err(e) => {
                warn!("Failed to load themes: {}", e);
                Vec::new()
            }
        };

        let mut themes = Self {
            store,
            custom,
            themes: Vec::new(),
            current: String::new(),
        };
        themes.rebuild();
        themes.current = themes.themes[0].name.clone();

        match themes.read_current() {
            Ok(Some(name)) if themes.position(&name).is_some() => {
                debug!("Restored theme {}", name);
                themes.current = name;
            }
            Ok(Some(name)) => {
                debug!("Saved theme {} no longer exists", name);
            }
            Ok(None) => {}
            Err(e) => warn!("Failed to load current theme: {}", e),
        }

        themes
    }

    fn read_custom(store: &dyn KeyValueStore) -> Result<Vec<Theme>, ThemeError> {
        match store.get(CUSTOM_THEMES_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn read_current(&self) -> Result<Option<String>, ThemeError> {
        match self.store.get(CURRENT_THEME_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn rebuild(&mut self) {
        let mut themes = builtin_themes();
        themes.extend(self.custom.iter().cloned());
        self.themes = themes;
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.themes
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Every theme, built-ins first
    pub fn list(&self) -> &[Theme] {
        &self.themes
    }

    /// User-defined themes only
    pub fn custom(&self) -> &[Theme] {
        &self.custom
    }

    /// Case-insensitive lookup; built-ins win over custom themes
    pub fn find(&self, name: &str) -> Option<&Theme> {
        self.position(name).map(|i| &self.themes[i])
    }

    /// The active theme
    pub fn current(&self) -> &Theme {
        self.find(&self.current).unwrap_or(&self.themes[0])
    }

    /// Make `name` the current theme and persist the selection.
    ///
    /// The selection changes in memory even if persisting fails; the
    /// storage error is still returned so the caller can report it.
    pub fn set_current(&mut self, name: &str) -> Result<(), ThemeError> {
        let index = self
            .position(name)
            .ok_or_else(|| ThemeError::Unknown(name.to_string()))?;
        self.current = self.themes[index].name.clone();
        info!("Theme set to {}", self.current);

        let encoded = serde_json::to_string(&self.current)?;
        self.store.set(CURRENT_THEME_KEY, &encoded)?;
        Ok(())
    }

    /// Add `theme` to the custom overlay, replacing a custom theme of the
    /// same name, and persist the custom themes. The selection is untouched.
    pub fn add_custom(&mut self, theme: Theme) -> Result<(), ThemeError> {
        self.custom.retain(|t| !t.name.eq_ignore_ascii_case(&theme.name));
        info!("Added custom theme {}", theme.name);
        self.custom.push(theme);
        self.rebuild();

        let encoded = serde_json::to_string(&self.custom)?;
        self.store.set(CUSTOM_THEMES_KEY, &encoded)?;
        Ok(())
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("themes", &self.themes.len())
            .field("custom", &self.custom.len())
            .field("current", &self.current)
            .finish()
    }
}
