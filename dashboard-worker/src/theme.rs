//! Light/dark theme state
//!
//! Mode resolution order: persisted preference, then the OS preference
//! signal, then light. Only [`ThemeController::toggle`] changes the mode.
//! Preference storage failures are logged and otherwise ignored.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::logging::log_warn;

/// Name of the persisted preference key (cookie name on the worker)
pub const PREFERENCE_KEY: &str = "theme";

/// Client hint header carrying the OS color scheme
pub const COLOR_SCHEME_HINT: &str = "Sec-CH-Prefers-Color-Scheme";

/// One year, in seconds
const COOKIE_MAX_AGE: u32 = 31_536_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Interpret a stored preference: only `dark` means dark
    pub fn from_persisted(raw: &str) -> Self {
        if raw.trim() == "dark" { ThemeMode::Dark } else { ThemeMode::Light }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for the single theme preference
pub trait PreferenceStore {
    /// `Ok(None)` when no preference has been saved yet
    fn load(&self) -> Result<Option<ThemeMode>, StoreError>;

    fn save(&mut self, mode: ThemeMode) -> Result<(), StoreError>;
}

/// Theme state for one render
#[derive(Debug)]
pub struct ThemeController<S> {
    store: S,
    mode: ThemeMode,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Resolve the initial mode from the store, then the OS signal, then light
    pub fn init(store: S, os_prefers_dark: Option<bool>) -> Self {
        let persisted = match store.load() {
            Ok(mode) => mode,
            Err(e) => {
                log_warn!("theme: {e}; falling back to system preference");
                None
            }
        };

        let mode = persisted.unwrap_or(if os_prefers_dark == Some(true) {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        });

        Self { store, mode }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Flip the mode and persist it. A failed save keeps the new mode for
    /// this render only.
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        if let Err(e) = self.store.save(self.mode) {
            log_warn!("theme: could not persist '{}': {e}", self.mode);
        }
        self.mode
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Read the OS color scheme from the client hint header value
pub fn prefers_dark_from_hint(header: Option<&str>) -> Option<bool> {
    let value = header?.trim().trim_matches('"').to_ascii_lowercase();
    match value.as_str() {
        "dark" => Some(true),
        "light" => Some(false),
        _ => None,
    }
}

/// Preference carried in the request `Cookie` header; saves produce a
/// `Set-Cookie` value for the response.
#[derive(Debug, Clone, Default)]
pub struct CookieStore {
    persisted: Option<String>,
    pending: Option<String>,
}

impl CookieStore {
    pub fn from_header(cookie_header: Option<&str>) -> Self {
        let persisted = cookie_header.and_then(|header| {
            header.split(';').find_map(|pair| {
                let (name, value) = pair.split_once('=')?;
                (name.trim() == PREFERENCE_KEY).then(|| value.trim().to_string())
            })
        });
        Self {
            persisted,
            pending: None,
        }
    }

    /// `Set-Cookie` value to send back, if the preference changed
    pub fn set_cookie(&self) -> Option<&str> {
        self.pending.as_deref()
    }
}

impl PreferenceStore for CookieStore {
    fn load(&self) -> Result<Option<ThemeMode>, StoreError> {
        Ok(self.persisted.as_deref().map(ThemeMode::from_persisted))
    }

    fn save(&mut self, mode: ThemeMode) -> Result<(), StoreError> {
        self.persisted = Some(mode.as_str().to_string());
        self.pending = Some(format!(
            "{PREFERENCE_KEY}={mode}; Path=/; Max-Age={COOKIE_MAX_AGE}; SameSite=Lax"
        ));
        Ok(())
    }
}

/// Process-local store; can simulate unavailable storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<String>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            value: None,
            unavailable: true,
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Option<ThemeMode>, StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory store disabled".into()));
        }
        Ok(self.value.as_deref().map(ThemeMode::from_persisted))
    }

    fn save(&mut self, mode: ThemeMode) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory store disabled".into()));
        }
        self.value = Some(mode.as_str().to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::build_theme_options;

    #[test]
    fn test_persisted_preference_wins_over_os() {
        let theme = ThemeController::init(MemoryStore::with_value("light"), Some(true));
        assert_eq!(theme.mode(), ThemeMode::Light);

        let theme = ThemeController::init(MemoryStore::with_value("dark"), Some(false));
        assert_eq!(theme.mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_os_preference_then_light() {
        let theme = ThemeController::init(MemoryStore::default(), Some(true));
        assert_eq!(theme.mode(), ThemeMode::Dark);

        let theme = ThemeController::init(MemoryStore::default(), None);
        assert_eq!(theme.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_unknown_persisted_value_means_light() {
        let theme = ThemeController::init(MemoryStore::with_value("sepia"), Some(true));
        assert_eq!(theme.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let mut theme = ThemeController::init(MemoryStore::default(), None);
        assert_eq!(theme.toggle(), ThemeMode::Dark);
        assert_eq!(theme.store().value(), Some("dark"));
    }

    #[test]
    fn test_double_toggle_restores_value_and_palette() {
        let mut theme = ThemeController::init(MemoryStore::with_value("dark"), None);
        let original_palette = build_theme_options(theme.mode());

        theme.toggle();
        assert_ne!(build_theme_options(theme.mode()), original_palette);
        theme.toggle();

        assert_eq!(theme.mode(), ThemeMode::Dark);
        assert_eq!(theme.store().value(), Some("dark"));
        assert_eq!(build_theme_options(theme.mode()), original_palette);
    }

    #[test]
    fn test_unavailable_store_degrades() {
        let mut theme = ThemeController::init(MemoryStore::unavailable(), Some(true));
        assert_eq!(theme.mode(), ThemeMode::Dark);
        assert_eq!(theme.toggle(), ThemeMode::Light);
        assert_eq!(theme.store().value(), None);
    }

    #[test]
    fn test_cookie_store_round() {
        let store = CookieStore::from_header(Some("session=abc; theme=dark; other=1"));
        let mut theme = ThemeController::init(store, None);
        assert_eq!(theme.mode(), ThemeMode::Dark);
        assert!(theme.store().set_cookie().is_none());

        theme.toggle();
        let cookie = theme.store().set_cookie().expect("toggle should set a cookie");
        assert!(cookie.starts_with("theme=light;"));
        assert!(cookie.contains("Path=/"));
    }

    #[test]
    fn test_cookie_store_without_theme() {
        let store = CookieStore::from_header(Some("session=abc"));
        assert_eq!(store.load(), Ok(None));
        assert_eq!(CookieStore::from_header(None).load(), Ok(None));
    }

    #[test]
    fn test_color_scheme_hint() {
        assert_eq!(prefers_dark_from_hint(Some("\"dark\"")), Some(true));
        assert_eq!(prefers_dark_from_hint(Some("light")), Some(false));
        assert_eq!(prefers_dark_from_hint(Some("no-preference")), None);
        assert_eq!(prefers_dark_from_hint(None), None);
    }
}
