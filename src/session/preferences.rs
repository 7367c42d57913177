//! Accessibility theme and its persistence port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Display theme chosen for accessibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum A11yTheme {
    /// Regular styling.
    #[default]
    Default,
    /// High-contrast colours.
    HighContrast,
    /// Enlarged text.
    LargeText,
}

impl A11yTheme {
    /// Every theme, in menu order.
    pub const ALL: [Self; 3] = [Self::Default, Self::HighContrast, Self::LargeText];

    /// Stored identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::HighContrast => "high-contrast",
            Self::LargeText => "large-text",
        }
    }

    /// Class applied to the document body. Exactly one is active at a time.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Default => "a11y-theme-default",
            Self::HighContrast => "a11y-theme-high-contrast",
            Self::LargeText => "a11y-theme-large-text",
        }
    }
}

/// A stored theme identifier is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown theme: {0}")]
pub struct ParseThemeError(pub String);

impl TryFrom<&str> for A11yTheme {
    type Error = ParseThemeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == value)
            .ok_or_else(|| ParseThemeError(value.to_owned()))
    }
}

impl fmt::Display for A11yTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type for preference operations.
pub type PreferenceResult<T> = Result<T, PreferenceError>;

/// Errors returned by preference stores.
#[derive(Debug, Clone, Error)]
pub enum PreferenceError {
    /// A stored value could not be decoded.
    #[error(transparent)]
    InvalidTheme(#[from] ParseThemeError),
    /// The backing storage failed.
    #[error("preference storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl PreferenceError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}

/// Device-local preference persistence.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Returns the saved theme, or `None` when nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError`] when the stored value is unreadable.
    async fn load_theme(&self) -> PreferenceResult<Option<A11yTheme>>;

    /// Saves the theme.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::Storage`] when the write fails.
    async fn save_theme(&self, theme: A11yTheme) -> PreferenceResult<()>;
}

/// Preference store holding the raw theme identifier in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    theme: Arc<RwLock<Option<String>>>,
}

impl InMemoryPreferenceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a raw identifier, as if written by an
    /// earlier run.
    #[must_use]
    pub fn with_raw_theme(raw: impl Into<String>) -> Self {
        Self {
            theme: Arc::new(RwLock::new(Some(raw.into()))),
        }
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn load_theme(&self) -> PreferenceResult<Option<A11yTheme>> {
        let raw = self
            .theme
            .read()
            .map_err(|err| PreferenceError::storage(std::io::Error::other(err.to_string())))?
            .clone();
        raw.as_deref()
            .map(A11yTheme::try_from)
            .transpose()
            .map_err(PreferenceError::from)
    }

    async fn save_theme(&self, theme: A11yTheme) -> PreferenceResult<()> {
        let mut slot = self
            .theme
            .write()
            .map_err(|err| PreferenceError::storage(std::io::Error::other(err.to_string())))?;
        *slot = Some(theme.as_str().to_owned());
        Ok(())
    }
}
