//! Application session: the signed-in user and display preferences.
//!
//! An [`AppSession`] is started once per application run. It follows the
//! identity provider's signed-in state and owns the accessibility theme,
//! which is loaded from and saved to a [`PreferenceStore`].

mod app;
mod preferences;

pub use app::{AppSession, SessionError, SessionResult};
pub use preferences::{
    A11yTheme, InMemoryPreferenceStore, ParseThemeError, PreferenceError, PreferenceResult,
    PreferenceStore,
};

#[cfg(test)]
mod tests;
