//! Session lifecycle and the authentication guard.

use super::{A11yTheme, PreferenceError, PreferenceStore};
use crate::auth::{
    domain::AuthUser,
    ports::{AuthError, AuthProvider},
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Errors raised by the session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Nobody is signed in; the caller should show the sign-in screen.
    #[error("no user is signed in")]
    Unauthenticated,
    /// The identity provider stopped publishing sign-in changes.
    #[error("authentication provider closed")]
    ProviderClosed,
    /// Provider failure.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Preference storage failure.
    #[error(transparent)]
    Preferences(#[from] PreferenceError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Application-wide state for one run.
pub struct AppSession<P, S>
where
    P: AuthProvider + ?Sized,
    S: PreferenceStore + ?Sized,
{
    provider: Arc<P>,
    preferences: Arc<S>,
    user: watch::Receiver<Option<AuthUser>>,
    theme: A11yTheme,
}

impl<P, S> AppSession<P, S>
where
    P: AuthProvider + ?Sized,
    S: PreferenceStore + ?Sized,
{
    /// Subscribes to the provider and loads the saved theme.
    ///
    /// An unreadable saved theme falls back to [`A11yTheme::Default`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Preferences`] when preference storage fails.
    pub async fn start(provider: Arc<P>, preferences: Arc<S>) -> SessionResult<Self> {
        let theme = match preferences.load_theme().await {
            Ok(saved) => saved.unwrap_or_default(),
            Err(PreferenceError::InvalidTheme(err)) => {
                warn!(error = %err, "ignoring saved theme");
                A11yTheme::default()
            }
            Err(err) => return Err(err.into()),
        };
        let user = provider.subscribe();
        info!(%theme, signed_in = user.borrow().is_some(), "session started");
        Ok(Self {
            provider,
            preferences,
            user,
            theme,
        })
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<AuthUser> {
        self.user.borrow().clone()
    }

    /// Returns the signed-in user for screens that need one.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Unauthenticated`] when nobody is signed in.
    pub fn require_user(&self) -> SessionResult<AuthUser> {
        self.current_user().ok_or(SessionError::Unauthenticated)
    }

    /// Waits for the next sign-in change and returns the new user.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ProviderClosed`] once the provider is gone.
    pub async fn user_changed(&mut self) -> SessionResult<Option<AuthUser>> {
        self.user
            .changed()
            .await
            .map_err(|_| SessionError::ProviderClosed)?;
        Ok(self.user.borrow_and_update().clone())
    }

    /// Signs the current user out.
    ///
    /// # Errors
    ///
    /// Propagates provider failures.
    pub async fn sign_out(&self) -> SessionResult<()> {
        self.provider.sign_out().await?;
        Ok(())
    }

    /// Active accessibility theme.
    #[must_use]
    pub const fn theme(&self) -> A11yTheme {
        self.theme
    }

    /// Switches and saves the accessibility theme.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Preferences`] when saving fails; the active
    /// theme is still switched.
    pub async fn set_theme(&mut self, theme: A11yTheme) -> SessionResult<()> {
        self.theme = theme;
        self.preferences.save_theme(theme).await?;
        debug!(%theme, "theme saved");
        Ok(())
    }

    /// Ends the session and stops observing the provider.
    pub fn shutdown(self) {
        info!(signed_in = self.user.borrow().is_some(), "session ended");
    }
}
