//! Form-driven sign-in, registration and sign-out.

use crate::auth::{
    domain::{AuthUser, SignInForm, SignUpForm},
    ports::{AuthProvider, AuthResult},
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Validates account forms and forwards them to the identity provider.
pub struct AccountService<P>
where
    P: AuthProvider + ?Sized,
{
    provider: Arc<P>,
}

impl<P> Clone for AccountService<P>
where
    P: AuthProvider + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P> AccountService<P>
where
    P: AuthProvider + ?Sized,
{
    /// Creates a service over `provider`.
    #[must_use]
    pub const fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Returns the underlying provider.
    #[must_use]
    pub const fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// Validates the sign-in form, then signs in.
    ///
    /// # Errors
    ///
    /// Returns [`crate::auth::ports::AuthError::Form`] without calling the
    /// provider when validation fails, or the provider's rejection.
    pub async fn sign_in(&self, form: SignInForm) -> AuthResult<AuthUser> {
        let request = form.validate()?;
        debug!(email = %request.email(), "signing in");
        self.provider.sign_in(&request).await
    }

    /// Validates the registration form, then creates and signs in the
    /// account.
    ///
    /// # Errors
    ///
    /// Returns [`crate::auth::ports::AuthError::Form`] without calling the
    /// provider when validation fails, or the provider's rejection.
    pub async fn sign_up(&self, form: SignUpForm) -> AuthResult<AuthUser> {
        let request = form.validate()?;
        debug!(email = %request.email(), "registering");
        self.provider.sign_up(&request).await
    }

    /// Signs the current user out.
    ///
    /// # Errors
    ///
    /// Propagates provider failures.
    pub async fn sign_out(&self) -> AuthResult<()> {
        self.provider.sign_out().await
    }

    /// Observes the signed-in user.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.provider.subscribe()
    }
}
