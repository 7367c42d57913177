//! Authentication provider port.

use crate::auth::domain::{AuthErrorCode, AuthUser, FormError, SignInRequest, SignUpRequest};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Identity provider contract.
///
/// The provider owns the signed-in state. Successful sign-in and sign-up
/// both leave the new user signed in and notify subscribers.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] with the provider's code when the
    /// credentials are refused.
    async fn sign_in(&self, request: &SignInRequest) -> AuthResult<AuthUser>;

    /// Creates an account, sets its display name and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] with the provider's code when the
    /// account cannot be created.
    async fn sign_up(&self, request: &SignUpRequest) -> AuthResult<AuthUser>;

    /// Signs the current user out. Signing out while signed out succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Backend`] when the provider cannot be reached.
    async fn sign_out(&self) -> AuthResult<()>;

    /// Observes the signed-in user. The receiver starts with the current
    /// value and sees every later change.
    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>>;
}

/// Errors returned by authentication operations.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Form input failed validation; the provider was not called.
    #[error(transparent)]
    Form(#[from] FormError),

    /// The provider refused the request.
    #[error("{}", .0.message())]
    Rejected(AuthErrorCode),

    /// The provider failed for reasons unrelated to the request.
    #[error("authentication backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuthError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }

    /// Builds a rejection from a provider string code.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        Self::Rejected(AuthErrorCode::from_code(code))
    }

    /// Provider code, when the provider refused the request.
    #[must_use]
    pub const fn code(&self) -> Option<&AuthErrorCode> {
        match self {
            Self::Rejected(code) => Some(code),
            Self::Form(_) | Self::Backend(_) => None,
        }
    }
}
