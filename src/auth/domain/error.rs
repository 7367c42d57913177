//! Form validation errors and provider error codes.

use super::MIN_PASSWORD_LEN;
use std::fmt;
use thiserror::Error;

/// A sign-in or registration form failed validation.
///
/// Only the first failing rule is reported.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FormError {
    /// The display name is blank.
    #[error("name is required")]
    NameRequired,
    /// The email field is empty.
    #[error("email is required")]
    EmailRequired,
    /// The email is not shaped like an address.
    #[error("email is invalid")]
    EmailInvalid,
    /// The password field is empty.
    #[error("password is required")]
    PasswordRequired,
    /// The password is shorter than the minimum length.
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
    /// The confirmation does not match the password.
    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Failure codes reported by an authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AuthErrorCode {
    /// Email and password do not match an account.
    InvalidCredential,
    /// The password is wrong for an existing account.
    WrongPassword,
    /// No account exists for the email.
    UserNotFound,
    /// The provider rejected the email format.
    InvalidEmail,
    /// Too many failed attempts; the account is temporarily locked.
    TooManyRequests,
    /// Registration with an email that already has an account.
    EmailAlreadyInUse,
    /// The provider rejected the password as too weak.
    WeakPassword,
    /// Email/password accounts are disabled.
    OperationNotAllowed,
    /// Any other code, kept verbatim.
    Unknown(String),
}

impl AuthErrorCode {
    /// Maps a provider string code such as `auth/wrong-password`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "auth/invalid-credential" => Self::InvalidCredential,
            "auth/wrong-password" => Self::WrongPassword,
            "auth/user-not-found" => Self::UserNotFound,
            "auth/invalid-email" => Self::InvalidEmail,
            "auth/too-many-requests" => Self::TooManyRequests,
            "auth/email-already-in-use" => Self::EmailAlreadyInUse,
            "auth/weak-password" => Self::WeakPassword,
            "auth/operation-not-allowed" => Self::OperationNotAllowed,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Returns the provider string code.
    #[must_use]
    pub fn as_code(&self) -> &str {
        match self {
            Self::InvalidCredential => "auth/invalid-credential",
            Self::WrongPassword => "auth/wrong-password",
            Self::UserNotFound => "auth/user-not-found",
            Self::InvalidEmail => "auth/invalid-email",
            Self::TooManyRequests => "auth/too-many-requests",
            Self::EmailAlreadyInUse => "auth/email-already-in-use",
            Self::WeakPassword => "auth/weak-password",
            Self::OperationNotAllowed => "auth/operation-not-allowed",
            Self::Unknown(code) => code,
        }
    }

    /// Message shown to the user.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::InvalidCredential | Self::WrongPassword => "Incorrect email or password.",
            Self::UserNotFound => "No account found for this email.",
            Self::InvalidEmail => "Invalid email format.",
            Self::TooManyRequests => "Too many attempts. Try again later.",
            Self::EmailAlreadyInUse => "This email is already in use. Try signing in.",
            Self::WeakPassword => "The password must be at least 6 characters.",
            Self::OperationNotAllowed => "Registration is disabled. Contact support.",
            Self::Unknown(_) => "Something went wrong. Check your connection and try again.",
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}
