//! Sign-in and registration forms.

use super::{EmailAddress, FormError};

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Raw contents of the sign-in form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    /// Email field.
    pub email: String,
    /// Password field.
    pub password: String,
}

impl SignInForm {
    /// Creates a form from field values.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks, in order: email present, email shaped like an address,
    /// password present.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] that applies.
    pub fn validate(self) -> Result<SignInRequest, FormError> {
        let email = EmailAddress::parse(&self.email)?;
        if self.password.is_empty() {
            return Err(FormError::PasswordRequired);
        }
        Ok(SignInRequest {
            email,
            password: self.password,
        })
    }
}

/// A sign-in form that passed validation.
#[derive(Clone, PartialEq, Eq)]
pub struct SignInRequest {
    email: EmailAddress,
    password: String,
}

impl SignInRequest {
    /// Email to sign in with.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password as typed.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Raw contents of the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    /// Display name field.
    pub name: String,
    /// Email field.
    pub email: String,
    /// Password field.
    pub password: String,
    /// Password confirmation field.
    pub confirm_password: String,
}

impl SignUpForm {
    /// Checks, in order: name present, email present, email shaped like an
    /// address, password present, password long enough, confirmation
    /// matches.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] that applies.
    pub fn validate(self) -> Result<SignUpRequest, FormError> {
        let display_name = self.name.trim();
        if display_name.is_empty() {
            return Err(FormError::NameRequired);
        }
        let email = EmailAddress::parse(&self.email)?;
        if self.password.is_empty() {
            return Err(FormError::PasswordRequired);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(SignUpRequest {
            display_name: display_name.to_owned(),
            email,
            password: self.password,
        })
    }
}

/// A registration form that passed validation.
#[derive(Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    display_name: String,
    email: EmailAddress,
    password: String,
}

impl SignUpRequest {
    /// Trimmed display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Email to register.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Chosen password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
