//! Signed-in user identity.

use super::EmailAddress;
use crate::task::domain::UserId;
use serde::{Deserialize, Serialize};

/// The account currently signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    user_id: UserId,
    email: EmailAddress,
    display_name: Option<String>,
}

impl AuthUser {
    /// Creates a user; a blank display name is stored as absent.
    #[must_use]
    pub fn new(user_id: UserId, email: EmailAddress, display_name: Option<String>) -> Self {
        Self {
            user_id,
            email,
            display_name: display_name
                .map(|name| name.trim().to_owned())
                .filter(|name| !name.is_empty()),
        }
    }

    /// Identifier that scopes every task store call.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Sign-in email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Display name, if set.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Name shown in the header: the display name, else the email.
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        self.display_name().unwrap_or_else(|| self.email.as_str())
    }
}
