//! Validated email addresses.

use super::FormError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An email address with the shape `local@domain.tld`.
///
/// Accepted input has no whitespace, exactly one `@`, and a dot inside the
/// domain part with text on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validates raw form input. The input is not trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::EmailRequired`] for empty input and
    /// [`FormError::EmailInvalid`] for anything not shaped like an address.
    pub fn parse(value: &str) -> Result<Self, FormError> {
        if value.is_empty() {
            return Err(FormError::EmailRequired);
        }
        if !is_plausible_address(value) {
            return Err(FormError::EmailInvalid);
        }
        Ok(Self(value.to_owned()))
    }

    /// Returns the address as typed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased form used to look up accounts.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.0.to_lowercase()
    }
}

fn is_plausible_address(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}

impl TryFrom<String> for EmailAddress {
    type Error = FormError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
