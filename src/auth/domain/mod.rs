//! Domain model for accounts and credentials.

mod email;
mod error;
mod form;
mod user;

pub use email::EmailAddress;
pub use error::{AuthErrorCode, FormError};
pub use form::{MIN_PASSWORD_LEN, SignInForm, SignInRequest, SignUpForm, SignUpRequest};
pub use user::AuthUser;
