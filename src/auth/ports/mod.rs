//! Port contracts for authentication.

mod provider;

pub use provider::{AuthError, AuthProvider, AuthResult};
