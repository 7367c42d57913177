//! Account sign-in, registration and authentication state.
//!
//! Identity is delegated to an [`ports::AuthProvider`]. The domain holds the
//! form validation rules and the mapping from provider error codes to
//! messages; [`services::AccountService`] validates forms before anything
//! reaches the provider.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
