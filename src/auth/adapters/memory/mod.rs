//! In-memory identity provider for tests and offline use.

mod provider;

pub use provider::InMemoryAuthProvider;
