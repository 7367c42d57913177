//! Unit tests for the auth context.
