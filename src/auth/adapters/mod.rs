//! Adapter implementations for authentication.

pub mod memory;
