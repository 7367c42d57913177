//! Port contracts for task management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services and
//! the kanban board.

pub mod store;

pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
