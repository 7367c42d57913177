//! Application services for task management.

mod lifecycle;

pub use lifecycle::{TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService};
