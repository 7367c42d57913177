//! In-memory integration tests.
//!
//! Tests are organized into modules by functionality:
//! - `task_lifecycle_tests`: Task creation, editing and per-user isolation
//! - `kanban_flow_tests`: Board loading, concurrent moves and snapshots
//! - `session_flow_tests`: Sign-up through to the dashboard and calendar

mod in_memory {
    pub mod helpers;

    mod kanban_flow_tests;
    mod session_flow_tests;
    mod task_lifecycle_tests;
}
