//! `TaskFlow`: personal task management with a kanban board.
//!
//! Each user keeps a private list of tasks with subtasks, priorities and due
//! dates. Tasks move through three statuses (`todo`, `doing`, `done`), which
//! double as the columns of the kanban board.
//!
//! # Architecture
//!
//! `TaskFlow` follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task records, validation and the task store port
//! - [`kanban`]: Board columns and the drag-and-drop status flow
//! - [`views`]: Dashboard counters, progress bars and calendar events
//! - [`auth`]: Sign-in and registration against an identity provider
//! - [`session`]: Signed-in state and accessibility preferences
//! - [`config`]: TOML configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod auth;
pub mod config;
pub mod kanban;
pub mod session;
pub mod task;
pub mod telemetry;
pub mod views;
