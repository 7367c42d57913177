//! Domain model for personal task management.
//!
//! Tasks are owned by exactly one user and carry an authoritative
//! [`TaskStatus`]; completion is derived from it. Infrastructure concerns stay
//! outside of the domain boundary.

mod draft;
mod error;
mod ids;
mod status;
mod subtask;
mod task;

pub use draft::{SubtaskDraft, TaskDraft, parse_due_date};
pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{SubtaskId, TaskId, UserId};
pub use status::{Priority, TaskStatus};
pub use subtask::{Subtask, SubtaskList};
pub use task::{NewTask, PersistedTaskData, Task, TaskPatch, TaskTitle};
