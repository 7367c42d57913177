//! Error types for task domain validation and parsing.

use super::{SubtaskId, TaskId};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// A subtask title is empty after trimming.
    #[error("subtask title must not be empty")]
    EmptySubtaskTitle,

    /// A due date string is not a calendar date in `YYYY-MM-DD` form.
    #[error("invalid due date '{0}', expected YYYY-MM-DD")]
    InvalidDueDate(String),

    /// The user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// A subtask identifier appears twice within one task.
    #[error("duplicate subtask identifier {0}")]
    DuplicateSubtask(SubtaskId),

    /// The referenced subtask does not belong to the task.
    #[error("subtask {subtask_id} not found on task {task_id}")]
    SubtaskNotFound {
        /// Parent task identifier.
        task_id: TaskId,
        /// Missing subtask identifier.
        subtask_id: SubtaskId,
    },
}

/// Error returned while parsing task statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
