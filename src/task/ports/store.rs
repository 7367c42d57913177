//! Store port for durable per-user task records.

use crate::task::domain::{NewTask, Task, TaskId, TaskPatch, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// Every operation is scoped to the calling user. Touching a task owned by
/// someone else yields [`TaskStoreError::PermissionDenied`].
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task for `user_id`, assigning its identifier and creation
    /// timestamp. New tasks always start in the `todo` status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Unavailable`] or
    /// [`TaskStoreError::Persistence`] when the record cannot be written.
    async fn create(&self, user_id: &UserId, new_task: NewTask) -> TaskStoreResult<Task>;

    /// Returns every task owned by `user_id` in arrival order.
    async fn list_by_user(&self, user_id: &UserId) -> TaskStoreResult<Vec<Task>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::PermissionDenied`] when the task belongs to
    /// another user.
    async fn find_by_id(&self, user_id: &UserId, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Applies a partial update and returns the stored result.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist or
    /// [`TaskStoreError::PermissionDenied`] when it belongs to another user.
    async fn update(
        &self,
        user_id: &UserId,
        id: TaskId,
        patch: TaskPatch,
    ) -> TaskStoreResult<Task>;

    /// Deletes a task permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist or
    /// [`TaskStoreError::PermissionDenied`] when it belongs to another user.
    async fn delete(&self, user_id: &UserId, id: TaskId) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task exists but belongs to a different user.
    #[error("permission denied for task {task_id}")]
    PermissionDenied {
        /// Task the caller tried to access.
        task_id: TaskId,
    },

    /// The backing service could not be reached.
    #[error("task store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure of any other kind.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a connectivity error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` for failures a retry might fix.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
