//! Service layer for creating, editing and completing tasks.

use crate::task::{
    domain::{SubtaskId, Task, TaskDomainError, TaskDraft, TaskId, TaskPatch, UserId},
    ports::{TaskStore, TaskStoreError},
};
use crate::views::DashboardSummary;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> TaskLifecycleService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Validates a create-form draft and stores it as a new `todo` task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when validation fails (nothing
    /// is sent to the store) or [`TaskLifecycleError::Store`] when the store
    /// rejects the write.
    pub async fn create(&self, user_id: &UserId, draft: TaskDraft) -> TaskLifecycleResult<Task> {
        let new_task = draft.into_new_task()?;
        let task = self
            .store
            .create(user_id, new_task)
            .await
            .inspect_err(|err| warn!(user = %user_id, error = %err, "task creation failed"))?;
        debug!(task = %task.id(), user = %user_id, "task created");
        Ok(task)
    }

    /// Lists the user's tasks in arrival order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the store lookup fails.
    pub async fn list(&self, user_id: &UserId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.store.list_by_user(user_id).await?)
    }

    /// Fetches one task.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the task belongs to another
    /// user or the lookup fails.
    pub async fn get(&self, user_id: &UserId, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.store.find_by_id(user_id, id).await?)
    }

    /// Applies an edit-form draft. Existing subtask identifiers are kept and
    /// the status is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when validation fails or
    /// [`TaskLifecycleError::Store`] when the update is rejected.
    pub async fn update(
        &self,
        user_id: &UserId,
        id: TaskId,
        draft: TaskDraft,
    ) -> TaskLifecycleResult<Task> {
        let patch = draft.into_patch()?;
        self.apply_patch(user_id, id, patch).await
    }

    /// Flips a task between `done` and `todo`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the task is missing, owned
    /// by someone else, or the update fails.
    pub async fn toggle_complete(
        &self,
        user_id: &UserId,
        id: TaskId,
    ) -> TaskLifecycleResult<Task> {
        let task = self.require(user_id, id).await?;
        let next = task.status().toggled_completion();
        self.apply_patch(user_id, id, TaskPatch::status(next)).await
    }

    /// Flips one subtask's completion flag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the subtask is not on the
    /// task, or [`TaskLifecycleError::Store`] when the store operation fails.
    pub async fn toggle_subtask(
        &self,
        user_id: &UserId,
        id: TaskId,
        subtask_id: SubtaskId,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.require(user_id, id).await?;
        task.toggle_subtask(subtask_id)?;
        let patch = TaskPatch {
            subtasks: Some(task.subtasks().clone()),
            ..TaskPatch::default()
        };
        self.apply_patch(user_id, id, patch).await
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the task is missing, owned
    /// by someone else, or the delete fails.
    pub async fn delete(&self, user_id: &UserId, id: TaskId) -> TaskLifecycleResult<()> {
        self.store
            .delete(user_id, id)
            .await
            .inspect_err(|err| warn!(task = %id, error = %err, "task deletion failed"))?;
        debug!(task = %id, "task deleted");
        Ok(())
    }

    /// Loads the user's tasks and derives the dashboard at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the store lookup fails.
    pub async fn dashboard(&self, user_id: &UserId) -> TaskLifecycleResult<DashboardSummary> {
        let tasks = self.list(user_id).await?;
        Ok(DashboardSummary::build(&tasks, self.clock.utc()))
    }

    async fn require(&self, user_id: &UserId, id: TaskId) -> TaskLifecycleResult<Task> {
        self.store
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| TaskStoreError::NotFound(id).into())
    }

    async fn apply_patch(
        &self,
        user_id: &UserId,
        id: TaskId,
        patch: TaskPatch,
    ) -> TaskLifecycleResult<Task> {
        let task = self
            .store
            .update(user_id, id, patch)
            .await
            .inspect_err(|err| warn!(task = %id, error = %err, "task update failed"))?;
        debug!(task = %id, status = %task.status(), "task updated");
        Ok(task)
    }
}
