//! In-memory task store for tests and offline use.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{NewTask, Task, TaskId, TaskPatch, UserId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Listing preserves insertion order, matching the arrival order the kanban
/// board displays.
pub struct InMemoryTaskStore<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryTaskState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    order: Vec<TaskId>,
}

impl InMemoryTaskStore {
    /// Creates an empty store stamping tasks with the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store using the given clock for creation timestamps.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            clock,
        }
    }

    /// Returns how many tasks are stored across all users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().map_or(0, |state| state.order.len())
    }

    /// Returns `true` when no tasks are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> TaskStoreResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskStoreResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

/// Looks up a task the caller owns, distinguishing missing from foreign.
fn owned_task_mut<'a>(
    state: &'a mut InMemoryTaskState,
    user_id: &UserId,
    id: TaskId,
) -> TaskStoreResult<&'a mut Task> {
    let task = state
        .tasks
        .get_mut(&id)
        .ok_or(TaskStoreError::NotFound(id))?;
    if !task.is_owned_by(user_id) {
        return Err(TaskStoreError::PermissionDenied { task_id: id });
    }
    Ok(task)
}

#[async_trait]
impl<C> TaskStore for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn create(&self, user_id: &UserId, new_task: NewTask) -> TaskStoreResult<Task> {
        let task = Task::create(user_id.clone(), new_task, &*self.clock);
        let mut state = self.write()?;
        state.order.push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(task)
    }

    async fn list_by_user(&self, user_id: &UserId) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        let tasks = state
            .order
            .iter()
            .filter_map(|id| state.tasks.get(id))
            .filter(|task| task.is_owned_by(user_id))
            .cloned()
            .collect();
        Ok(tasks)
    }

    async fn find_by_id(&self, user_id: &UserId, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.read()?;
        match state.tasks.get(&id) {
            Some(task) if !task.is_owned_by(user_id) => {
                Err(TaskStoreError::PermissionDenied { task_id: id })
            }
            found => Ok(found.cloned()),
        }
    }

    async fn update(
        &self,
        user_id: &UserId,
        id: TaskId,
        patch: TaskPatch,
    ) -> TaskStoreResult<Task> {
        let mut state = self.write()?;
        let task = owned_task_mut(&mut state, user_id, id)?;
        task.apply(patch);
        Ok(task.clone())
    }

    async fn delete(&self, user_id: &UserId, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        owned_task_mut(&mut state, user_id, id)?;
        state.tasks.remove(&id);
        state.order.retain(|stored| *stored != id);
        Ok(())
    }
}
