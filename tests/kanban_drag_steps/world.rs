//! Shared world state for kanban drag-and-drop BDD scenarios.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rstest::fixture;
use taskflow::{
    kanban::{DragOutcome, DropFailurePolicy, KanbanBoard, KanbanResult},
    task::{
        adapters::memory::InMemoryTaskStore,
        domain::{NewTask, Task, TaskId, TaskPatch, UserId},
        ports::{TaskStore, TaskStoreError, TaskStoreResult},
    },
};

/// In-memory store whose status updates can be switched to fail.
#[derive(Clone, Default)]
pub struct FlakyStore {
    inner: InMemoryTaskStore,
    reject_updates: Arc<AtomicBool>,
}

impl FlakyStore {
    /// Makes every later update fail as if the backend were unreachable.
    pub fn reject_updates(&self) {
        self.reject_updates.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl TaskStore for FlakyStore {
    async fn create(&self, user_id: &UserId, new_task: NewTask) -> TaskStoreResult<Task> {
        self.inner.create(user_id, new_task).await
    }

    async fn list_by_user(&self, user_id: &UserId) -> TaskStoreResult<Vec<Task>> {
        self.inner.list_by_user(user_id).await
    }

    async fn find_by_id(&self, user_id: &UserId, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.inner.find_by_id(user_id, id).await
    }

    async fn update(
        &self,
        user_id: &UserId,
        id: TaskId,
        patch: TaskPatch,
    ) -> TaskStoreResult<Task> {
        if self.reject_updates.load(Ordering::SeqCst) {
            return Err(TaskStoreError::unavailable(std::io::Error::other(
                "store offline",
            )));
        }
        self.inner.update(user_id, id, patch).await
    }

    async fn delete(&self, user_id: &UserId, id: TaskId) -> TaskStoreResult<()> {
        self.inner.delete(user_id, id).await
    }
}

/// Scenario world for kanban drag behaviour tests.
#[derive(Default)]
pub struct KanbanWorld {
    pub store: FlakyStore,
    pub user: Option<UserId>,
    pub policy: DropFailurePolicy,
    pub board: Option<KanbanBoard>,
    pub last_drop: Option<KanbanResult<DragOutcome>>,
}

impl KanbanWorld {
    /// Returns the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an error when no user step has run.
    pub fn user(&self) -> Result<&UserId, eyre::Report> {
        self.user
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing signed-in user in scenario world"))
    }

    /// Loads the board on first use so earlier steps can still configure it.
    ///
    /// # Errors
    ///
    /// Returns an error when no user is set or the store cannot be read.
    pub fn board_mut(&mut self) -> Result<&mut KanbanBoard, eyre::Report> {
        if self.board.is_none() {
            let user = self.user()?.clone();
            let board = run_async(KanbanBoard::load(&self.store, user, self.policy))?;
            self.board = Some(board);
        }
        self.board
            .as_mut()
            .ok_or_else(|| eyre::eyre!("board was not loaded"))
    }

    /// Finds a card on the board by title.
    ///
    /// # Errors
    ///
    /// Returns an error when the board is missing or has no such card.
    pub fn card(&self, title: &str) -> Result<&Task, eyre::Report> {
        self.board
            .as_ref()
            .ok_or_else(|| eyre::eyre!("board was not loaded"))?
            .tasks()
            .iter()
            .find(|task| task.title().as_str() == title)
            .ok_or_else(|| eyre::eyre!("no card titled {title:?} on the board"))
    }

    /// Finds a stored task by title.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be read or has no such task.
    pub fn stored_task(&self, title: &str) -> Result<Task, eyre::Report> {
        let user = self.user()?;
        run_async(self.store.list_by_user(user))?
            .into_iter()
            .find(|task| task.title().as_str() == title)
            .ok_or_else(|| eyre::eyre!("no stored task titled {title:?}"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> KanbanWorld {
    KanbanWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
