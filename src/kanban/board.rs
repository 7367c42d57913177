//! Kanban board state and the drag-and-drop transition flow.

use super::{BoardColumns, Column};
use crate::task::{
    domain::{Task, TaskId, TaskPatch, TaskStatus, UserId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

/// What to do with an optimistic move the store refused to persist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropFailurePolicy {
    /// Put the card back in its previous column and report the error.
    #[default]
    Rollback,
    /// Leave the card where it was dropped and only log the failure.
    KeepOptimistic,
}

/// Errors surfaced by the board.
#[derive(Debug, Error)]
pub enum KanbanError {
    /// The store rejected a status change and the move was rolled back.
    #[error("status update for task {task_id} was rolled back: {source}")]
    RolledBack {
        /// Task whose move was undone.
        task_id: TaskId,
        /// Store failure.
        #[source]
        source: TaskStoreError,
    },
    /// Loading the board failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Result type for board operations.
pub type KanbanResult<T> = Result<T, KanbanError>;

/// Why a drop left the board untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoredDrop {
    /// The card was released outside every column.
    NoTarget,
    /// The drop target is not a column identifier.
    UnknownTarget(String),
    /// The dragged card is not on this board.
    UnknownTask(TaskId),
    /// The card was dropped on the column it already occupies.
    SameColumn(TaskStatus),
}

/// Result of ending a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a moved card must be persisted and settled"]
pub enum DragOutcome {
    /// Nothing changed and nothing needs persisting.
    Ignored(IgnoredDrop),
    /// The card moved locally; the update still has to reach the store.
    Moved(PendingStatusUpdate),
}

/// A status change applied to the board but not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingStatusUpdate {
    user_id: UserId,
    task_id: TaskId,
    from: TaskStatus,
    to: TaskStatus,
    sequence: u64,
}

impl PendingStatusUpdate {
    /// Task being moved.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Status before the drop.
    #[must_use]
    pub const fn from(&self) -> TaskStatus {
        self.from
    }

    /// Status after the drop.
    #[must_use]
    pub const fn to(&self) -> TaskStatus {
        self.to
    }

    /// Sends the partial status update to the store.
    ///
    /// Does not borrow the board, so several updates may run concurrently.
    pub async fn persist<S>(self, store: &S) -> SettledStatusUpdate
    where
        S: TaskStore + ?Sized,
    {
        let result = store
            .update(&self.user_id, self.task_id, TaskPatch::status(self.to))
            .await
            .map(|_| ());
        SettledStatusUpdate {
            update: self,
            result,
        }
    }
}

/// A persisted (or failed) status change, ready to be settled on the board.
#[derive(Debug, Clone)]
pub struct SettledStatusUpdate {
    update: PendingStatusUpdate,
    result: TaskStoreResult<()>,
}

impl SettledStatusUpdate {
    /// Builds a settled update from a pending one and a store result.
    #[must_use]
    pub const fn new(update: PendingStatusUpdate, result: TaskStoreResult<()>) -> Self {
        Self { update, result }
    }

    /// The update this result belongs to.
    #[must_use]
    pub const fn update(&self) -> &PendingStatusUpdate {
        &self.update
    }

    /// Returns `true` when the store accepted the change.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Moves of one card that the store has not answered yet.
#[derive(Debug, Clone, Copy)]
struct InFlight {
    /// Status shown on the board by the latest move.
    shown: TaskStatus,
    /// Last status the store is known to hold.
    confirmed: TaskStatus,
    /// Sequence of the move that set `confirmed`.
    confirmed_sequence: Option<u64>,
    pending: usize,
}

/// One user's board.
#[derive(Debug)]
pub struct KanbanBoard {
    user_id: UserId,
    tasks: Vec<Task>,
    active_drag: Option<TaskId>,
    in_flight: HashMap<TaskId, InFlight>,
    next_sequence: u64,
    policy: DropFailurePolicy,
    snapshots: watch::Sender<Vec<Task>>,
}

impl KanbanBoard {
    /// Creates a board over tasks already fetched for `user_id`.
    ///
    /// Tasks owned by other users are dropped.
    #[must_use]
    pub fn new(user_id: UserId, tasks: Vec<Task>, policy: DropFailurePolicy) -> Self {
        let owned: Vec<Task> = tasks
            .into_iter()
            .filter(|task| task.is_owned_by(&user_id))
            .collect();
        let (snapshots, _) = watch::channel(owned.clone());
        Self {
            user_id,
            tasks: owned,
            active_drag: None,
            in_flight: HashMap::new(),
            next_sequence: 0,
            policy,
            snapshots,
        }
    }

    /// Fetches the user's tasks and builds a board.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Store`] when the task list cannot be loaded.
    pub async fn load<S>(
        store: &S,
        user_id: UserId,
        policy: DropFailurePolicy,
    ) -> KanbanResult<Self>
    where
        S: TaskStore + ?Sized,
    {
        let tasks = store.list_by_user(&user_id).await?;
        Ok(Self::new(user_id, tasks, policy))
    }

    /// Owner of the board.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Tasks in arrival order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a card by task identifier.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Partitions the board into its three columns.
    #[must_use]
    pub fn columns(&self) -> BoardColumns {
        BoardColumns::group(&self.tasks)
    }

    /// Failure policy in effect.
    #[must_use]
    pub const fn policy(&self) -> DropFailurePolicy {
        self.policy
    }

    /// Card currently being dragged, if any.
    #[must_use]
    pub const fn active_drag(&self) -> Option<TaskId> {
        self.active_drag
    }

    /// Number of moves issued to the store and not yet settled.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.values().map(|entry| entry.pending).sum()
    }

    /// Receives a fresh task list every time the board changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.snapshots.subscribe()
    }

    /// Marks a card as picked up. Task data is not touched.
    pub const fn begin_drag(&mut self, task_id: TaskId) {
        self.active_drag = Some(task_id);
    }

    /// Releases the dragged card over `drop_target`.
    ///
    /// When the drop changes the card's column the new status is applied and
    /// published immediately; the returned [`PendingStatusUpdate`] must then
    /// be persisted and handed back to [`KanbanBoard::settle`].
    pub fn end_drag(&mut self, task_id: TaskId, drop_target: Option<&str>) -> DragOutcome {
        self.active_drag = None;

        let Some(target) = drop_target else {
            return DragOutcome::Ignored(IgnoredDrop::NoTarget);
        };
        let Some(column) = Column::from_drop_target(target) else {
            return DragOutcome::Ignored(IgnoredDrop::UnknownTarget(target.to_owned()));
        };
        let Some(task) = self.tasks.iter_mut().find(|task| task.id() == task_id) else {
            return DragOutcome::Ignored(IgnoredDrop::UnknownTask(task_id));
        };
        if task.status() == column.status() {
            return DragOutcome::Ignored(IgnoredDrop::SameColumn(column.status()));
        }

        let from = task.set_status(column.status());
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        let entry = self.in_flight.entry(task_id).or_insert(InFlight {
            shown: from,
            confirmed: from,
            confirmed_sequence: None,
            pending: 0,
        });
        entry.shown = column.status();
        entry.pending += 1;
        self.publish();
        debug!(task = %task_id, %from, to = %column.status(), "card moved");

        DragOutcome::Moved(PendingStatusUpdate {
            user_id: self.user_id.clone(),
            task_id,
            from,
            to: column.status(),
            sequence,
        })
    }

    /// Applies the store's answer for an earlier move.
    ///
    /// # Errors
    ///
    /// Under [`DropFailurePolicy::Rollback`], returns
    /// [`KanbanError::RolledBack`] when the store refused the update. Once the
    /// card's last in-flight move has settled, the card returns to the last
    /// status the store confirmed. While later moves of the same card are
    /// still in flight the card stays where it is.
    pub fn settle(&mut self, settled: SettledStatusUpdate) -> KanbanResult<()> {
        let SettledStatusUpdate { update, result } = settled;
        let restore = self.release(&update, result.is_ok());

        let Err(source) = result else {
            return Ok(());
        };

        match self.policy {
            DropFailurePolicy::KeepOptimistic => {
                warn!(
                    task = %update.task_id,
                    error = %source,
                    "status update failed; keeping card in place"
                );
                Ok(())
            }
            DropFailurePolicy::Rollback => {
                let reverted = restore.is_some_and(|confirmed| {
                    self.tasks
                        .iter_mut()
                        .find(|task| task.id() == update.task_id && task.status() != confirmed)
                        .map(|task| task.set_status(confirmed))
                        .is_some()
                });
                if reverted {
                    self.publish();
                }
                warn!(task = %update.task_id, error = %source, reverted, "status update failed");
                Err(KanbanError::RolledBack {
                    task_id: update.task_id,
                    source,
                })
            }
        }
    }

    /// Ends a drag and, when the card moved, persists and settles the move.
    ///
    /// Returns the outcome of the drop; the pending update inside a
    /// [`DragOutcome::Moved`] has already been settled.
    ///
    /// # Errors
    ///
    /// Propagates [`KanbanBoard::settle`] errors.
    pub async fn drop_card<S>(
        &mut self,
        store: &S,
        task_id: TaskId,
        drop_target: Option<&str>,
    ) -> KanbanResult<DragOutcome>
    where
        S: TaskStore + ?Sized,
    {
        match self.end_drag(task_id, drop_target) {
            DragOutcome::Moved(pending) => {
                let settled = pending.clone().persist(store).await;
                self.settle(settled)?;
                Ok(DragOutcome::Moved(pending))
            }
            ignored @ DragOutcome::Ignored(_) => Ok(ignored),
        }
    }

    /// Replaces the board contents with a fresh fetch.
    ///
    /// Moves still in flight are reapplied so a fetch that raced with a drop
    /// does not snap the card back.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        let user_id = &self.user_id;
        let in_flight = &self.in_flight;
        self.tasks = tasks
            .into_iter()
            .filter(|task| task.is_owned_by(user_id))
            .map(|mut task| {
                if let Some(entry) = in_flight.get(&task.id()) {
                    task.set_status(entry.shown);
                }
                task
            })
            .collect();
        if self
            .active_drag
            .is_some_and(|id| !self.tasks.iter().any(|task| task.id() == id))
        {
            self.active_drag = None;
        }
        self.publish();
    }

    /// Re-fetches the board from the store.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Store`] when the fetch fails; the board is left
    /// unchanged.
    pub async fn reload<S>(&mut self, store: &S) -> KanbanResult<()>
    where
        S: TaskStore + ?Sized,
    {
        let tasks = store.list_by_user(&self.user_id).await?;
        self.replace_tasks(tasks);
        Ok(())
    }

    /// Records one settled move of a card.
    ///
    /// Returns the store-confirmed status once no move of the card remains
    /// in flight.
    fn release(&mut self, update: &PendingStatusUpdate, succeeded: bool) -> Option<TaskStatus> {
        let entry = self.in_flight.get_mut(&update.task_id)?;
        if succeeded
            && entry
                .confirmed_sequence
                .is_none_or(|seen| seen < update.sequence)
        {
            entry.confirmed = update.to;
            entry.confirmed_sequence = Some(update.sequence);
        }
        entry.pending = entry.pending.saturating_sub(1);
        if entry.pending > 0 {
            return None;
        }
        let confirmed = entry.confirmed;
        self.in_flight.remove(&update.task_id);
        Some(confirmed)
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.tasks.clone());
    }
}
