//! Dashboard list projection.

use super::{SubtaskProgress, TaskMetrics, is_overdue};
use crate::task::domain::{Priority, Task, TaskId, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// One row of the dashboard task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskCard {
    /// Task identifier.
    pub task_id: TaskId,
    /// Title.
    pub title: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Priority badge.
    pub priority: Priority,
    /// Current status.
    pub status: TaskStatus,
    /// Due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Whether the card is styled as done.
    pub is_completed: bool,
    /// Whether the card is styled as overdue.
    pub is_overdue: bool,
    /// Subtask progress bar.
    pub progress: SubtaskProgress,
}

impl TaskCard {
    /// Builds the card for one task.
    #[must_use]
    pub fn build(task: &Task, now: DateTime<Utc>) -> Self {
        Self {
            task_id: task.id(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            priority: task.priority(),
            status: task.status(),
            due_date: task.due_date(),
            is_completed: task.is_completed(),
            is_overdue: is_overdue(task, now),
            progress: SubtaskProgress::of(task.subtasks()),
        }
    }
}

/// Counters plus the task list, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Headline counters.
    pub metrics: TaskMetrics,
    /// Task rows.
    pub cards: Vec<TaskCard>,
}

impl DashboardSummary {
    /// Derives the dashboard from the current task list.
    #[must_use]
    pub fn build(tasks: &[Task], now: DateTime<Utc>) -> Self {
        Self {
            metrics: TaskMetrics::compute(tasks, now),
            cards: tasks.iter().map(|task| TaskCard::build(task, now)).collect(),
        }
    }

    /// Returns `true` when the user has no tasks at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
