//! Dashboard counters.

use crate::task::domain::Task;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Headline counters shown above the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskMetrics {
    /// Tasks not yet done.
    pub pending: usize,
    /// Done tasks created within the last seven days.
    pub completed_this_week: usize,
    /// Unfinished tasks whose due date has passed.
    pub overdue: usize,
}

impl TaskMetrics {
    /// Computes all counters in one pass.
    #[must_use]
    pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> Self {
        tasks.iter().fold(Self::default(), |mut metrics, task| {
            if !task.is_completed() {
                metrics.pending += 1;
            }
            if is_completed_this_week(task, now) {
                metrics.completed_this_week += 1;
            }
            if is_overdue(task, now) {
                metrics.overdue += 1;
            }
            metrics
        })
    }
}

/// A task is overdue when it is not done and its due date lies before
/// `now`'s calendar day. A task due today is not overdue yet.
#[must_use]
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    !task.is_completed()
        && task
            .due_date()
            .is_some_and(|due_date| due_date < now.date_naive())
}

/// The weekly counter uses the creation timestamp; there is no separate
/// completion timestamp.
#[must_use]
pub fn is_completed_this_week(task: &Task, now: DateTime<Utc>) -> bool {
    task.is_completed() && task.created_at() >= now - Duration::days(7)
}
