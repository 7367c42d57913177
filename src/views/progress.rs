//! Subtask progress bars.

use crate::task::domain::SubtaskList;
use serde::Serialize;

/// Completed-versus-total subtask counts for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubtaskProgress {
    completed: usize,
    total: usize,
}

impl SubtaskProgress {
    /// Counts completed subtasks.
    #[must_use]
    pub fn of(subtasks: &SubtaskList) -> Self {
        Self {
            completed: subtasks.completed_count(),
            total: subtasks.len(),
        }
    }

    /// Number of completed subtasks.
    #[must_use]
    pub const fn completed(self) -> usize {
        self.completed
    }

    /// Number of subtasks.
    #[must_use]
    pub const fn total(self) -> usize {
        self.total
    }

    /// A progress bar is only shown for tasks that have subtasks.
    #[must_use]
    pub const fn has_bar(self) -> bool {
        self.total > 0
    }

    /// Percentage complete, rounded half up. Zero when there are no subtasks.
    #[must_use]
    pub fn percent(self) -> u8 {
        // round(100 * c / t) == floor((200 * c + t) / (2 * t))
        let numerator = self.completed.saturating_mul(200).saturating_add(self.total);
        let rounded = numerator
            .checked_div(self.total.saturating_mul(2))
            .unwrap_or(0);
        u8::try_from(rounded.min(100)).unwrap_or(100)
    }
}
