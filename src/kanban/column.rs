//! Fixed board columns and the status partition.

use crate::task::domain::{Task, TaskStatus};

/// One of the three fixed board columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
    status: TaskStatus,
    title: &'static str,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Self; 3] = [
        Self::for_status(TaskStatus::Todo),
        Self::for_status(TaskStatus::Doing),
        Self::for_status(TaskStatus::Done),
    ];

    /// Returns the column that holds tasks with `status`.
    #[must_use]
    pub const fn for_status(status: TaskStatus) -> Self {
        let title = match status {
            TaskStatus::Todo => "To do",
            TaskStatus::Doing => "Doing",
            TaskStatus::Done => "Done",
        };
        Self { status, title }
    }

    /// Resolves a drop-target identifier. Identifiers match exactly.
    #[must_use]
    pub fn from_drop_target(target: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.id() == target)
    }

    /// Drop-target identifier of the column.
    #[must_use]
    pub const fn id(self) -> &'static str {
        self.status.as_str()
    }

    /// Heading shown above the column.
    #[must_use]
    pub const fn title(self) -> &'static str {
        self.title
    }

    /// Status a card takes when dropped here.
    #[must_use]
    pub const fn status(self) -> TaskStatus {
        self.status
    }
}

/// Tasks partitioned by status, each bucket in board order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardColumns {
    todo: Vec<Task>,
    doing: Vec<Task>,
    done: Vec<Task>,
}

impl BoardColumns {
    /// Partitions `tasks` by status, preserving relative order.
    #[must_use]
    pub fn group(tasks: &[Task]) -> Self {
        let mut columns = Self::default();
        for task in tasks {
            columns.bucket_mut(task.status()).push(task.clone());
        }
        columns
    }

    /// Returns the tasks in one column.
    #[must_use]
    pub fn tasks(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::Doing => &self.doing,
            TaskStatus::Done => &self.done,
        }
    }

    /// Iterates columns in display order with their tasks.
    pub fn iter(&self) -> impl Iterator<Item = (Column, &[Task])> + '_ {
        Column::ALL
            .into_iter()
            .map(|column| (column, self.tasks(column.status())))
    }

    /// Total number of cards across all columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.todo.len() + self.doing.len() + self.done.len()
    }

    /// Returns `true` when the board has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    const fn bucket_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::Doing => &mut self.doing,
            TaskStatus::Done => &mut self.done,
        }
    }
}
