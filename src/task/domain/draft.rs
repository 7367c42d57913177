//! Raw form input for the create and edit task screens.
//!
//! Drafts hold unvalidated text exactly as typed. Converting a draft runs the
//! input-boundary rules: the title is required, blank subtask rows are
//! dropped, and existing subtask identifiers survive an edit.

use super::{
    NewTask, Priority, Subtask, SubtaskId, SubtaskList, TaskDomainError, TaskPatch, TaskTitle,
};
use chrono::NaiveDate;

/// One subtask row of a task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtaskDraft {
    id: Option<SubtaskId>,
    title: String,
    completed: bool,
}

impl SubtaskDraft {
    /// A new, unsaved row.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            completed: false,
        }
    }

    /// A row loaded from an existing subtask.
    #[must_use]
    pub fn existing(subtask: &Subtask) -> Self {
        Self {
            id: Some(subtask.id()),
            title: subtask.title().to_owned(),
            completed: subtask.is_completed(),
        }
    }

    /// Sets the completion checkbox.
    #[must_use]
    pub const fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Unvalidated task form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    due_date: Option<NaiveDate>,
    priority: Priority,
    subtasks: Vec<SubtaskDraft>,
}

impl TaskDraft {
    /// Creates a draft with the given title and form defaults.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Sets the due date from a date input value; an empty value clears it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDueDate`] when the value is not a
    /// `YYYY-MM-DD` date.
    pub fn with_due_date_input(mut self, value: &str) -> Result<Self, TaskDomainError> {
        self.due_date = parse_due_date(value)?;
        Ok(self)
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Appends a subtask row.
    #[must_use]
    pub fn with_subtask(mut self, subtask: SubtaskDraft) -> Self {
        self.subtasks.push(subtask);
        self
    }

    /// Validates the draft for the create screen.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn into_new_task(self) -> Result<NewTask, TaskDomainError> {
        let title = TaskTitle::new(self.title)?;
        let subtasks = build_subtasks(self.subtasks)?;
        let mut new_task = NewTask::new(title)
            .with_priority(self.priority)
            .with_subtasks(subtasks);
        if !self.description.trim().is_empty() {
            new_task = new_task.with_description(self.description);
        }
        if let Some(due_date) = self.due_date {
            new_task = new_task.with_due_date(due_date);
        }
        Ok(new_task)
    }

    /// Validates the draft for the edit screen. The status is left alone.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank, or
    /// [`TaskDomainError::DuplicateSubtask`] if two rows share an identifier.
    pub fn into_patch(self) -> Result<TaskPatch, TaskDomainError> {
        let title = TaskTitle::new(self.title)?;
        let subtasks = build_subtasks(self.subtasks)?;
        Ok(TaskPatch {
            title: Some(title),
            description: Some(Some(self.description)),
            due_date: Some(self.due_date),
            priority: Some(self.priority),
            status: None,
            subtasks: Some(subtasks),
        })
    }
}

/// Parses a date input value. Blank input means "no due date".
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidDueDate`] for anything that is not a
/// `YYYY-MM-DD` calendar date.
pub fn parse_due_date(value: &str) -> Result<Option<NaiveDate>, TaskDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| TaskDomainError::InvalidDueDate(value.to_owned()))
}

fn build_subtasks(rows: Vec<SubtaskDraft>) -> Result<SubtaskList, TaskDomainError> {
    let mut subtasks = SubtaskList::new();
    for row in rows.into_iter().filter(|row| !row.title.trim().is_empty()) {
        let id = row.id.unwrap_or_default();
        subtasks.push(Subtask::with_id(id, row.title, row.completed)?)?;
    }
    Ok(subtasks)
}
