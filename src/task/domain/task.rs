//! Task aggregate root and its creation and update payloads.

use super::{Priority, SubtaskId, SubtaskList, TaskDomainError, TaskId, TaskStatus, UserId};
use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty, trimmed task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fields supplied by the user when creating a task.
///
/// The store assigns the identifier and creation timestamp, and every new
/// task starts in [`TaskStatus::Todo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: TaskTitle,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Priority.
    pub priority: Priority,
    /// Initial subtasks.
    pub subtasks: SubtaskList,
}

impl NewTask {
    /// Creates a medium-priority task with only a title.
    #[must_use]
    pub fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
            due_date: None,
            priority: Priority::default(),
            subtasks: SubtaskList::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the subtasks.
    #[must_use]
    pub fn with_subtasks(mut self, subtasks: SubtaskList) -> Self {
        self.subtasks = subtasks;
        self
    }
}

/// Partial update of a task. `None` leaves the field untouched.
///
/// The nested options on `description` and `due_date` distinguish "leave as
/// is" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement or cleared description.
    pub description: Option<Option<String>>,
    /// Replacement or cleared due date.
    pub due_date: Option<Option<NaiveDate>>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Replacement subtask list.
    pub subtasks: Option<SubtaskList>,
}

impl TaskPatch {
    /// A patch that only changes the status.
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.subtasks.is_none()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    user_id: UserId,
    title: TaskTitle,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    priority: Priority,
    status: TaskStatus,
    subtasks: SubtaskList,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning user.
    pub user_id: UserId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted subtasks.
    pub subtasks: SubtaskList,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Materialises a newly created task for `user_id`.
    ///
    /// Called by store adapters, which own identifier assignment. The
    /// creation time is kept at microsecond precision, the finest a
    /// `timestamptz` column stores.
    #[must_use]
    pub fn create(user_id: UserId, new_task: NewTask, clock: &impl Clock) -> Self {
        let NewTask {
            title,
            description,
            due_date,
            priority,
            subtasks,
        } = new_task;

        Self {
            id: TaskId::new(),
            user_id,
            title,
            description: normalize_description(description),
            due_date,
            priority,
            status: TaskStatus::Todo,
            subtasks,
            created_at: clock.utc().trunc_subsecs(6),
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            priority: data.priority,
            status: data.status,
            subtasks: data.subtasks,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns `true` when `user_id` owns this task.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Completion is derived from the status and never stored separately.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.status.is_done()
    }

    /// Returns the subtasks in display order.
    #[must_use]
    pub const fn subtasks(&self) -> &SubtaskList {
        &self.subtasks
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the status, returning the previous value.
    pub const fn set_status(&mut self, status: TaskStatus) -> TaskStatus {
        let previous = self.status;
        self.status = status;
        previous
    }

    /// Flips one subtask's completion flag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SubtaskNotFound`] if the subtask is not
    /// part of this task.
    pub fn toggle_subtask(&mut self, subtask_id: SubtaskId) -> Result<(), TaskDomainError> {
        let task_id = self.id;
        let subtask = self
            .subtasks
            .get_mut(subtask_id)
            .ok_or(TaskDomainError::SubtaskNotFound {
                task_id,
                subtask_id,
            })?;
        subtask.toggle();
        Ok(())
    }

    /// Applies a partial update. Identity, owner and creation time never
    /// change.
    pub fn apply(&mut self, patch: TaskPatch) {
        let TaskPatch {
            title,
            description,
            due_date,
            priority,
            status,
            subtasks,
        } = patch;

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = normalize_description(new_description);
        }
        if let Some(new_due_date) = due_date {
            self.due_date = new_due_date;
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        if let Some(new_status) = status {
            self.status = new_status;
        }
        if let Some(new_subtasks) = subtasks {
            self.subtasks = new_subtasks;
        }
    }
}

/// Trims descriptions and stores blank ones as absent.
fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
