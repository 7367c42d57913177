//! Subtask value objects.

use super::{SubtaskId, TaskDomainError};
use serde::{Deserialize, Serialize};

/// A checklist item belonging to one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    id: SubtaskId,
    title: String,
    completed: bool,
}

impl Subtask {
    /// Creates an incomplete subtask with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptySubtaskTitle`] when the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskDomainError> {
        Self::with_id(SubtaskId::new(), title, false)
    }

    /// Creates a subtask with a known identifier and completion flag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptySubtaskTitle`] when the title is blank.
    pub fn with_id(
        id: SubtaskId,
        title: impl Into<String>,
        completed: bool,
    ) -> Result<Self, TaskDomainError> {
        let raw = title.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptySubtaskTitle);
        }
        Ok(Self {
            id,
            title: trimmed.to_owned(),
            completed,
        })
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> SubtaskId {
        self.id
    }

    /// Returns the subtask title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns whether the subtask is checked off.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Flips the completion flag.
    pub const fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Ordered subtasks of one task with per-task unique identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Subtask>", into = "Vec<Subtask>")]
pub struct SubtaskList(Vec<Subtask>);

impl SubtaskList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a subtask, keeping identifiers unique within the list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DuplicateSubtask`] if the identifier is
    /// already present.
    pub fn push(&mut self, subtask: Subtask) -> Result<(), TaskDomainError> {
        if self.get(subtask.id()).is_some() {
            return Err(TaskDomainError::DuplicateSubtask(subtask.id()));
        }
        self.0.push(subtask);
        Ok(())
    }

    /// Looks up a subtask by identifier.
    #[must_use]
    pub fn get(&self, id: SubtaskId) -> Option<&Subtask> {
        self.0.iter().find(|subtask| subtask.id() == id)
    }

    /// Looks up a subtask mutably by identifier.
    pub fn get_mut(&mut self, id: SubtaskId) -> Option<&mut Subtask> {
        self.0.iter_mut().find(|subtask| subtask.id() == id)
    }

    /// Iterates in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Subtask> {
        self.0.iter()
    }

    /// Returns the number of subtasks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the task has no subtasks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns how many subtasks are completed.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.0.iter().filter(|subtask| subtask.is_completed()).count()
    }
}

impl TryFrom<Vec<Subtask>> for SubtaskList {
    type Error = TaskDomainError;

    fn try_from(subtasks: Vec<Subtask>) -> Result<Self, Self::Error> {
        let mut list = Self::new();
        for subtask in subtasks {
            list.push(subtask)?;
        }
        Ok(list)
    }
}

impl From<SubtaskList> for Vec<Subtask> {
    fn from(list: SubtaskList) -> Self {
        list.0
    }
}

impl<'a> IntoIterator for &'a SubtaskList {
    type Item = &'a Subtask;
    type IntoIter = std::slice::Iter<'a, Subtask>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
