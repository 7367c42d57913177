//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub user_id: String,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Priority in storage form.
    pub priority: String,
    /// Status in storage form.
    pub status: String,
    /// Subtask JSON array.
    pub subtasks: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub user_id: String,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Priority in storage form.
    pub priority: String,
    /// Status in storage form.
    pub status: String,
    /// Subtask JSON array.
    pub subtasks: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Changeset written back after a partial update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Priority in storage form.
    pub priority: String,
    /// Status in storage form.
    pub status: String,
    /// Subtask JSON array.
    pub subtasks: Value,
}
