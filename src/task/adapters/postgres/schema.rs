//! Diesel schema for task persistence.

diesel::table! {
    /// Task records, one row per task.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user identifier.
        #[max_length = 128]
        user_id -> Varchar,
        /// Task title.
        title -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Task priority.
        #[max_length = 16]
        priority -> Varchar,
        /// Task status.
        #[max_length = 16]
        status -> Varchar,
        /// Ordered subtasks as a JSON array.
        subtasks -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
