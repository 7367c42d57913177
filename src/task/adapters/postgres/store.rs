//! `PostgreSQL` store implementation for task records.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::config::StoreConfig;
use crate::task::{
    domain::{
        NewTask, PersistedTaskData, Priority, SubtaskList, Task, TaskId, TaskPatch, TaskStatus,
        TaskTitle, UserId,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use std::time::Duration;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool from store configuration.
///
/// # Errors
///
/// Returns [`TaskStoreError::Unavailable`] when the pool cannot open its
/// initial connections.
pub fn build_pool(config: &StoreConfig) -> TaskStoreResult<TaskPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
    Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_secs(config.connection_timeout_secs))
        .build(manager)
        .map_err(TaskStoreError::unavailable)
}

/// `PostgreSQL`-backed task store.
pub struct PostgresTaskStore<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    pool: TaskPgPool,
    clock: Arc<C>,
}

impl PostgresTaskStore {
    /// Creates a store from a connection pool using the system clock.
    #[must_use]
    pub fn new(pool: TaskPgPool) -> Self {
        Self::with_clock(pool, Arc::new(DefaultClock))
    }
}

impl<C> Clone for PostgresTaskStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> PostgresTaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a store with an explicit clock for creation timestamps.
    #[must_use]
    pub const fn with_clock(pool: TaskPgPool, clock: Arc<C>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::unavailable)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl<C> TaskStore for PostgresTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn create(&self, user_id: &UserId, new_task: NewTask) -> TaskStoreResult<Task> {
        let task = Task::create(user_id.clone(), new_task, &*self.clock);
        let new_row = to_new_row(&task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(map_diesel_error)?;
            Ok(task)
        })
        .await
    }

    async fn list_by_user(&self, user_id: &UserId) -> TaskStoreResult<Vec<Task>> {
        let owner = user_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::user_id.eq(owner))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(map_diesel_error)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_id(&self, user_id: &UserId, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let owner = user_id.clone();
        self.run_blocking(move |connection| {
            let row = find_row(connection, id)?;
            let Some(task) = row.map(row_to_task).transpose()? else {
                return Ok(None);
            };
            if !task.is_owned_by(&owner) {
                return Err(TaskStoreError::PermissionDenied { task_id: id });
            }
            Ok(Some(task))
        })
        .await
    }

    async fn update(
        &self,
        user_id: &UserId,
        id: TaskId,
        patch: TaskPatch,
    ) -> TaskStoreResult<Task> {
        let owner = user_id.clone();
        self.run_blocking(move |connection| {
            connection.transaction(|tx| {
                let mut task = load_owned_for_update(tx, &owner, id)?;
                task.apply(patch);
                let changeset = to_changeset(&task)?;
                diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                    .set(&changeset)
                    .execute(tx)
                    .map_err(map_diesel_error)?;
                Ok(task)
            })
        })
        .await
    }

    async fn delete(&self, user_id: &UserId, id: TaskId) -> TaskStoreResult<()> {
        let owner = user_id.clone();
        self.run_blocking(move |connection| {
            connection.transaction(|tx| {
                load_owned_for_update(tx, &owner, id)?;
                diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                    .execute(tx)
                    .map_err(map_diesel_error)?;
                Ok(())
            })
        })
        .await
    }
}

impl From<DieselError> for TaskStoreError {
    fn from(err: DieselError) -> Self {
        map_diesel_error(err)
    }
}

fn map_diesel_error(err: DieselError) -> TaskStoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            TaskStoreError::unavailable(err)
        }
        _ => TaskStoreError::persistence(err),
    }
}

fn find_row(connection: &mut PgConnection, id: TaskId) -> TaskStoreResult<Option<TaskRow>> {
    tasks::table
        .filter(tasks::id.eq(id.into_inner()))
        .select(TaskRow::as_select())
        .first::<TaskRow>(connection)
        .optional()
        .map_err(map_diesel_error)
}

fn load_owned_for_update(
    connection: &mut PgConnection,
    owner: &UserId,
    id: TaskId,
) -> TaskStoreResult<Task> {
    let row = tasks::table
        .filter(tasks::id.eq(id.into_inner()))
        .select(TaskRow::as_select())
        .for_update()
        .load::<TaskRow>(connection)
        .map_err(map_diesel_error)?
        .into_iter()
        .next()
        .ok_or(TaskStoreError::NotFound(id))?;
    let task = row_to_task(row)?;
    if !task.is_owned_by(owner) {
        return Err(TaskStoreError::PermissionDenied { task_id: id });
    }
    Ok(task)
}

fn to_new_row(task: &Task) -> TaskStoreResult<NewTaskRow> {
    let subtasks = serde_json::to_value(task.subtasks()).map_err(TaskStoreError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        user_id: task.user_id().as_str().to_owned(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        due_date: task.due_date(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        subtasks,
        created_at: task.created_at(),
    })
}

fn to_changeset(task: &Task) -> TaskStoreResult<TaskChangeset> {
    let subtasks = serde_json::to_value(task.subtasks()).map_err(TaskStoreError::persistence)?;

    Ok(TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        due_date: task.due_date(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        subtasks,
    })
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        user_id,
        title,
        description,
        due_date,
        priority,
        status,
        subtasks,
        created_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        user_id: UserId::new(user_id).map_err(TaskStoreError::persistence)?,
        title: TaskTitle::new(title).map_err(TaskStoreError::persistence)?,
        description,
        due_date,
        priority: Priority::try_from(priority.as_str()).map_err(TaskStoreError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskStoreError::persistence)?,
        subtasks: serde_json::from_value::<SubtaskList>(subtasks)
            .map_err(TaskStoreError::persistence)?,
        created_at,
    };
    Ok(Task::from_persisted(data))
}
