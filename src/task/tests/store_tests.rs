//! Contract tests for the in-memory task store.

use crate::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{NewTask, TaskId, TaskPatch, TaskStatus, TaskTitle, UserId},
    ports::{TaskStore, TaskStoreError},
};
use eyre::{OptionExt, ensure};
use rstest::{fixture, rstest};

#[fixture]
fn store() -> InMemoryTaskStore {
    InMemoryTaskStore::new()
}

#[fixture]
fn owner() -> UserId {
    UserId::new("owner").expect("valid user id")
}

fn titled(title: &str) -> NewTask {
    NewTask::new(TaskTitle::new(title).expect("valid title"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_assigns_identity_and_todo_status(
    store: InMemoryTaskStore,
    owner: UserId,
) -> eyre::Result<()> {
    let first = store.create(&owner, titled("one")).await?;
    let second = store.create(&owner, titled("two")).await?;

    ensure!(first.id() != second.id());
    ensure!(first.status() == TaskStatus::Todo);
    ensure!(first.user_id() == &owner);
    ensure!(store.len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_patch_changes_only_status(
    store: InMemoryTaskStore,
    owner: UserId,
) -> eyre::Result<()> {
    let created = store
        .create(&owner, titled("report").with_description("numbers"))
        .await?;

    let updated = store
        .update(&owner, created.id(), TaskPatch::status(TaskStatus::Done))
        .await?;

    ensure!(updated.status() == TaskStatus::Done);
    ensure!(updated.title() == created.title());
    ensure!(updated.description() == created.description());
    ensure!(updated.created_at() == created.created_at());
    let stored = store
        .find_by_id(&owner, created.id())
        .await?
        .ok_or_eyre("task exists")?;
    ensure!(stored == updated);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_missing_task_is_not_found(store: InMemoryTaskStore, owner: UserId) {
    let missing = TaskId::new();

    let result = store
        .update(&owner, missing, TaskPatch::status(TaskStatus::Doing))
        .await;

    assert!(matches!(result, Err(TaskStoreError::NotFound(id)) if id == missing));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_update_and_delete_are_denied(
    store: InMemoryTaskStore,
    owner: UserId,
) -> eyre::Result<()> {
    let intruder = UserId::new("intruder")?;
    let task = store.create(&owner, titled("private")).await?;

    let update = store
        .update(&intruder, task.id(), TaskPatch::status(TaskStatus::Done))
        .await;
    let delete = store.delete(&intruder, task.id()).await;

    ensure!(matches!(
        update,
        Err(TaskStoreError::PermissionDenied { task_id }) if task_id == task.id()
    ));
    ensure!(matches!(delete, Err(TaskStoreError::PermissionDenied { .. })));
    let untouched = store
        .find_by_id(&owner, task.id())
        .await?
        .ok_or_eyre("task survives")?;
    ensure!(untouched.status() == TaskStatus::Todo);
    ensure!(store.list_by_user(&intruder).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_keeps_remaining_order(
    store: InMemoryTaskStore,
    owner: UserId,
) -> eyre::Result<()> {
    let first = store.create(&owner, titled("a")).await?;
    let middle = store.create(&owner, titled("b")).await?;
    let last = store.create(&owner, titled("c")).await?;

    store.delete(&owner, middle.id()).await?;

    let ids: Vec<TaskId> = store
        .list_by_user(&owner)
        .await?
        .iter()
        .map(|task| task.id())
        .collect();
    ensure!(ids == [first.id(), last.id()]);
    ensure!(matches!(
        store.delete(&owner, middle.id()).await,
        Err(TaskStoreError::NotFound(_))
    ));
    Ok(())
}

#[rstest]
fn only_connectivity_failures_are_transient() {
    let offline = TaskStoreError::unavailable(std::io::Error::other("connection refused"));
    let broken = TaskStoreError::persistence(std::io::Error::other("constraint"));

    assert!(offline.is_transient());
    assert!(!broken.is_transient());
    assert!(!TaskStoreError::NotFound(TaskId::new()).is_transient());
}
