//! In-memory integration tests for task lifecycle operations.

use super::helpers::{TestService, alice, seed, service};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use taskflow::{
    task::{
        domain::{Priority, SubtaskDraft, TaskDraft, TaskStatus, UserId},
        ports::TaskStoreError,
        services::TaskLifecycleError,
    },
    views::SubtaskProgress,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_form_round_trip_keeps_subtask_progress(
    service: TestService,
    alice: UserId,
) -> eyre::Result<()> {
    let created = service
        .create(
            &alice,
            TaskDraft::new("Plan trip")
                .with_priority(Priority::High)
                .with_subtask(SubtaskDraft::new("book flights"))
                .with_subtask(SubtaskDraft::new("book hotel"))
                .with_subtask(SubtaskDraft::new("pack")),
        )
        .await?;
    let flights = created
        .subtasks()
        .iter()
        .next()
        .ok_or_eyre("subtasks were created")?
        .id();
    let toggled = service.toggle_subtask(&alice, created.id(), flights).await?;
    ensure!(SubtaskProgress::of(toggled.subtasks()).percent() == 33);

    let mut edit = TaskDraft::new("Plan trip to Lisbon")
        .with_priority(Priority::High)
        .with_due_date_input("2026-12-01")?;
    for subtask in toggled.subtasks() {
        edit = edit.with_subtask(SubtaskDraft::existing(subtask));
    }
    let edited = service.update(&alice, created.id(), edit).await?;

    ensure!(edited.title().as_str() == "Plan trip to Lisbon");
    ensure!(edited.subtasks() == toggled.subtasks());
    ensure!(SubtaskProgress::of(edited.subtasks()).percent() == 33);
    ensure!(edited.status() == TaskStatus::Todo);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_never_see_each_others_tasks(
    service: TestService,
    alice: UserId,
) -> eyre::Result<()> {
    let bob = UserId::new("bob")?;
    let alices = seed(&service, &alice, &["a1", "a2"]).await?;
    seed(&service, &bob, &["b1"]).await?;

    let bobs_view = service.list(&bob).await?;
    ensure!(bobs_view.len() == 1);
    ensure!(bobs_view.iter().all(|task| task.is_owned_by(&bob)));

    let target = alices.first().ok_or_eyre("seeded tasks")?.id();
    let denied = service.update(&bob, target, TaskDraft::new("hijack")).await;
    ensure!(matches!(
        denied,
        Err(TaskLifecycleError::Store(TaskStoreError::PermissionDenied { .. }))
    ));
    let untouched = service
        .get(&alice, target)
        .await?
        .ok_or_eyre("task still exists")?;
    ensure!(untouched.title().as_str() == "a1");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_due_date_is_caught_before_saving(service: TestService, alice: UserId) {
    let result = TaskDraft::new("Pay rent").with_due_date_input("31/12/2026");

    assert!(result.is_err());
    assert!(service.list(&alice).await.expect("list succeeds").is_empty());
}
