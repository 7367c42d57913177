//! In-memory integration tests for the kanban board.

use std::sync::Arc;

use super::helpers::{alice, seed, service_over, store};
use eyre::{OptionExt, bail, ensure};
use rstest::rstest;
use taskflow::{
    kanban::{DragOutcome, DropFailurePolicy, KanbanBoard},
    task::{
        adapters::memory::InMemoryTaskStore,
        domain::{Task, TaskStatus, UserId},
    },
};

fn statuses(tasks: &[Task]) -> Vec<TaskStatus> {
    tasks.iter().map(Task::status).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_moves_settle_independently(
    store: Arc<InMemoryTaskStore>,
    alice: UserId,
) -> eyre::Result<()> {
    let service = service_over(Arc::clone(&store));
    let seeded = seed(&service, &alice, &["first", "second"]).await?;
    let (first, second) = match seeded.as_slice() {
        [first, second] => (first.id(), second.id()),
        _ => bail!("expected two seeded tasks"),
    };
    let mut board = KanbanBoard::load(&*store, alice.clone(), DropFailurePolicy::Rollback).await?;

    let DragOutcome::Moved(to_doing) = board.end_drag(first, Some("doing")) else {
        bail!("first card should move");
    };
    let DragOutcome::Moved(to_done) = board.end_drag(second, Some("done")) else {
        bail!("second card should move");
    };
    ensure!(board.in_flight() == 2);

    let (settled_doing, settled_done) =
        tokio::join!(to_doing.persist(&*store), to_done.persist(&*store));
    board.settle(settled_done)?;
    board.settle(settled_doing)?;

    ensure!(board.in_flight() == 0);
    ensure!(statuses(board.tasks()) == [TaskStatus::Doing, TaskStatus::Done]);
    ensure!(statuses(&service.list(&alice).await?) == [TaskStatus::Doing, TaskStatus::Done]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn watchers_see_every_board_change(
    store: Arc<InMemoryTaskStore>,
    alice: UserId,
) -> eyre::Result<()> {
    let service = service_over(Arc::clone(&store));
    let seeded = seed(&service, &alice, &["watched"]).await?;
    let id = seeded.first().ok_or_eyre("seeded task")?.id();
    let mut board = KanbanBoard::load(&*store, alice.clone(), DropFailurePolicy::Rollback).await?;
    let mut snapshots = board.subscribe();

    let watcher = tokio::spawn(async move {
        let mut seen = Vec::new();
        while snapshots.changed().await.is_ok() {
            let status = snapshots
                .borrow_and_update()
                .iter()
                .find(|task| task.id() == id)
                .map(Task::status);
            seen.extend(status);
        }
        seen
    });

    board.drop_card(&*store, id, Some("doing")).await?;
    board.drop_card(&*store, id, Some("done")).await?;
    drop(board);
    let seen = watcher.await?;

    ensure!(seen.last() == Some(&TaskStatus::Done));
    ensure!(!seen.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn new_tasks_appear_after_reload(
    store: Arc<InMemoryTaskStore>,
    alice: UserId,
) -> eyre::Result<()> {
    let service = service_over(Arc::clone(&store));
    let mut board = KanbanBoard::load(&*store, alice.clone(), DropFailurePolicy::Rollback).await?;
    ensure!(board.columns().is_empty());

    seed(&service, &alice, &["late arrival"]).await?;
    board.reload(&*store).await?;

    ensure!(board.columns().tasks(TaskStatus::Todo).len() == 1);
    Ok(())
}
