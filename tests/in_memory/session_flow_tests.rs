//! End-to-end flow from registration to the dashboard and calendar.

use std::sync::Arc;

use super::helpers::{service_over, store};
use chrono::{Duration, Utc};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use taskflow::{
    auth::{
        adapters::memory::InMemoryAuthProvider,
        domain::{SignInForm, SignUpForm},
        services::AccountService,
    },
    kanban::{DropFailurePolicy, KanbanBoard},
    session::{AppSession, InMemoryPreferenceStore, SessionError},
    task::{
        adapters::memory::InMemoryTaskStore,
        domain::{Priority, TaskDraft},
    },
    views::{CalendarColor, calendar_events},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_user_plans_and_completes_work(
    store: Arc<InMemoryTaskStore>,
) -> eyre::Result<()> {
    let provider = Arc::new(InMemoryAuthProvider::new());
    let accounts = AccountService::new(Arc::clone(&provider));
    let mut session = AppSession::start(
        Arc::clone(&provider),
        Arc::new(InMemoryPreferenceStore::new()),
    )
    .await?;
    ensure!(matches!(
        session.require_user(),
        Err(SessionError::Unauthenticated)
    ));

    accounts
        .sign_up(SignUpForm {
            name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
            password: "hunter22".to_owned(),
            confirm_password: "hunter22".to_owned(),
        })
        .await?;
    session.user_changed().await?;
    let user = session.require_user()?;

    let tasks = service_over(Arc::clone(&store));
    let tomorrow = (Utc::now() + Duration::days(1)).date_naive();
    let urgent = tasks
        .create(
            user.user_id(),
            TaskDraft::new("Submit taxes")
                .with_priority(Priority::High)
                .with_due_date(Some(tomorrow)),
        )
        .await?;
    tasks
        .create(user.user_id(), TaskDraft::new("Water plants"))
        .await?;

    let events = calendar_events(&tasks.list(user.user_id()).await?);
    let event = events.first().ok_or_eyre("dated task shows on calendar")?;
    ensure!(events.len() == 1);
    ensure!(event.color == CalendarColor::RED);

    let mut board =
        KanbanBoard::load(&*store, user.user_id().clone(), DropFailurePolicy::Rollback).await?;
    board.drop_card(&*store, urgent.id(), Some("done")).await?;

    let summary = tasks.dashboard(user.user_id()).await?;
    ensure!(summary.metrics.pending == 1);
    ensure!(summary.metrics.completed_this_week == 1);
    ensure!(summary.metrics.overdue == 0);
    let events = calendar_events(&tasks.list(user.user_id()).await?);
    ensure!(events.first().map(|event| event.color) == Some(CalendarColor::GREEN));

    session.sign_out().await?;
    ensure!(session.user_changed().await?.is_none());
    let again = accounts
        .sign_in(SignInForm::new("alice@example.com", "hunter22"))
        .await?;
    ensure!(again.user_id() == user.user_id());
    ensure!(tasks.list(again.user_id()).await?.len() == 2);
    session.shutdown();
    Ok(())
}
