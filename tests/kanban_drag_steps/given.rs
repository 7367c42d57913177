//! Given steps for kanban drag-and-drop BDD scenarios.

use std::sync::Arc;

use super::world::{KanbanWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use taskflow::{
    config::TaskFlowConfig,
    task::{
        domain::{TaskDraft, TaskPatch, TaskStatus, UserId},
        ports::TaskStore,
        services::TaskLifecycleService,
    },
};

#[given(r#"a signed-in user "{name}""#)]
fn signed_in_user(world: &mut KanbanWorld, name: String) -> Result<(), eyre::Report> {
    world.user = Some(UserId::new(name)?);
    Ok(())
}

#[given(r#""{owner}" has a "{status}" task titled "{title}""#)]
fn user_has_task(
    world: &mut KanbanWorld,
    owner: String,
    status: String,
    title: String,
) -> Result<(), eyre::Report> {
    let user = UserId::new(owner)?;
    let initial = TaskStatus::try_from(status.as_str())?;
    let service = TaskLifecycleService::new(Arc::new(world.store.clone()), Arc::new(DefaultClock));
    let created = run_async(service.create(&user, TaskDraft::new(title)))
        .wrap_err("create task for kanban scenario")?;
    if initial != created.status() {
        run_async(
            world
                .store
                .update(&user, created.id(), TaskPatch::status(initial)),
        )
        .wrap_err("set initial task status")?;
    }
    Ok(())
}

#[given("the store rejects status updates")]
fn store_rejects_updates(world: &mut KanbanWorld) {
    world.store.reject_updates();
}

#[given(r#"the drop failure policy is "{policy}""#)]
fn drop_failure_policy(world: &mut KanbanWorld, policy: String) -> Result<(), eyre::Report> {
    let config = TaskFlowConfig::from_toml_str(&format!(
        "[kanban]\ndrop_failure_policy = \"{policy}\"\n"
    ))?;
    world.policy = config.kanban.drop_failure_policy;
    Ok(())
}
