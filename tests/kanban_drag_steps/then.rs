//! Then steps for kanban drag-and-drop BDD scenarios.

use super::world::KanbanWorld;
use rstest_bdd_macros::then;
use taskflow::{
    kanban::{DragOutcome, KanbanError},
    task::domain::TaskStatus,
};

#[then(r#"the card "{title}" is in the "{column}" column"#)]
fn card_in_column(world: &KanbanWorld, title: String, column: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(column.as_str())?;
    let task_id = world.card(&title)?.id();
    let board = world
        .board
        .as_ref()
        .ok_or_else(|| eyre::eyre!("board was not loaded"))?;

    let in_column = board
        .columns()
        .tasks(expected)
        .iter()
        .any(|task| task.id() == task_id);
    if !in_column {
        return Err(eyre::eyre!("card {title:?} is not in the {column} column"));
    }
    Ok(())
}

#[then(r#"the store records "{title}" as "{status}""#)]
fn store_records_status(
    world: &KanbanWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())?;
    let stored = world.stored_task(&title)?;
    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected stored status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then("the drop is ignored")]
fn drop_is_ignored(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_drop
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing drop result"))?;
    if !matches!(result, Ok(DragOutcome::Ignored(_))) {
        return Err(eyre::eyre!("expected an ignored drop, got {result:?}"));
    }
    Ok(())
}

#[then("the move is rolled back")]
fn move_is_rolled_back(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_drop
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing drop result"))?;
    if !matches!(result, Err(KanbanError::RolledBack { .. })) {
        return Err(eyre::eyre!("expected a rolled back move, got {result:?}"));
    }
    Ok(())
}
