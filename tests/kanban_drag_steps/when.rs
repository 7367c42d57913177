//! When steps for kanban drag-and-drop BDD scenarios.

use super::world::{KanbanWorld, run_async};
use rstest_bdd_macros::when;

fn drop_card(
    world: &mut KanbanWorld,
    title: &str,
    target: Option<&str>,
) -> Result<(), eyre::Report> {
    let store = world.store.clone();
    world.board_mut()?;
    let task_id = world.card(title)?.id();
    let board = world.board_mut()?;
    board.begin_drag(task_id);
    let result = run_async(board.drop_card(&store, task_id, target));
    world.last_drop = Some(result);
    Ok(())
}

#[when(r#"the card "{title}" is dropped on "{column}""#)]
fn card_dropped_on(
    world: &mut KanbanWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    drop_card(world, &title, Some(&column))
}

#[when(r#"the card "{title}" is released outside any column"#)]
fn card_released_outside(world: &mut KanbanWorld, title: String) -> Result<(), eyre::Report> {
    drop_card(world, &title, None)
}
