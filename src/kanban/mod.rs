//! Three-column kanban board with optimistic drag-and-drop.
//!
//! A drop that changes a card's column updates the in-memory board and
//! notifies every subscribed view before the store is asked to persist the
//! new status. Persistence runs without borrowing the board, so several
//! drops may be in flight at once; each is settled back onto the board when
//! the store answers, rolling back or keeping the optimistic state according
//! to [`DropFailurePolicy`].

mod board;
mod column;

pub use board::{
    DragOutcome, DropFailurePolicy, IgnoredDrop, KanbanBoard, KanbanError, KanbanResult,
    PendingStatusUpdate, SettledStatusUpdate,
};
pub use column::{BoardColumns, Column};
