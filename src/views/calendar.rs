//! Calendar events for tasks with a due date.

use crate::task::domain::{Priority, Task, TaskId};
use chrono::NaiveDate;
use serde::Serialize;

/// Background and border colours of a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarColor {
    /// Fill colour as a CSS hex string.
    pub background: &'static str,
    /// Border colour as a CSS hex string.
    pub border: &'static str,
}

impl CalendarColor {
    /// Done tasks.
    pub const GREEN: Self = Self {
        background: "#4ade80",
        border: "#22c55e",
    };
    /// High priority.
    pub const RED: Self = Self {
        background: "#f87171",
        border: "#ef4444",
    };
    /// Medium priority.
    pub const YELLOW: Self = Self {
        background: "#fbbf24",
        border: "#f59e0b",
    };
    /// Low priority.
    pub const BLUE: Self = Self {
        background: "#60a5fa",
        border: "#3b82f6",
    };

    /// Done wins over priority.
    #[must_use]
    pub const fn for_task(task: &Task) -> Self {
        if task.is_completed() {
            return Self::GREEN;
        }
        match task.priority() {
            Priority::High => Self::RED,
            Priority::Medium => Self::YELLOW,
            Priority::Low => Self::BLUE,
        }
    }
}

/// One all-day calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    /// Task the event opens when clicked.
    pub task_id: TaskId,
    /// Event label.
    pub title: String,
    /// Day the event is drawn on.
    pub date: NaiveDate,
    /// Event colours.
    pub color: CalendarColor,
}

/// Builds one event per task that has a due date, in list order.
#[must_use]
pub fn calendar_events(tasks: &[Task]) -> Vec<CalendarEvent> {
    tasks
        .iter()
        .filter_map(|task| {
            task.due_date().map(|date| CalendarEvent {
                task_id: task.id(),
                title: task.title().as_str().to_owned(),
                date,
                color: CalendarColor::for_task(task),
            })
        })
        .collect()
}
