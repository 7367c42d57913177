//! Read-only projections over a user's task list.
//!
//! Everything here is a pure function of the task slice and, where time
//! matters, an explicit `now`. Views recompute on every render; nothing is
//! cached.

mod calendar;
mod dashboard;
mod metrics;
mod progress;

pub use calendar::{CalendarColor, CalendarEvent, calendar_events};
pub use dashboard::{DashboardSummary, TaskCard};
pub use metrics::{TaskMetrics, is_completed_this_week, is_overdue};
pub use progress::SubtaskProgress;
