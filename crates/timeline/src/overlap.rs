//! Window overlap filtering.

use crate::calendar::Window;
use crate::resolve::ResolvedTask;

/// Whether a task's interval intersects the window.
///
/// True when the start or the end falls inside the window (inclusive), or
/// when the task starts before and ends after it. No padding is applied.
/// Nothing overlaps an empty window.
pub fn overlaps(task: &ResolvedTask, window: &Window) -> bool {
    if window.is_empty() {
        return false;
    }
    window.contains(task.start_date)
        || window.contains(task.end_date)
        || (task.start_date < window.start && task.end_date > window.end)
}

/// Keep only the tasks that intersect the window, preserving order.
pub fn filter_overlapping(tasks: Vec<ResolvedTask>, window: &Window) -> Vec<ResolvedTask> {
    let total = tasks.len();
    let kept: Vec<ResolvedTask> = tasks
        .into_iter()
        .filter(|task| overlaps(task, window))
        .collect();

    tracing::debug!(
        window_start = %window.start,
        window_end = %window.end,
        total,
        kept = kept.len(),
        "filtered tasks to window"
    );

    kept
}

/// Stable sort by start date, for upstreams that do not already order tasks.
pub fn sort_by_start(tasks: &mut [ResolvedTask]) {
    tasks.sort_by_key(|task| task.start_date);
}
