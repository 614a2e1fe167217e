//! Missing-date resolution for raw task records.
//!
//! Every task shown on the timeline needs a definite start and end. The
//! backend frequently omits one or both, so the bounds are inferred from
//! whatever the record does carry.

use crate::models::{Priority, RawTask, Status};
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Days assumed between start and end when nothing else is known.
pub const DEFAULT_SPAN_DAYS: u64 = 3;

/// Minutes in one working day (8 hours).
pub const MINUTES_PER_WORK_DAY: i64 = 480;

/// Title shown for tasks without a title or description.
pub const UNTITLED: &str = "Untitled";

/// Dependency references carried for display only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyRefs {
    pub blocks: Vec<String>,
    pub blocked_by: Vec<String>,
    pub related: Vec<String>,
}

impl DependencyRefs {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.blocked_by.is_empty() && self.related.is_empty()
    }
}

/// A task with guaranteed start and end dates.
///
/// Invariant: `end_date >= start_date + 1 day`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTask {
    pub id: String,
    /// Display title (falls back to the description, then [`UNTITLED`]).
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Completion percentage in `0..=100`.
    pub progress: u8,
    pub status: Status,
    pub priority: Priority,
    pub assignee_id: Option<String>,
    pub assignee_name: Option<String>,
    pub case_name: Option<String>,
    pub estimated_minutes: Option<i64>,
    pub is_overdue: bool,
    pub dependencies: DependencyRefs,
}

impl ResolvedTask {
    /// Inclusive number of calendar days the task covers.
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Resolve one raw task against `today`.
///
/// Start comes from the record's start date, else three days before the due
/// date, else the creation date, else `today`. End comes from the due date,
/// else the start plus the estimated effort in 8-hour days, else the start
/// plus three days. An end that does not fall at least one day after the
/// start is pushed to `start + 1 day`.
pub fn resolve_task(raw: &RawTask, today: NaiveDate) -> ResolvedTask {
    let start_date = match (raw.start_date, raw.due_date) {
        (Some(start), _) => start,
        (None, Some(due)) => due.checked_sub_days(Days::new(DEFAULT_SPAN_DAYS)).unwrap_or(due),
        (None, None) => raw
            .created_at
            .map(|created| created.date_naive())
            .unwrap_or(today),
    };

    let end_date = raw.due_date.unwrap_or_else(|| {
        let span = match raw.estimated_minutes {
            Some(minutes) if minutes > 0 => estimated_days(minutes),
            _ => DEFAULT_SPAN_DAYS,
        };
        add_days(start_date, span)
    });

    let min_end = add_days(start_date, 1);
    let end_date = if end_date < min_end { min_end } else { end_date };

    let status = match &raw.status {
        Some(status) if !status.as_str().is_empty() => status.clone(),
        _ => Status::Todo,
    };
    let priority = match &raw.priority {
        Some(priority) if !priority.as_str().is_empty() => priority.clone(),
        _ => Priority::Medium,
    };

    let is_overdue = end_date < today && status != Status::Done;

    tracing::trace!(
        task_id = %raw.id,
        %start_date,
        %end_date,
        is_overdue,
        "resolved task dates"
    );

    ResolvedTask {
        id: raw.id.clone(),
        title: display_title(raw),
        description: raw.description.clone(),
        start_date,
        end_date,
        progress: clamp_progress(raw.progress),
        status,
        priority,
        assignee_id: raw.assignee_id.clone(),
        assignee_name: raw.assignee_name.clone(),
        case_name: raw.case_name.clone(),
        estimated_minutes: raw.estimated_minutes,
        is_overdue,
        dependencies: DependencyRefs {
            blocks: raw.blocks.clone(),
            blocked_by: raw.blocked_by.clone(),
            related: raw.related.clone(),
        },
    }
}

/// Resolve a batch of raw tasks, preserving order.
///
/// Records without an id cannot be addressed by the view and are skipped.
pub fn resolve_tasks(raw: &[RawTask], today: NaiveDate) -> Vec<ResolvedTask> {
    let resolved: Vec<ResolvedTask> = raw
        .iter()
        .filter(|task| {
            let keep = !task.id.trim().is_empty();
            if !keep {
                tracing::debug!("skipping task record without id");
            }
            keep
        })
        .map(|task| resolve_task(task, today))
        .collect();

    tracing::debug!(
        received = raw.len(),
        resolved = resolved.len(),
        "resolved task batch"
    );

    resolved
}

/// Whole working days for a positive effort estimate, at least one.
fn estimated_days(minutes: i64) -> u64 {
    minutes
        .unsigned_abs()
        .div_ceil(MINUTES_PER_WORK_DAY.unsigned_abs())
        .max(1)
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}

fn clamp_progress(progress: Option<f64>) -> u8 {
    match progress {
        Some(p) if p.is_finite() => p.round().clamp(0.0, 100.0) as u8,
        _ => 0,
    }
}

fn display_title(raw: &RawTask) -> String {
    [raw.title.as_deref(), raw.description.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(UNTITLED)
        .to_string()
}
