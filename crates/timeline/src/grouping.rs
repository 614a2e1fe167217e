//! Swimlane grouping for timeline rows.
//!
//! Partitions the visible tasks by assignee, priority or status. Every task
//! lands in exactly one group, and group order depends only on the grouping
//! key and the labels, never on the order tasks were accumulated in.

use crate::error::TimelineError;
use crate::models::{Priority, Status};
use crate::resolve::ResolvedTask;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

/// Key of the single group produced by `GroupBy::None`.
pub const ALL_TASKS_KEY: &str = "all";

/// Key of the group collecting tasks without an assignee.
pub const UNASSIGNED_KEY: &str = "unassigned";

/// Dimension used to partition tasks into swimlanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// One group with every task, in input order.
    None,
    #[default]
    Assignee,
    Priority,
    Status,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::None => "none",
            GroupBy::Assignee => "assignee",
            GroupBy::Priority => "priority",
            GroupBy::Status => "status",
        }
    }
}

impl std::fmt::Display for GroupBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(GroupBy::None),
            "assignee" => Ok(GroupBy::Assignee),
            "priority" => Ok(GroupBy::Priority),
            "status" => Ok(GroupBy::Status),
            _ => Err(TimelineError::InvalidGroupBy {
                value: s.to_string(),
            }),
        }
    }
}

/// Display labels for group headers.
///
/// Implement this to plug in a localization catalog.
pub trait GroupLabels {
    /// Label of the single group when grouping is off.
    fn all_tasks(&self) -> String;

    /// Label of the group for tasks without an assignee.
    fn unassigned(&self) -> String;

    fn priority(&self, priority: &Priority) -> String;

    fn status(&self, status: &Status) -> String;
}

/// Built-in English labels. Unrecognized values are shown verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLabels;

impl GroupLabels for EnglishLabels {
    fn all_tasks(&self) -> String {
        "All Tasks".to_string()
    }

    fn unassigned(&self) -> String {
        "Unassigned".to_string()
    }

    fn priority(&self, priority: &Priority) -> String {
        match priority {
            Priority::Critical => "Critical".to_string(),
            Priority::High => "High".to_string(),
            Priority::Medium => "Medium".to_string(),
            Priority::Low => "Low".to_string(),
            Priority::Other(raw) => raw.clone(),
        }
    }

    fn status(&self, status: &Status) -> String {
        match status {
            Status::Backlog => "Backlog".to_string(),
            Status::Todo => "To Do".to_string(),
            Status::InProgress => "In Progress".to_string(),
            Status::Done => "Done".to_string(),
            Status::Other(raw) => raw.clone(),
        }
    }
}

/// A labeled swimlane of tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub key: String,
    pub label: String,
    pub tasks: Vec<ResolvedTask>,
}

/// Partition tasks into ordered groups.
///
/// - `None`: a single group with the tasks in input order.
/// - `Assignee`: keyed by assignee id; labeled with the first task's
///   assignee name; ordered by label.
/// - `Priority`: ordered critical, high, medium, low, then unrecognized
///   priorities by label.
/// - `Status`: ordered by label.
///
/// Label ordering is case-insensitive and stable, so groups with equal
/// labels keep the order in which they were first seen. An empty input
/// yields no groups.
pub fn group_tasks(
    tasks: &[ResolvedTask],
    group_by: GroupBy,
    labels: &dyn GroupLabels,
) -> Vec<Group> {
    if tasks.is_empty() {
        return Vec::new();
    }

    if group_by == GroupBy::None {
        return vec![Group {
            key: ALL_TASKS_KEY.to_string(),
            label: labels.all_tasks(),
            tasks: tasks.to_vec(),
        }];
    }

    // Single pass, remembering first-seen key order for stable tie-breaks
    let mut first_seen: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<ResolvedTask>> = HashMap::new();
    for task in tasks {
        let key = group_key(task, group_by);
        buckets
            .entry(key.clone())
            .or_insert_with(|| {
                first_seen.push(key);
                Vec::new()
            })
            .push(task.clone());
    }

    let mut groups: Vec<Group> = first_seen
        .into_iter()
        .filter_map(|key| {
            let tasks = buckets.remove(&key)?;
            let label = group_label(&tasks[0], group_by, labels);
            Some(Group { key, label, tasks })
        })
        .collect();

    match group_by {
        GroupBy::Priority => groups.sort_by(|a, b| {
            let rank_a = a.tasks[0].priority.rank();
            let rank_b = b.tasks[0].priority.rank();
            match (rank_a, rank_b) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => compare_labels(&a.label, &b.label),
            }
        }),
        _ => groups.sort_by(|a, b| compare_labels(&a.label, &b.label)),
    }

    tracing::debug!(
        group_by = group_by.as_str(),
        groups = groups.len(),
        tasks = tasks.len(),
        "grouped tasks"
    );

    groups
}

fn group_key(task: &ResolvedTask, group_by: GroupBy) -> String {
    match group_by {
        GroupBy::None => ALL_TASKS_KEY.to_string(),
        GroupBy::Assignee => task
            .assignee_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(UNASSIGNED_KEY)
            .to_string(),
        GroupBy::Priority => task.priority.as_str().to_string(),
        GroupBy::Status => task.status.as_str().to_string(),
    }
}

/// Label a group from its first task.
fn group_label(first: &ResolvedTask, group_by: GroupBy, labels: &dyn GroupLabels) -> String {
    match group_by {
        GroupBy::None => labels.all_tasks(),
        GroupBy::Assignee => match first.assignee_name.as_deref() {
            Some(name)
                if !name.trim().is_empty()
                    && first.assignee_id.as_deref().is_some_and(|id| !id.is_empty()) =>
            {
                name.to_string()
            }
            _ => labels.unassigned(),
        },
        GroupBy::Priority => {
            if !first.priority.is_recognized() {
                tracing::warn!(
                    priority = first.priority.as_str(),
                    "unrecognized task priority"
                );
            }
            labels.priority(&first.priority)
        }
        GroupBy::Status => {
            if !first.status.is_recognized() {
                tracing::warn!(status = first.status.as_str(), "unrecognized task status");
            }
            labels.status(&first.status)
        }
    }
}

fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
