//! Timeline view model.
//!
//! [`Timeline`] wires the pipeline together: it owns the caller's
//! configuration, the current task list and the pagination cursor, and
//! produces a [`TimelineLayout`] on demand. The resolved and window-filtered
//! task list is memoized against the task-list revision, the window bounds
//! and `today`; any change to those recomputes it.

use crate::calendar::{Granularity, Window};
use crate::config::TimelineConfig;
use crate::error::TimelineResult;
use crate::geometry::{BarGeometry, BarTone, Direction, bar_geometry, today_marker};
use crate::grouping::{EnglishLabels, GroupBy, GroupLabels, group_tasks};
use crate::models::{RawTask, Status};
use crate::overlap::{filter_overlapping, sort_by_start};
use crate::pagination::Paginator;
use crate::resolve::{ResolvedTask, resolve_tasks};
use chrono::NaiveDate;
use serde::Serialize;

/// One task row with its bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineRow {
    pub task: ResolvedTask,
    pub geometry: BarGeometry,
    pub tone: BarTone,
}

/// A swimlane of rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowGroup {
    pub key: String,
    pub label: String,
    pub rows: Vec<TimelineRow>,
}

/// Counts shown above the chart.
///
/// `filtered`, `overdue` and `in_progress` count every task overlapping the
/// window; `visible` counts the current page only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub visible: usize,
    pub filtered: usize,
    pub overdue: usize,
    pub in_progress: usize,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout {
    pub granularity: Granularity,
    pub group_by: GroupBy,
    pub direction: Direction,
    pub window: Window,
    pub day_width: u32,
    /// Offset of the today line, when today is inside the window.
    pub today_offset: Option<u32>,
    pub groups: Vec<RowGroup>,
    pub has_more: bool,
    pub summary: Summary,
}

impl TimelineLayout {
    /// Iterate every row across all groups, in display order.
    pub fn rows(&self) -> impl Iterator<Item = &TimelineRow> {
        self.groups.iter().flat_map(|group| group.rows.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    revision: u64,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
}

struct FilterCache {
    key: CacheKey,
    tasks: Vec<ResolvedTask>,
}

/// Stateful driver for one timeline view.
///
/// Each instance owns its own cursor and cache; instances share nothing.
pub struct Timeline {
    config: TimelineConfig,
    tasks: Vec<RawTask>,
    revision: u64,
    paginator: Paginator,
    cache: Option<FilterCache>,
    labels: Box<dyn GroupLabels + Send + Sync>,
}

impl Timeline {
    /// Create a view with English group labels.
    ///
    /// # Errors
    ///
    /// Returns `TimelineError::ZeroValue` if the configuration has a zero
    /// width or page size.
    pub fn new(config: TimelineConfig) -> TimelineResult<Self> {
        config.validate()?;
        let paginator = Paginator::new(config.initial_page_size, config.page_increment)?;
        Ok(Self {
            config,
            tasks: Vec::new(),
            revision: 0,
            paginator,
            cache: None,
            labels: Box::new(EnglishLabels),
        })
    }

    /// Replace the group label provider.
    pub fn with_labels(mut self, labels: impl GroupLabels + Send + Sync + 'static) -> Self {
        self.labels = Box::new(labels);
        self
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// The raw task list currently laid out.
    pub fn tasks(&self) -> &[RawTask] {
        &self.tasks
    }

    /// The window for the current granularity and anchor.
    pub fn window(&self) -> Window {
        Window::compute(self.config.granularity, self.config.anchor)
    }

    /// Number of tasks the current page allows.
    pub fn visible_count(&self) -> usize {
        self.paginator.visible_count()
    }

    /// Supersede the task list wholesale.
    pub fn replace_tasks(&mut self, tasks: Vec<RawTask>) {
        self.tasks = tasks;
        self.revision = self.revision.wrapping_add(1);
        tracing::debug!(
            revision = self.revision,
            tasks = self.tasks.len(),
            "replaced timeline tasks"
        );
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.change_window(|config| config.granularity = granularity);
    }

    /// Regrouping keeps the pagination cursor.
    pub fn set_group_by(&mut self, group_by: GroupBy) {
        self.config.group_by = group_by;
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.config.direction = direction;
    }

    /// Move the window one unit back.
    pub fn go_back(&mut self) {
        self.change_window(|config| config.anchor = config.granularity.step_back(config.anchor));
    }

    /// Move the window one unit forward.
    pub fn go_forward(&mut self) {
        self.change_window(|config| {
            config.anchor = config.granularity.step_forward(config.anchor)
        });
    }

    /// Re-anchor the window on `today`.
    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.change_window(|config| config.anchor = today);
    }

    /// Show one more page of tasks.
    pub fn load_more(&mut self) {
        self.paginator.load_more();
        tracing::debug!(
            visible_count = self.paginator.visible_count(),
            "loaded more tasks"
        );
    }

    /// Jump straight to showing the first `pages` pages.
    pub fn show_pages(&mut self, pages: usize) {
        self.paginator.show_pages(pages);
        tracing::debug!(
            pages,
            visible_count = self.paginator.visible_count(),
            "showing pages"
        );
    }

    /// Lay out the current page.
    pub fn layout(&mut self, today: NaiveDate) -> TimelineLayout {
        let window = self.window();
        self.refresh_cache(&window, today);
        let filtered: &[ResolvedTask] = self
            .cache
            .as_ref()
            .map(|cache| cache.tasks.as_slice())
            .unwrap_or(&[]);

        let page = self.paginator.page(filtered);
        let day_width = self.config.day_width();
        let min_bar_width = self.config.geometry.min_bar_width;
        let direction = self.config.direction;

        let groups = group_tasks(page.items, self.config.group_by, self.labels.as_ref())
            .into_iter()
            .map(|group| RowGroup {
                key: group.key,
                label: group.label,
                rows: group
                    .tasks
                    .into_iter()
                    .map(|task| TimelineRow {
                        geometry: bar_geometry(&task, &window, day_width, min_bar_width, direction),
                        tone: BarTone::for_task(&task),
                        task,
                    })
                    .collect(),
            })
            .collect();

        let summary = Summary {
            visible: page.shown,
            filtered: filtered.len(),
            overdue: filtered.iter().filter(|t| t.is_overdue).count(),
            in_progress: filtered
                .iter()
                .filter(|t| t.status == Status::InProgress)
                .count(),
        };

        TimelineLayout {
            granularity: self.config.granularity,
            group_by: self.config.group_by,
            direction,
            today_offset: today_marker(&window, today, day_width),
            day_width,
            groups,
            has_more: page.has_more,
            summary,
            window,
        }
    }

    /// Apply a configuration change, resetting pagination if the window moved.
    fn change_window(&mut self, change: impl FnOnce(&mut TimelineConfig)) {
        let before = self.window();
        change(&mut self.config);
        let after = self.window();

        if before.start != after.start || before.end != after.end {
            self.paginator.reset();
            tracing::debug!(
                granularity = self.config.granularity.as_str(),
                start = %after.start,
                end = %after.end,
                "timeline window changed"
            );
        }
    }

    fn refresh_cache(&mut self, window: &Window, today: NaiveDate) {
        let key = CacheKey {
            revision: self.revision,
            start: window.start,
            end: window.end,
            today,
        };
        if matches!(&self.cache, Some(cache) if cache.key == key) {
            return;
        }

        let resolved = resolve_tasks(&self.tasks, today);
        let mut filtered = filter_overlapping(resolved, window);
        if self.config.sort_by_start {
            sort_by_start(&mut filtered);
        }
        self.cache = Some(FilterCache {
            key,
            tasks: filtered,
        });
    }
}

static_assertions::assert_impl_all!(Timeline: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Edge;
    use crate::models::Priority;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 3, 15)
    }

    fn march_timeline() -> Timeline {
        Timeline::new(TimelineConfig::new(date(2025, 3, 10))).unwrap()
    }

    /// `count` tasks starting on consecutive March days.
    fn march_tasks(count: u32) -> Vec<RawTask> {
        (0..count)
            .map(|i| {
                RawTask::new(format!("t{:02}", i), format!("Task {}", i))
                    .with_start(date(2025, 3, 1 + i % 28))
                    .with_due(date(2025, 3, 2 + i % 28))
            })
            .collect()
    }

    #[test]
    fn test_pagination_over_25_tasks() {
        let mut timeline = march_timeline();
        timeline.set_group_by(GroupBy::None);
        timeline.replace_tasks(march_tasks(25));

        let layout = timeline.layout(today());
        assert_eq!(layout.summary.visible, 10);
        assert_eq!(layout.summary.filtered, 25);
        assert!(layout.has_more);

        timeline.load_more();
        let layout = timeline.layout(today());
        assert_eq!(layout.summary.visible, 20);
        assert!(layout.has_more);

        timeline.load_more();
        let layout = timeline.layout(today());
        assert_eq!(layout.summary.visible, 25);
        assert_eq!(layout.rows().count(), 25);
        assert!(!layout.has_more);
    }

    #[test]
    fn test_show_pages_jumps_ahead() {
        let mut timeline = march_timeline();
        timeline.set_group_by(GroupBy::None);
        timeline.replace_tasks(march_tasks(25));

        timeline.show_pages(2);
        let layout = timeline.layout(today());
        assert_eq!(layout.summary.visible, 20);
        assert!(layout.has_more);

        timeline.show_pages(usize::MAX);
        let layout = timeline.layout(today());
        assert_eq!(layout.summary.visible, 25);
        assert!(!layout.has_more);
    }

    #[test]
    fn test_changing_window_resets_pagination() {
        let mut timeline = march_timeline();
        timeline.replace_tasks(march_tasks(25));
        timeline.load_more();
        assert_eq!(timeline.visible_count(), 20);

        timeline.go_forward();
        assert_eq!(timeline.visible_count(), 10);

        timeline.load_more();
        timeline.set_granularity(Granularity::Quarter);
        assert_eq!(timeline.visible_count(), 10);
    }

    #[test]
    fn test_anchor_move_within_same_window_keeps_pagination() {
        let mut timeline = march_timeline();
        timeline.load_more();
        timeline.go_to_today(date(2025, 3, 28));
        assert_eq!(timeline.visible_count(), 20);
    }

    #[test]
    fn test_regrouping_keeps_pagination() {
        let mut timeline = march_timeline();
        timeline.load_more();
        timeline.set_group_by(GroupBy::Status);
        assert_eq!(timeline.visible_count(), 20);
    }

    #[test]
    fn test_navigation_moves_window() {
        let mut timeline = march_timeline();
        timeline.go_back();
        assert_eq!(timeline.window().start, date(2025, 2, 1));
        timeline.go_forward();
        timeline.go_forward();
        assert_eq!(timeline.window().start, date(2025, 4, 1));

        timeline.go_to_today(today());
        assert_eq!(timeline.window().start, date(2025, 3, 1));
    }

    #[test]
    fn test_layout_excludes_tasks_outside_window() {
        let mut timeline = march_timeline();
        timeline.replace_tasks(vec![
            RawTask::new("in", "In")
                .with_start(date(2025, 3, 3))
                .with_due(date(2025, 3, 5)),
            RawTask::new("out", "Out")
                .with_start(date(2025, 5, 3))
                .with_due(date(2025, 5, 5)),
        ]);
        let layout = timeline.layout(today());
        let ids: Vec<&str> = layout.rows().map(|r| r.task.id.as_str()).collect();
        assert_eq!(ids, vec!["in"]);
        assert_eq!(layout.summary.filtered, 1);
    }

    #[test]
    fn test_layout_sorts_by_start() {
        let mut timeline = march_timeline();
        timeline.set_group_by(GroupBy::None);
        timeline.replace_tasks(vec![
            RawTask::new("late", "Late").with_start(date(2025, 3, 20)),
            RawTask::new("early", "Early").with_start(date(2025, 3, 2)),
        ]);
        let layout = timeline.layout(today());
        let ids: Vec<&str> = layout.rows().map(|r| r.task.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn test_layout_keeps_upstream_order_when_sorting_disabled() {
        let mut config = TimelineConfig::new(date(2025, 3, 10)).with_group_by(GroupBy::None);
        config.sort_by_start = false;
        let mut timeline = Timeline::new(config).unwrap();
        timeline.replace_tasks(vec![
            RawTask::new("late", "Late").with_start(date(2025, 3, 20)),
            RawTask::new("early", "Early").with_start(date(2025, 3, 2)),
        ]);
        let layout = timeline.layout(today());
        let ids: Vec<&str> = layout.rows().map(|r| r.task.id.as_str()).collect();
        assert_eq!(ids, vec!["late", "early"]);
    }

    #[test]
    fn test_summary_counts() {
        let mut timeline = march_timeline();
        timeline.replace_tasks(vec![
            RawTask::new("late", "Late")
                .with_start(date(2025, 3, 1))
                .with_due(date(2025, 3, 4)),
            RawTask::new("busy", "Busy")
                .with_start(date(2025, 3, 10))
                .with_due(date(2025, 3, 20))
                .with_status(Status::InProgress),
            RawTask::new("done", "Done")
                .with_start(date(2025, 3, 1))
                .with_due(date(2025, 3, 2))
                .with_status(Status::Done),
        ]);
        let summary = timeline.layout(today()).summary;
        assert_eq!(summary.filtered, 3);
        assert_eq!(summary.visible, 3);
        assert_eq!(summary.overdue, 1);
        assert_eq!(summary.in_progress, 1);
    }

    #[test]
    fn test_geometry_and_tone_attached_to_rows() {
        let config = TimelineConfig::new(date(2025, 3, 10)).with_direction(Direction::Rtl);
        let mut timeline = Timeline::new(config).unwrap();
        timeline.replace_tasks(vec![
            RawTask::new("a", "A")
                .with_start(date(2025, 3, 3))
                .with_due(date(2025, 3, 20))
                .with_priority(Priority::Critical),
        ]);
        let layout = timeline.layout(today());
        let row = layout.rows().next().unwrap();
        assert_eq!(row.geometry.offset, 2 * 40);
        assert_eq!(row.geometry.width, 18 * 40);
        assert_eq!(row.geometry.edge, Edge::Right);
        assert_eq!(row.tone, BarTone::Critical);
        assert_eq!(layout.day_width, 40);
        assert_eq!(layout.today_offset, Some(14 * 40 + 19));
    }

    #[test]
    fn test_today_offset_hidden_outside_window() {
        let mut timeline = march_timeline();
        let layout = timeline.layout(date(2025, 6, 1));
        assert_eq!(layout.today_offset, None);
    }

    #[test]
    fn test_empty_task_list() {
        let mut timeline = march_timeline();
        let layout = timeline.layout(today());
        assert!(layout.groups.is_empty());
        assert!(!layout.has_more);
        assert_eq!(layout.summary, Summary::default());
        assert_eq!(layout.window.days.len(), 31);
    }

    #[test]
    fn test_replace_tasks_invalidates_cache() {
        let mut timeline = march_timeline();
        timeline.replace_tasks(march_tasks(3));
        assert_eq!(timeline.layout(today()).summary.filtered, 3);

        timeline.replace_tasks(march_tasks(5));
        assert_eq!(timeline.layout(today()).summary.filtered, 5);
    }

    #[test]
    fn test_new_today_recomputes_overdue() {
        let mut timeline = march_timeline();
        timeline.replace_tasks(vec![
            RawTask::new("a", "A")
                .with_start(date(2025, 3, 3))
                .with_due(date(2025, 3, 5)),
        ]);
        assert_eq!(timeline.layout(date(2025, 3, 4)).summary.overdue, 0);
        assert_eq!(timeline.layout(date(2025, 3, 6)).summary.overdue, 1);
    }

    #[test]
    fn test_grouped_layout_conserves_tasks() {
        let mut timeline = march_timeline();
        timeline.set_group_by(GroupBy::Priority);
        let tasks = march_tasks(12)
            .into_iter()
            .enumerate()
            .map(|(i, t)| t.with_priority(Priority::ORDERED[i % 4].clone()))
            .collect();
        timeline.replace_tasks(tasks);
        let layout = timeline.layout(today());
        let keys: Vec<&str> = layout.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["critical", "high", "medium", "low"]);
        assert_eq!(layout.rows().count(), 10);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TimelineConfig::new(today()).with_page_sizes(0, 10);
        assert!(Timeline::new(config).is_err());
    }
}
