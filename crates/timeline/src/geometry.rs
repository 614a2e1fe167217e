//! Bar geometry for timeline rows.
//!
//! Geometry is measured in the same units as the day width (pixels in the
//! web view, columns in a terminal). Offsets are measured from the leading
//! edge of the grid, which is the left edge for left-to-right text and the
//! right edge for right-to-left text.

use crate::calendar::{Granularity, Window};
use crate::error::{TimelineError, TimelineResult};
use crate::models::Priority;
use crate::resolve::ResolvedTask;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Day width for week windows.
pub const DAY_WIDTH_WEEK: u32 = 100;

/// Day width for month windows.
pub const DAY_WIDTH_MONTH: u32 = 40;

/// Day width for quarter windows.
pub const DAY_WIDTH_QUARTER: u32 = 16;

/// Narrowest bar that is still drawn, so short or clipped bars stay visible.
pub const MIN_BAR_WIDTH: u32 = 32;

/// Text direction of the surrounding layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    /// Edge that offsets are measured from.
    pub fn leading_edge(&self) -> Edge {
        match self {
            Direction::Ltr => Edge::Left,
            Direction::Rtl => Edge::Right,
        }
    }
}

impl FromStr for Direction {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ltr" => Ok(Direction::Ltr),
            "rtl" => Ok(Direction::Rtl),
            _ => Err(TimelineError::InvalidDirection {
                value: s.to_string(),
            }),
        }
    }
}

/// Grid edge an offset is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Left,
    Right,
}

/// Width constants for bar layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryConfig {
    pub day_width_week: u32,
    pub day_width_month: u32,
    pub day_width_quarter: u32,
    pub min_bar_width: u32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            day_width_week: DAY_WIDTH_WEEK,
            day_width_month: DAY_WIDTH_MONTH,
            day_width_quarter: DAY_WIDTH_QUARTER,
            min_bar_width: MIN_BAR_WIDTH,
        }
    }
}

impl GeometryConfig {
    /// Width of one day column at the given granularity.
    pub fn day_width(&self, granularity: Granularity) -> u32 {
        match granularity {
            Granularity::Week => self.day_width_week,
            Granularity::Month => self.day_width_month,
            Granularity::Quarter => self.day_width_quarter,
        }
    }

    /// Check that every width is positive.
    ///
    /// # Errors
    ///
    /// Returns `TimelineError::ZeroValue` naming the first zero field.
    pub fn validate(&self) -> TimelineResult<()> {
        let fields = [
            ("day_width_week", self.day_width_week),
            ("day_width_month", self.day_width_month),
            ("day_width_quarter", self.day_width_quarter),
            ("min_bar_width", self.min_bar_width),
        ];
        match fields.iter().find(|(_, value)| *value == 0) {
            Some(&(field, _)) => Err(TimelineError::ZeroValue { field }),
            None => Ok(()),
        }
    }
}

/// Position and size of a task bar.
///
/// Invariant: `width >= min_bar_width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BarGeometry {
    /// Distance from `edge` to the bar's leading side.
    pub offset: u32,
    pub width: u32,
    pub edge: Edge,
}

/// Compute a task's bar, clipped to the window.
///
/// The visible span runs from the later of the task start and the window
/// start, to the earlier of the day after the task end and the day after
/// the window end. Bars shorter than `min_bar_width` (including clipped
/// spans of zero or negative length) are widened to it.
pub fn bar_geometry(
    task: &ResolvedTask,
    window: &Window,
    day_width: u32,
    min_bar_width: u32,
    direction: Direction,
) -> BarGeometry {
    let total_days = window.len() as i64;
    let day_width = i64::from(day_width);

    let start_offset_days = window.days_from_start(task.start_date).max(0);
    let end_offset_days = (window.days_from_start(task.end_date) + 1).min(total_days);
    let bar_days = end_offset_days - start_offset_days;

    let width = (bar_days * day_width).max(i64::from(min_bar_width));
    let offset = start_offset_days * day_width;

    BarGeometry {
        offset: saturate(offset),
        width: saturate(width),
        edge: direction.leading_edge(),
    }
}

/// Offset of the 2-unit "today" line, if today is inside the window.
///
/// The line sits in the middle of today's cell:
/// `index * day_width + day_width / 2 - 1`.
pub fn today_marker(window: &Window, today: chrono::NaiveDate, day_width: u32) -> Option<u32> {
    let day_width = i64::from(day_width);
    window
        .today_index(today)
        .map(|index| saturate(index as i64 * day_width + day_width / 2 - 1))
}

/// Visual emphasis of a bar, for the renderer to map to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarTone {
    Overdue,
    Critical,
    High,
    Medium,
    Low,
    /// Unrecognized priority.
    Neutral,
}

impl BarTone {
    /// Overdue tasks take precedence over their priority.
    pub fn for_task(task: &ResolvedTask) -> Self {
        if task.is_overdue {
            return BarTone::Overdue;
        }
        match task.priority {
            Priority::Critical => BarTone::Critical,
            Priority::High => BarTone::High,
            Priority::Medium => BarTone::Medium,
            Priority::Low => BarTone::Low,
            Priority::Other(_) => BarTone::Neutral,
        }
    }
}

fn saturate(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}
