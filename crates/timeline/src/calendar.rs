//! Calendar windows for the timeline header.
//!
//! Computes the visible date range for a granularity and anchor date, the
//! day-by-day grid inside it, and the week segments used by month and
//! quarter headers. Weeks start on Sunday throughout.

use crate::error::TimelineError;
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Zoom level of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One Sunday-to-Saturday week.
    Week,
    /// One calendar month.
    #[default]
    Month,
    /// Three consecutive calendar months.
    Quarter,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
        }
    }

    /// Move the anchor one unit back (1 week, 1 month or 3 months).
    pub fn step_back(&self, anchor: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Week => anchor.checked_sub_days(Days::new(7)),
            Granularity::Month => anchor.checked_sub_months(Months::new(1)),
            Granularity::Quarter => anchor.checked_sub_months(Months::new(3)),
        }
        .unwrap_or(anchor)
    }

    /// Move the anchor one unit forward.
    pub fn step_forward(&self, anchor: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Week => anchor.checked_add_days(Days::new(7)),
            Granularity::Month => anchor.checked_add_months(Months::new(1)),
            Granularity::Quarter => anchor.checked_add_months(Months::new(3)),
        }
        .unwrap_or(anchor)
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            "quarter" => Ok(Granularity::Quarter),
            _ => Err(TimelineError::InvalidGranularity {
                value: s.to_string(),
            }),
        }
    }
}

/// A run of consecutive window days sharing one week number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSegment {
    /// Sunday-start week number of the days in this run.
    pub week_number: u32,
    /// Index into `Window::days` of the first day (inclusive).
    pub start_index: usize,
    /// Index into `Window::days` of the last day (inclusive).
    pub end_index: usize,
    pub day_count: usize,
}

impl WeekSegment {
    fn new(week_number: u32, start_index: usize, end_index: usize) -> Self {
        Self {
            week_number,
            start_index,
            end_index,
            day_count: end_index - start_index + 1,
        }
    }
}

/// Header metadata for one day column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub index: usize,
    pub is_today: bool,
    /// Saturday or Sunday.
    pub is_weekend: bool,
}

/// The visible date range and its per-day and per-week breakdown.
///
/// `days` is contiguous and ascending with `days[0] == start` and
/// `days[last] == end`. `week_segments` partitions the indices of `days`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<NaiveDate>,
    pub week_segments: Vec<WeekSegment>,
}

impl Window {
    /// Compute the window for a granularity around an anchor date.
    ///
    /// Week segments are only built for month and quarter windows; a week
    /// window is a single week and its header has no week breakdown.
    pub fn compute(granularity: Granularity, anchor: NaiveDate) -> Self {
        let (start, end) = match granularity {
            Granularity::Week => {
                let start = start_of_week(anchor);
                (start, start.checked_add_days(Days::new(6)).unwrap_or(start))
            }
            Granularity::Month => {
                let start = first_of_month(anchor);
                (start, last_day_after_months(start, 1))
            }
            Granularity::Quarter => {
                let start = first_of_month(anchor);
                (start, last_day_after_months(start, 3))
            }
        };

        Self::from_range(start, end, granularity != Granularity::Week)
    }

    /// Build a window over an explicit inclusive range.
    ///
    /// An `end` before `start` yields an empty window.
    pub fn from_range(start: NaiveDate, end: NaiveDate, with_segments: bool) -> Self {
        let days: Vec<NaiveDate> = start.iter_days().take_while(|day| *day <= end).collect();
        let week_segments = if with_segments {
            build_week_segments(&days)
        } else {
            Vec::new()
        };

        Self {
            start,
            end,
            days,
            week_segments,
        }
    }

    /// Number of day columns.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Whether `date` lies within `[start, end]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Signed whole days from the window start to `date`.
    pub fn days_from_start(&self, date: NaiveDate) -> i64 {
        (date - self.start).num_days()
    }

    /// Index of `today` within the window, if it is visible.
    pub fn today_index(&self, today: NaiveDate) -> Option<usize> {
        let offset = self.days_from_start(today);
        if offset >= 0 && (offset as usize) < self.days.len() {
            Some(offset as usize)
        } else {
            None
        }
    }

    /// Per-day header cells.
    pub fn day_cells(&self, today: NaiveDate) -> Vec<DayCell> {
        self.days
            .iter()
            .enumerate()
            .map(|(index, &date)| DayCell {
                date,
                index,
                is_today: date == today,
                is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            })
            .collect()
    }

    /// Total width of the grid for a given day width.
    pub fn total_width(&self, day_width: u32) -> u64 {
        self.days.len() as u64 * u64::from(day_width)
    }
}

/// The Sunday on or before `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Week number with Sunday-start weeks, where week 1 is the week that
/// contains January 1st.
///
/// The last days of December share week 1 of the following year when the
/// week straddles New Year.
pub fn sunday_week_number(date: NaiveDate) -> u32 {
    let week_start = start_of_week(date);

    if let Some(next_jan1) = NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
        && week_start >= start_of_week(next_jan1)
    {
        return 1;
    }

    let first_week = NaiveDate::from_ymd_opt(date.year(), 1, 1)
        .map(start_of_week)
        .unwrap_or(week_start);

    ((week_start - first_week).num_days() / 7 + 1) as u32
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the span of `months` months beginning at `start`.
fn last_day_after_months(start: NaiveDate, months: u32) -> NaiveDate {
    start
        .checked_add_months(Months::new(months))
        .and_then(|next| next.pred_opt())
        .unwrap_or(start)
}

fn build_week_segments(days: &[NaiveDate]) -> Vec<WeekSegment> {
    let Some(&first) = days.first() else {
        return Vec::new();
    };

    let mut segments = Vec::new();
    let mut segment_start = 0;
    let mut current_week = sunday_week_number(first);

    for (idx, &day) in days.iter().enumerate().skip(1) {
        let week = sunday_week_number(day);
        if week != current_week {
            segments.push(WeekSegment::new(current_week, segment_start, idx - 1));
            segment_start = idx;
            current_week = week;
        }
    }
    segments.push(WeekSegment::new(current_week, segment_start, days.len() - 1));

    segments
}
