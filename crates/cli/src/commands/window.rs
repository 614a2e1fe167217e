//! Window command for inspecting the calendar window
//!
//! Implements the `docket window` command: shows the days and week
//! segments a granularity and anchor date produce.

use super::{OutputFormat, ViewArgs};
use crate::error::CliResult;
use crate::output::format_window;
use chrono::NaiveDate;
use clap::Args;
use docket_timeline::geometry::GeometryConfig;
use docket_timeline::{DayCell, Granularity, WeekSegment, Window};
use serde::Serialize;

/// Show the calendar window
#[derive(Debug, Args)]
pub struct WindowCommand {
    #[command(flatten)]
    pub view: ViewArgs,
}

/// Header data for one window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowReport {
    pub granularity: Granularity,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub day_width: u32,
    pub total_width: u64,
    pub today_index: Option<usize>,
    pub week_segments: Vec<WeekSegment>,
    pub days: Vec<DayCell>,
}

impl WindowReport {
    pub fn new(granularity: Granularity, anchor: NaiveDate, today: NaiveDate) -> Self {
        let window = Window::compute(granularity, anchor);
        let day_width = GeometryConfig::default().day_width(granularity);
        Self {
            granularity,
            start: window.start,
            end: window.end,
            day_width,
            total_width: window.total_width(day_width),
            today_index: window.today_index(today),
            days: window.day_cells(today),
            week_segments: window.week_segments,
        }
    }
}

impl WindowCommand {
    /// Execute the window command.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Encode` if JSON output cannot be encoded.
    pub fn execute(&self, today: NaiveDate) -> CliResult<String> {
        let today = self.view.today_or(today);
        let report = WindowReport::new(self.view.granularity, self.view.anchor_or(today), today);
        match self.view.format {
            OutputFormat::Table => Ok(format_window(&report)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        }
    }
}
