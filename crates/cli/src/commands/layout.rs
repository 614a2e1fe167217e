//! Layout command for laying out tasks on a timeline
//!
//! Implements the `docket layout` command: reads task records from a JSON
//! file, runs them through the timeline engine and prints the resulting
//! rows grouped into swimlanes.

use super::{OutputFormat, ViewArgs, parse_group_by};
use crate::error::{CliError, CliResult};
use crate::output::format_layout;
use chrono::NaiveDate;
use clap::Args;
use docket_timeline::{
    Direction, GroupBy, RawTask, Timeline, TimelineConfig, TimelineLayout,
    pagination::DEFAULT_PAGE_SIZE,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the default tasks file
pub const DOCKET_TASKS_ENV: &str = "DOCKET_TASKS";

/// Lay out tasks from a JSON file
#[derive(Debug, Args)]
pub struct LayoutCommand {
    /// Path to a JSON file of task records (can also be set via DOCKET_TASKS env var)
    #[arg(long, env = DOCKET_TASKS_ENV)]
    pub tasks: PathBuf,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Group rows by (none, assignee, priority, status)
    #[arg(long, default_value = "assignee", value_parser = parse_group_by)]
    pub group_by: GroupBy,

    /// Lay bars out right-to-left
    #[arg(long)]
    pub rtl: bool,

    /// Number of pages to show
    #[arg(long, default_value_t = 1)]
    pub pages: usize,

    /// Tasks per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Keep the file's task order instead of sorting by start date
    #[arg(long)]
    pub no_sort: bool,
}

/// A tasks file holding an object with a `tasks` array
#[derive(Deserialize)]
struct WrappedTasks {
    tasks: Vec<RawTask>,
}

/// Read task records from `path`.
///
/// The file holds either a JSON array of tasks or an object with a
/// `tasks` array; the first non-blank character picks which one is decoded,
/// so decode errors keep their line and column.
///
/// # Errors
///
/// Returns `CliError::ReadTasks` if the file cannot be read and
/// `CliError::ParseTasks` if it is not task JSON.
pub fn load_tasks(path: &Path) -> CliResult<Vec<RawTask>> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::ReadTasks {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = if contents.trim_start().starts_with('{') {
        serde_json::from_str::<WrappedTasks>(&contents).map(|file| file.tasks)
    } else {
        serde_json::from_str::<Vec<RawTask>>(&contents)
    };
    let tasks = decoded.map_err(|source| CliError::ParseTasks {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), tasks = tasks.len(), "loaded tasks file");
    Ok(tasks)
}

impl LayoutCommand {
    /// Execute the layout command.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the tasks file cannot be loaded, the options
    /// are out of range, or JSON output cannot be encoded.
    pub fn execute(&self, today: NaiveDate) -> CliResult<String> {
        let layout = self.build_layout(today)?;
        match self.view.format {
            OutputFormat::Table => Ok(format_layout(&layout)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&layout)?),
        }
    }

    /// Load the tasks and compute the layout without formatting it.
    pub fn build_layout(&self, today: NaiveDate) -> CliResult<TimelineLayout> {
        let today = self.view.today_or(today);
        let tasks = load_tasks(&self.tasks)?;

        let direction = if self.rtl {
            Direction::Rtl
        } else {
            Direction::Ltr
        };
        let mut config = TimelineConfig::new(self.view.anchor_or(today))
            .with_granularity(self.view.granularity)
            .with_group_by(self.group_by)
            .with_direction(direction)
            .with_page_sizes(self.page_size, self.page_size);
        config.sort_by_start = !self.no_sort;

        let mut timeline = Timeline::new(config)?;
        timeline.replace_tasks(tasks);
        timeline.show_pages(self.pages);
        Ok(timeline.layout(today))
    }
}
