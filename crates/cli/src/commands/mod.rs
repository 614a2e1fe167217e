//! CLI commands for Docket
//!
//! This module contains all subcommand implementations for the docket CLI.

pub mod layout;
pub mod window;

pub use layout::LayoutCommand;
pub use window::WindowCommand;

use crate::error::CliResult;
use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use docket_timeline::{Granularity, GroupBy};

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lay out tasks from a JSON file on a timeline
    Layout(LayoutCommand),
    /// Show the calendar window for a granularity and anchor date
    Window(WindowCommand),
}

impl Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `today` - The current date, used unless the command overrides it
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the command execution fails.
    pub fn execute(&self, today: NaiveDate) -> CliResult<String> {
        match self {
            Command::Layout(cmd) => cmd.execute(today),
            Command::Window(cmd) => cmd.execute(today),
        }
    }
}

/// How command output is printed
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned text tables
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Window and output options shared by every command
#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Window granularity (week, month, quarter)
    #[arg(short, long, default_value = "month", value_parser = parse_granularity)]
    pub granularity: Granularity,

    /// Any date inside the window to show (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub anchor: Option<NaiveDate>,

    /// Date treated as today (defaults to the local date)
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl ViewArgs {
    /// The effective today: the `--today` override or `fallback`.
    pub fn today_or(&self, fallback: NaiveDate) -> NaiveDate {
        self.today.unwrap_or(fallback)
    }

    /// The effective anchor: `--anchor`, else `today`.
    pub fn anchor_or(&self, today: NaiveDate) -> NaiveDate {
        self.anchor.unwrap_or(today)
    }
}

/// Parse a granularity string into a Granularity enum
pub(crate) fn parse_granularity(s: &str) -> Result<Granularity, String> {
    s.parse().map_err(|e: docket_timeline::TimelineError| e.to_string())
}

/// Parse a grouping string into a GroupBy enum
pub(crate) fn parse_group_by(s: &str) -> Result<GroupBy, String> {
    s.parse().map_err(|e: docket_timeline::TimelineError| e.to_string())
}

/// Parse a YYYY-MM-DD date
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}'. Expected YYYY-MM-DD", s))
}
