//! Test infrastructure for integration tests
//!
//! Provides isolated tasks-file setup/teardown and CLI command builders.
//! Each test gets its own temp directory to ensure no shared state.

use chrono::NaiveDate;
use docket_cli::commands::{LayoutCommand, OutputFormat, ViewArgs, WindowCommand};
use docket_timeline::{Granularity, GroupBy};
use std::path::PathBuf;

/// Test context owning a temp directory with a tasks file
pub struct TestContext {
    pub temp_dir: PathBuf,
    pub tasks_path: PathBuf,
}

impl TestContext {
    /// Create a context whose tasks file holds `json`.
    ///
    /// Each call creates a uniquely named temp directory using process ID,
    /// thread ID, and nanosecond timestamp to guarantee isolation.
    pub fn with_tasks(json: &str) -> Self {
        let temp_dir = std::env::temp_dir().join(format!(
            "docket-integration-test-{}-{:?}-{}",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&temp_dir).unwrap();

        let tasks_path = temp_dir.join("tasks.json");
        std::fs::write(&tasks_path, json).unwrap();

        Self {
            temp_dir,
            tasks_path,
        }
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        // Auto-cleanup on drop
        let _ = std::fs::remove_dir_all(&self.temp_dir);
    }
}

// =============================================================================
// Command Builder Helpers
// =============================================================================

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// View options anchored on `anchor`, printed as a table.
pub fn view(granularity: Granularity, anchor: NaiveDate) -> ViewArgs {
    ViewArgs {
        granularity,
        anchor: Some(anchor),
        today: None,
        format: OutputFormat::Table,
    }
}

/// Create a LayoutCommand with default optional fields filled in.
pub fn layout_cmd(ctx: &TestContext, granularity: Granularity, anchor: NaiveDate) -> LayoutCommand {
    LayoutCommand {
        tasks: ctx.tasks_path.clone(),
        view: view(granularity, anchor),
        group_by: GroupBy::Assignee,
        rtl: false,
        pages: 1,
        page_size: 10,
        no_sort: false,
    }
}

/// Create a WindowCommand.
#[allow(dead_code)]
pub fn window_cmd(granularity: Granularity, anchor: NaiveDate) -> WindowCommand {
    WindowCommand {
        view: view(granularity, anchor),
    }
}

/// A tasks file with `count` tasks starting on consecutive March 2025 days.
#[allow(dead_code)]
pub fn march_tasks_json(count: u32) -> String {
    let tasks: Vec<String> = (0..count)
        .map(|i| {
            let day = 1 + i % 27;
            format!(
                r#"{{"id": "t{:02}", "title": "Task {}", "startDate": "2025-03-{:02}", "dueDate": "2025-03-{:02}"}}"#,
                i,
                i,
                day,
                day + 1
            )
        })
        .collect();
    format!("[{}]", tasks.join(","))
}
