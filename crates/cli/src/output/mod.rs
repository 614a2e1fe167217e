//! Output formatting module for Docket
//!
//! Provides table formatting and display utilities for CLI output.

use crate::commands::window::WindowReport;
use docket_timeline::{TimelineLayout, TimelineRow};

/// Maximum width for the title column before truncation
const MAX_TITLE_WIDTH: usize = 30;

/// Column headers of the row table
const ROW_HEADERS: [&str; 9] = [
    "ID", "Title", "Start", "End", "Status", "Priority", "Offset", "Width", "[!]",
];

/// Truncate a string to the specified maximum width, adding ellipsis if needed.
fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let head: String = s.chars().take(max_width - 3).collect();
        format!("{}...", head)
    }
}

/// Widest of the header and every value, in characters.
fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
}

/// The display cells of one row, in `ROW_HEADERS` order.
fn row_cells(row: &TimelineRow) -> [String; 9] {
    let task = &row.task;
    [
        task.id.clone(),
        truncate(&task.title, MAX_TITLE_WIDTH),
        task.start_date.to_string(),
        task.end_date.to_string(),
        task.status.as_str().to_string(),
        task.priority.as_str().to_string(),
        row.geometry.offset.to_string(),
        row.geometry.width.to_string(),
        format_overdue(task.is_overdue).to_string(),
    ]
}

/// Join cells left-aligned to the given widths.
fn format_line(cells: &[&str], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

/// Format a timeline layout as grouped, aligned tables.
///
/// Produces output in the format:
/// ```text
/// Timeline: month 2025-03-01..2025-03-31 (day width 40, ltr)
/// Today: offset 579
///
/// Alice (2)
/// ID  Title        Start       End         Status       Priority  Offset  Width  [!]
/// --  -----------  ----------  ----------  -----------  --------  ------  -----  ---
/// t1  Write specs  2025-03-03  2025-03-07  in_progress  high      80      200
///
/// Showing 2 of 2 tasks (0 overdue, 1 in progress)
/// ```
///
/// Column widths are shared by every group so swimlanes line up. The
/// `[!]` column marks overdue tasks.
pub fn format_layout(layout: &TimelineLayout) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Timeline: {} {}..{} (day width {}, {})\n",
        layout.granularity,
        layout.window.start,
        layout.window.end,
        layout.day_width,
        layout.direction.as_str(),
    ));
    match layout.today_offset {
        Some(offset) => output.push_str(&format!("Today: offset {}\n", offset)),
        None => output.push_str("Today: outside window\n"),
    }

    if layout.groups.is_empty() {
        output.push_str("\nNo tasks in this window.\n");
    } else {
        let cells: Vec<[String; 9]> = layout.rows().map(row_cells).collect();
        let widths: Vec<usize> = ROW_HEADERS
            .iter()
            .enumerate()
            .map(|(i, header)| column_width(header, cells.iter().map(|c| c[i].as_str())))
            .collect();
        let separators: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        let separators: Vec<&str> = separators.iter().map(String::as_str).collect();

        let mut rows = cells.iter();
        for group in &layout.groups {
            output.push('\n');
            output.push_str(&format!("{} ({})\n", group.label, group.rows.len()));
            output.push_str(&format_line(&ROW_HEADERS, &widths));
            output.push('\n');
            output.push_str(&format_line(&separators, &widths));
            output.push('\n');

            for row in rows.by_ref().take(group.rows.len()) {
                let row: Vec<&str> = row.iter().map(String::as_str).collect();
                output.push_str(&format_line(&row, &widths));
                output.push('\n');
            }
        }
    }

    let summary = &layout.summary;
    output.push_str(&format!(
        "\nShowing {} of {} tasks ({} overdue, {} in progress)",
        summary.visible, summary.filtered, summary.overdue, summary.in_progress
    ));
    if layout.has_more {
        output.push_str("\nMore tasks available. Use --pages to show more.");
    }

    output
}

/// Format a window report as a week table followed by the day columns.
///
/// Produces output in the format:
/// ```text
/// Window: month 2025-03-01..2025-03-31 (31 days, width 1240)
///
/// Week  First       Last        Days
/// ----  ----------  ----------  ----
/// 9     2025-03-01  2025-03-01  1
/// ```
///
/// Week windows have no week breakdown and list their days only.
pub fn format_window(report: &WindowReport) -> String {
    let mut output = format!(
        "Window: {} {}..{} ({} days, width {})\n",
        report.granularity,
        report.start,
        report.end,
        report.days.len(),
        report.total_width,
    );

    if !report.week_segments.is_empty() {
        let headers = ["Week", "First", "Last", "Days"];
        let cells: Vec<[String; 4]> = report
            .week_segments
            .iter()
            .filter_map(|segment| {
                let first = report.days.get(segment.start_index)?;
                let last = report.days.get(segment.end_index)?;
                Some([
                    segment.week_number.to_string(),
                    first.date.to_string(),
                    last.date.to_string(),
                    segment.day_count.to_string(),
                ])
            })
            .collect();
        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| column_width(header, cells.iter().map(|c| c[i].as_str())))
            .collect();
        let separators: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        let separators: Vec<&str> = separators.iter().map(String::as_str).collect();

        output.push('\n');
        output.push_str(&format_line(&headers, &widths));
        output.push('\n');
        output.push_str(&format_line(&separators, &widths));
        output.push('\n');
        for row in &cells {
            let row: Vec<&str> = row.iter().map(String::as_str).collect();
            output.push_str(&format_line(&row, &widths));
            output.push('\n');
        }
    }

    output.push('\n');
    let days: Vec<String> = report.days.iter().map(format_day).collect();
    output.push_str(&days.join(" "));

    output
}

/// Day-of-month label, marking today with `*` and weekends with `~`.
fn format_day(day: &docket_timeline::DayCell) -> String {
    use chrono::Datelike;

    let marker = if day.is_today {
        "*"
    } else if day.is_weekend {
        "~"
    } else {
        ""
    };
    format!("{}{}", day.date.day(), marker)
}

/// Format the overdue indicator.
fn format_overdue(is_overdue: bool) -> &'static str {
    if is_overdue { "[!]" } else { "" }
}
