use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use docket_cli::commands::Command;
use docket_cli::error::CliError;

/// Docket - lay out tasks on a timeline
#[derive(Parser)]
#[command(name = "docket")]
#[command(version = "0.1.0")]
#[command(about = "Lay out tasks on a Gantt-style timeline", long_about = None)]
struct Args {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Command>,
}

/// Initialize logging based on RUST_LOG environment variable
///
/// Examples:
/// - `RUST_LOG=trace` - show all trace logs
/// - `RUST_LOG=debug` - show debug and above
/// - `RUST_LOG=docket_timeline=debug` - debug logs from the layout engine only
/// - `RUST_LOG=error` - show error only
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}

fn main() {
    init_logging();

    if let Err(e) = run_app() {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

/// Main application logic - separated for testability
fn run_app() -> Result<(), CliError> {
    let args = Args::parse();
    let today = chrono::Local::now().date_naive();
    run_with_args(&args, today)
}

/// Run the application with the given arguments
fn run_with_args(args: &Args, today: chrono::NaiveDate) -> Result<(), CliError> {
    match &args.command {
        Some(cmd) => {
            let result = cmd.execute(today)?;
            println!("{}", result);
        }
        None => {
            println!("Welcome to Docket!");
            println!("Use 'docket --help' for usage information.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_cli::commands::layout::DOCKET_TASKS_ENV;
    use serial_test::serial;
    use std::env;
    use std::path::PathBuf;

    fn today() -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from(["docket"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn test_run_with_args_no_command() {
        let args = Args { command: None };
        let result = run_with_args(&args, today());
        assert!(result.is_ok(), "run_with_args failed: {:?}", result.err());
    }

    #[test]
    fn test_run_with_window_command() {
        let args = Args::try_parse_from(["docket", "window", "--granularity", "week"]).unwrap();
        let result = run_with_args(&args, today());
        assert!(result.is_ok(), "Window command failed: {:?}", result.err());
    }

    #[test]
    fn test_args_layout_with_all_options() {
        let args = Args::try_parse_from([
            "docket",
            "layout",
            "--tasks",
            "tasks.json",
            "--granularity",
            "quarter",
            "--anchor",
            "2025-01-15",
            "--today",
            "2025-02-01",
            "--group-by",
            "priority",
            "--rtl",
            "--pages",
            "3",
            "--page-size",
            "5",
            "--no-sort",
            "--format",
            "json",
        ])
        .unwrap();
        match args.command {
            Some(Command::Layout(cmd)) => {
                assert_eq!(cmd.pages, 3);
                assert_eq!(cmd.page_size, 5);
                assert!(cmd.rtl);
                assert!(cmd.no_sort);
            }
            _ => panic!("Expected layout command"),
        }
    }

    #[test]
    fn test_run_with_missing_tasks_file() {
        let args = Args::try_parse_from([
            "docket",
            "layout",
            "--tasks",
            "/definitely/not/here.json",
        ])
        .unwrap();
        let result = run_with_args(&args, today());
        match result {
            Err(CliError::ReadTasks { path, .. }) => {
                assert_eq!(path, PathBuf::from("/definitely/not/here.json"));
            }
            other => panic!("Expected ReadTasks error, got {:?}", other),
        }
    }

    #[test]
    fn test_layout_invalid_group_by() {
        let result = Args::try_parse_from([
            "docket",
            "layout",
            "--tasks",
            "tasks.json",
            "--group-by",
            "team",
        ]);
        match result {
            Err(e) => {
                let err = e.to_string();
                assert!(
                    err.contains("grouping") || err.contains("team"),
                    "Error should mention the grouping argument, got: {}",
                    err
                );
            }
            Ok(_) => panic!("Expected error for invalid group-by"),
        }
    }

    #[test]
    #[serial]
    fn test_tasks_path_from_env_var() {
        let original = env::var(DOCKET_TASKS_ENV).ok();
        // SAFETY: Test is serialized and we restore the original value
        unsafe { env::set_var(DOCKET_TASKS_ENV, "/env/tasks.json") };

        let args = Args::try_parse_from(["docket", "layout"]).unwrap();
        match args.command {
            Some(Command::Layout(cmd)) => {
                assert_eq!(cmd.tasks, PathBuf::from("/env/tasks.json"));
            }
            _ => panic!("Expected layout command"),
        }

        // SAFETY: Test is serialized and we're restoring to original state
        unsafe {
            match original {
                Some(val) => env::set_var(DOCKET_TASKS_ENV, val),
                None => env::remove_var(DOCKET_TASKS_ENV),
            }
        }
    }

    #[test]
    #[serial]
    fn test_cli_tasks_overrides_env_var() {
        let original = env::var(DOCKET_TASKS_ENV).ok();
        // SAFETY: Test is serialized and we restore the original value
        unsafe { env::set_var(DOCKET_TASKS_ENV, "/env/tasks.json") };

        let args = Args::try_parse_from(["docket", "layout", "--tasks", "/cli/tasks.json"]).unwrap();
        match args.command {
            Some(Command::Layout(cmd)) => {
                assert_eq!(cmd.tasks, PathBuf::from("/cli/tasks.json"));
            }
            _ => panic!("Expected layout command"),
        }

        // SAFETY: Test is serialized and we're restoring to original state
        unsafe {
            match original {
                Some(val) => env::set_var(DOCKET_TASKS_ENV, val),
                None => env::remove_var(DOCKET_TASKS_ENV),
            }
        }
    }

    #[test]
    #[serial]
    fn test_layout_requires_tasks_without_env_var() {
        let original = env::var(DOCKET_TASKS_ENV).ok();
        // SAFETY: Test is serialized and we restore the original value
        unsafe { env::remove_var(DOCKET_TASKS_ENV) };

        let result = Args::try_parse_from(["docket", "layout"]);
        assert!(result.is_err());

        // SAFETY: Test is serialized and we're restoring to original state
        if let Some(val) = original {
            unsafe { env::set_var(DOCKET_TASKS_ENV, val) };
        }
    }
}
