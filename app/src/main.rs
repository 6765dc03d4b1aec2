//! Bounded Get
//!
//! Reads a fixed 200-element array at a user-supplied index. The read is
//! total: any index outside `[0, 200)` yields `0`, including indices that
//! came out of overflowing "sanitization" arithmetic.
//!
//! # Usage
//!
//! ```bash
//! # Read one element
//! bounded-get 199
//!
//! # Replay the sanitize-then-read scenarios with wrapping arithmetic
//! bounded-get 2147483647 --scenarios --overflow wrapping
//!
//! # Use a 64-bit index
//! bounded-get --wide 9223372036854775807
//!
//! # Load defaults from a config file
//! bounded-get 5 --config bounded-get.toml
//! ```

mod arith;
mod config;
mod index;
mod scenario;

use anyhow::Result;
use bounded_accessor::BoundedArray;
use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use arith::OverflowMode;
use config::{FileConfig, FillArg, Overrides, Settings};
use index::{parse_index, Index};
use scenario::{get_scenario, run_all, scenario_names, Scenario, ScenarioReport};

const USAGE: &str = "Usage: bounded-get <INDEX>  (e.g. bounded-get 2147483647)";

/// Bounded Get
///
/// Bounds-checked array reads that survive overflowing index arithmetic
#[derive(Parser, Debug)]
#[command(name = "bounded-get")]
#[command(version = "0.1.0")]
#[command(about = "Bounds-checked array reads that survive overflowing index arithmetic")]
struct Cli {
    /// Index to read (e.g. 2147483647)
    #[arg(allow_negative_numbers = true)]
    index: Option<String>,

    /// Initial array content
    #[arg(short, long, value_enum)]
    fill: Option<FillArg>,

    /// Parse the index as a 64-bit integer
    #[arg(short, long)]
    wide: bool,

    /// Replay every sanitize-then-read scenario
    #[arg(short, long)]
    scenarios: bool,

    /// Replay only the named scenario (repeatable)
    #[arg(long = "scenario", value_name = "NAME")]
    only: Vec<String>,

    /// Overflow behaviour for scenario arithmetic
    #[arg(short, long, value_enum)]
    overflow: Option<OverflowMode>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// How a run ended, mapped onto the process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    /// Read performed, exit 0
    Done,
    /// Missing or invalid index, exit 1
    Usage,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Done => ExitCode::SUCCESS,
            Status::Usage => ExitCode::from(1),
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap's message already ends with its own usage block
            let _ = err.print();
            return Ok(match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => Status::Usage.into(),
            });
        }
    };

    // Initialize logger
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    Ok(run(cli)?.into())
}

fn run(cli: Cli) -> Result<Status> {
    let file = match &cli.config {
        Some(path) => {
            let file = FileConfig::load(path)?;
            log::info!("Loaded config from {}", path.display());
            file
        }
        None => FileConfig::default(),
    };

    let settings = Settings::resolve(
        file,
        Overrides {
            fill: cli.fill,
            overflow: cli.overflow,
            wide: cli.wide,
            scenarios: cli.scenarios || !cli.only.is_empty(),
        },
    );
    log::debug!("{:?}", settings);

    let selected = select_scenarios(&cli.only)?;

    let index = match parse_index(cli.index.as_deref(), settings.wide) {
        Ok(index) => index,
        Err(err) => {
            log::debug!("{}", err);
            println!("{}", USAGE);
            return Ok(Status::Usage);
        }
    };

    let arr = BoundedArray::new(settings.fill);
    let value = match index {
        Index::Narrow(i) => arr.get(i),
        Index::Wide(i) => arr.get_wide(i),
    };
    println!("get({}) = {}", index, value);

    if !settings.scenarios {
        return Ok(Status::Done);
    }

    println!(
        "\n{} Replaying scenarios for b={} ({} array, {} i{} arithmetic)",
        "[*]".cyan().bold(),
        index,
        settings.fill,
        settings.overflow,
        index.bits()
    );

    let reports: Vec<ScenarioReport> = match selected {
        Some(list) => list
            .iter()
            .map(|s| s.run(&arr, index, settings.overflow))
            .collect(),
        None => run_all(&arr, index, settings.overflow),
    };

    for report in &reports {
        report.print_report();
    }

    let reads = reports.iter().filter(|r| r.did_read()).count();
    println!(
        "\n{} {} of {} scenarios read the array, none outside its bounds",
        "[OK]".green().bold(),
        reads,
        reports.len()
    );

    Ok(Status::Done)
}

/// Resolve `--scenario` names. `None` means run all of them.
fn select_scenarios(names: &[String]) -> Result<Option<Vec<&'static Scenario>>> {
    if names.is_empty() {
        return Ok(None);
    }

    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        let scenario = get_scenario(name).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown scenario: {}. Available: {}",
                name,
                scenario_names().join(", ")
            )
        })?;
        selected.push(scenario);
    }

    Ok(Some(selected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_negative_index() {
        let cli = Cli::try_parse_from(["bounded-get", "-2147483648"]).unwrap();
        assert_eq!(cli.index.as_deref(), Some("-2147483648"));
        assert!(!cli.wide);
    }

    #[test]
    fn test_cli_options() {
        let cli = Cli::try_parse_from([
            "bounded-get",
            "2147483647",
            "--fill",
            "zero-based",
            "--overflow",
            "wrapping",
            "--scenario",
            "range-sanitized",
            "-s",
        ])
        .unwrap();

        assert_eq!(cli.fill, Some(FillArg::ZeroBased));
        assert_eq!(cli.overflow, Some(OverflowMode::Wrapping));
        assert_eq!(cli.only, vec!["range-sanitized".to_string()]);
        assert!(cli.scenarios);
    }

    #[test]
    fn test_cli_missing_index_parses() {
        // Missing index is reported by parse_index, not clap
        let cli = Cli::try_parse_from(["bounded-get"]).unwrap();
        assert!(cli.index.is_none());
    }

    #[test]
    fn test_cli_rejects_bad_mode() {
        let err = Cli::try_parse_from(["bounded-get", "1", "--overflow", "trap"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    fn try_run(args: &[&str]) -> Result<Status> {
        let argv = std::iter::once("bounded-get").chain(args.iter().copied());
        run(Cli::try_parse_from(argv).unwrap())
    }

    fn run_args(args: &[&str]) -> Status {
        try_run(args).unwrap()
    }

    #[test]
    fn test_run_reports_usage_for_bad_index() {
        assert_eq!(run_args(&[]), Status::Usage);
        assert_eq!(run_args(&["abc"]), Status::Usage);
        assert_eq!(run_args(&["12abc"]), Status::Usage);
        assert_eq!(run_args(&["2147483648"]), Status::Usage);
        assert_eq!(run_args(&["--wide", "9223372036854775808"]), Status::Usage);
    }

    #[test]
    fn test_run_succeeds_for_any_integer() {
        assert_eq!(run_args(&["199"]), Status::Done);
        assert_eq!(run_args(&["-2147483648"]), Status::Done);
        assert_eq!(run_args(&["--wide", "2147483648"]), Status::Done);
    }

    #[test]
    fn test_run_replays_scenarios_at_both_widths() {
        assert_eq!(run_args(&["2147483647", "-s", "-o", "wrapping"]), Status::Done);
        assert_eq!(
            run_args(&["--wide", "-s", "9223372036854775807", "-o", "checked"]),
            Status::Done
        );
        assert_eq!(
            run_args(&["5", "--scenario", "range-sanitized", "-f", "zero-based"]),
            Status::Done
        );
    }

    #[test]
    fn test_run_fails_on_unknown_scenario_or_config() {
        assert!(try_run(&["1", "--scenario", "bogus"]).is_err());

        let err = try_run(&["1", "--config", "/nonexistent/bounded-get.toml"]).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_cli_extra_positional_carries_clap_usage() {
        let err = Cli::try_parse_from(["bounded-get", "1", "2"]).unwrap_err();
        assert!(err.use_stderr());
        assert!(err.to_string().contains("Usage:"));
    }

    #[test]
    fn test_select_scenarios() {
        assert!(select_scenarios(&[]).unwrap().is_none());

        let picked = select_scenarios(&["far-offset".to_string(), "direct".to_string()])
            .unwrap()
            .unwrap();
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0].name, "far-offset");

        let err = select_scenarios(&["bogus".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Unknown scenario: bogus"));
    }
}
