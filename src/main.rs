//! `pressplan`: read machine descriptions, print the minimum total presses.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::exit;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use pressplan_core::{parse_machines, total_presses, SolveOptions};

#[derive(Parser, Debug)]
#[command(
    name = "pressplan",
    version,
    about = "Exact minimum-press planner for counter/button machines"
)]
struct Cli {
    /// Input file with one machine per line; reads stdin when omitted.
    input: Option<PathBuf>,
    /// Solve machines on the rayon thread pool.
    #[arg(long)]
    parallel: bool,
    /// Print the full report as JSON instead of the bare total.
    #[arg(long)]
    json: bool,
}

fn main() {
    init_logging();
    match run(Cli::parse()) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("{:#}", err);
            exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let text = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    let machines = parse_machines(&text)?;
    let options = SolveOptions { parallel: cli.parallel, cancel: None };
    let report = total_presses(&machines, &options)?;

    if cli.json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(report.total.to_string())
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_flags_parse() {
        let cli = Cli::try_parse_from(["pressplan", "input.txt", "--json", "--parallel"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("input.txt")));
        assert!(cli.json);
        assert!(cli.parallel);
    }

    #[test]
    fn test_run_prints_total_for_file_input() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[.##.] (0) (1) (0,1) {{3,5}}").unwrap();
        writeln!(file, "{{4}} (0)").unwrap();
        let cli = Cli { input: Some(file.path().to_path_buf()), parallel: false, json: false };
        assert_eq!(run(cli).unwrap(), "9");
    }

    #[test]
    fn test_run_emits_json_report() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{2,2}} (0) (1)").unwrap();
        let cli = Cli { input: Some(file.path().to_path_buf()), parallel: true, json: true };
        let output = run(cli).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["total"], 4);
        assert_eq!(value["machines"], serde_json::json!([4]));
    }

    #[test]
    fn test_run_reports_parse_error_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{1}} (0)").unwrap();
        writeln!(file, "no machine here").unwrap();
        let cli = Cli { input: Some(file.path().to_path_buf()), parallel: false, json: false };
        let err = run(cli).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_run_reports_unsolvable_machine() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{1,2}} (0,1)").unwrap();
        let cli = Cli { input: Some(file.path().to_path_buf()), parallel: false, json: false };
        let err = run(cli).unwrap_err();
        assert!(format!("{:#}", err).contains("machine 0 is unsolvable"));
    }
}
