//! Command-line interface for vhdmp-detect
//!
//! Loads a JSON batch of Windows event-log records, evaluates each against
//! the VHD/VHDX mount detection rule, prints per-record and summary results,
//! and writes the same results to a timestamped report file.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{error, info};

use vhdmp_detect::{
    evaluate_batch, init_tracing, load_records, DetectionReport, Rule, VhdMountMatcher,
};

/// Validates event-log batches against the VHD/VHDX mount detection rule
#[derive(Parser, Debug)]
#[command(name = "vhdmp-detect")]
#[command(version = vhdmp_detect::VERSION)]
#[command(about = "Tests Windows event logs against the VHD/VHDX mount Sigma rule (CVE-2025-24985)", long_about = None)]
struct Cli {
    /// JSON file containing an array of event-log records
    #[arg(value_name = "LOG_FILE", default_value = "combined_sample_logs.json")]
    log_file: PathBuf,

    /// Directory the results report is written into
    #[arg(short = 'o', long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Enable JSON structured logging
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    let started = Local::now();

    let rule = Rule::vhd_mount().context("embedded rule failed to load")?;

    // Input failures abort before any matching
    let records = match load_records(&cli.log_file) {
        Ok(records) => records,
        Err(e) => {
            error!("could not load log file '{}': {}", cli.log_file.display(), e);
            process::exit(1);
        }
    };
    println!(
        "Successfully loaded {} log entries from {}",
        records.len(),
        cli.log_file.display()
    );

    let (outcomes, summary) = evaluate_batch(&VhdMountMatcher::new(), &records);

    let report = DetectionReport::new(
        &rule.title,
        cli.log_file.display().to_string(),
        started,
        &outcomes,
        summary,
    );
    report.print_console();

    // The console report above stands even if persisting fails
    match report.write_to_dir(&cli.output_dir) {
        Ok(path) => {
            info!(matches = summary.matches, total = summary.total, "run complete");
            println!("\nResults saved to {}", path.display());
        }
        Err(e) => {
            error!("could not save results: {}", e);
            process::exit(1);
        }
    }

    Ok(())
}
