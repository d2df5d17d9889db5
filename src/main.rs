use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use presence_dedup::prelude::*;

#[derive(Parser)]
#[command(name = "presence_dedup")]
#[command(about = "Remove duplicate presences from a presence-history JSON file", long_about = None)]
struct Cli {
    /// History file to clean
    #[arg(default_value = "presence-history.json")]
    input: PathBuf,

    /// Where to write the cleaned history (default: <input>-cleaned.json)
    #[arg(short, long, conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Overwrite the input file with the cleaned history
    #[arg(long)]
    in_place: bool,

    /// Backup file for the original history (default: <input>-backup-<UTC timestamp>.json).
    /// An existing file is never overwritten.
    #[arg(long, conflicts_with = "no_backup")]
    backup: Option<PathBuf>,

    /// Do not copy the original file before writing
    #[arg(long)]
    no_backup: bool,

    /// Also drop presences of the same person less than this many milliseconds apart
    #[arg(long, default_value_t = 0)]
    tolerance_ms: u64,

    /// Report duplicates without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Write a plain-text cleanup report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Verbose output (logs every removed presence)
    #[arg(short, long)]
    verbose: bool,

    /// Run in batch mode (no progress bar)
    #[arg(long)]
    batch: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    print_banner();

    let backup = if cli.no_backup {
        BackupMode::Disabled
    } else {
        cli.backup.map(BackupMode::At).unwrap_or_default()
    };
    let options = RunOptions {
        input: cli.input,
        output: cli.output,
        in_place: cli.in_place,
        backup,
        tolerance_ms: cli.tolerance_ms,
        dry_run: cli.dry_run,
        report: cli.report,
        show_progress: !cli.batch,
    };

    let outcome = run(&options)?;

    if outcome.report.has_duplicates() && !options.dry_run {
        println!();
        println!("✅ Removed {} duplicate presence(s)", outcome.report.removed());
    }
    let written = outcome.written();
    if !written.is_empty() {
        println!("Files written:");
        if let Some(ref backup) = outcome.backup {
            println!("   {} (backup of original)", backup.display());
        }
        if let Some(ref output) = outcome.output {
            println!("   {} (cleaned version)", output.display());
        }
        if let Some(ref report_file) = outcome.report_file {
            println!("   {} (report)", report_file.display());
        }
    }

    Ok(())
}
