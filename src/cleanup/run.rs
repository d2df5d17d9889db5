//! Load, deduplicate, back up and save a history file

use anyhow::{Context, Result};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::deduplicator::{DedupReport, Deduplicator};
use crate::history::history_file::{
    backup_history, default_backup_path, default_output_path, load_history, save_history,
};
use crate::reporting::console::{format_day_fix, print_summary};
use crate::reporting::report_writer::write_report;

/// Where the original file is copied before the cleaned one is written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BackupMode {
    /// `<input>-backup-<UTC timestamp>.json` next to the input
    #[default]
    Timestamped,
    At(PathBuf),
    Disabled,
}

/// Options for one cleanup run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub input: PathBuf,
    /// Defaults to `<input>-cleaned.json`; ignored with `in_place`
    pub output: Option<PathBuf>,
    pub in_place: bool,
    pub backup: BackupMode,
    pub tolerance_ms: u64,
    pub dry_run: bool,
    pub report: Option<PathBuf>,
    pub show_progress: bool,
}

/// What a run found and which files it wrote
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: DedupReport,
    pub backup: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub report_file: Option<PathBuf>,
}

impl RunOutcome {
    /// Every file written, in the order it was written
    pub fn written(&self) -> Vec<&Path> {
        [&self.backup, &self.output, &self.report_file]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect()
    }
}

/// Clean one history file
///
/// Nothing but the optional report is written when no duplicate is found or
/// when `dry_run` is set. Otherwise the backup is taken before the cleaned
/// file is written.
pub fn run(options: &RunOptions) -> Result<RunOutcome> {
    let history = load_history(&options.input)?;
    println!("📁 Loaded: {}", options.input.display());
    println!("📊 Total date entries: {}\n", history.len());

    let progress = if options.show_progress {
        let pb = ProgressBar::new(history.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} dates {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let cleaned = Deduplicator::with_tolerance(options.tolerance_ms)
        .dedup_document_with(history, |stats| {
            if let Some(stats) = stats.filter(|s| s.is_fixed()) {
                let line = format_day_fix(stats);
                if options.show_progress {
                    progress.println(line);
                } else {
                    println!("{}", line);
                }
            }
            progress.inc(1);
        })
        .with_context(|| format!("Failed to clean {}", options.input.display()))?;
    progress.finish_and_clear();
    println!();

    print_summary(&cleaned.report);

    let mut outcome = RunOutcome {
        report: cleaned.report,
        backup: None,
        output: None,
        report_file: None,
    };

    if !outcome.report.has_duplicates() || options.dry_run {
        if options.dry_run {
            println!("Dry run: no file written.");
        } else {
            println!("✨ No duplicates found! The file is already clean.");
        }
        write_report_file(options, &mut outcome)?;
        return Ok(outcome);
    }

    let output = if options.in_place {
        options.input.clone()
    } else {
        options
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&options.input))
    };

    let backup = match &options.backup {
        BackupMode::Timestamped => Some(default_backup_path(&options.input, Utc::now())),
        BackupMode::At(path) => Some(path.clone()),
        BackupMode::Disabled => None,
    };

    if let Some(backup) = backup {
        println!("💾 Creating backup: {}", backup.display());
        backup_history(&options.input, &backup)?;
        outcome.backup = Some(backup);
    }

    println!("💾 Writing cleaned file: {}", output.display());
    save_history(&output, &cleaned.history)?;
    outcome.output = Some(output);

    write_report_file(options, &mut outcome)?;

    info!(
        removed = outcome.report.removed(),
        files = outcome.written().len(),
        "Cleanup complete"
    );
    Ok(outcome)
}

fn write_report_file(options: &RunOptions, outcome: &mut RunOutcome) -> Result<()> {
    if let Some(ref report_path) = options.report {
        write_report(
            report_path,
            &options.input,
            outcome.output.as_deref(),
            &outcome.report,
        )?;
        outcome.report_file = Some(report_path.clone());
    }
    Ok(())
}
