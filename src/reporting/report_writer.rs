//! Report writing functionality

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::deduplicator::DedupReport;

/// Write a cleanup report to a file
///
/// # Arguments
/// * `output_path` - Path to the report file
/// * `input` - History file that was cleaned
/// * `cleaned` - Where the cleaned file was written, if it was
/// * `report` - Counts gathered by the deduplicator
pub fn write_report(
    output_path: &Path,
    input: &Path,
    cleaned: Option<&Path>,
    report: &DedupReport,
) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create report file {}", output_path.display()))?;
    let mut file = BufWriter::new(file);

    writeln!(file, "Presence History Cleanup Report")?;
    writeln!(file, "===============================")?;
    writeln!(file, "Generated: {}", Utc::now().to_rfc3339())?;
    writeln!(file, "Input: {}", input.display())?;
    match cleaned {
        Some(path) => writeln!(file, "Cleaned file: {}", path.display())?,
        None => writeln!(file, "Cleaned file: (not written)")?,
    }
    writeln!(file)?;

    writeln!(file, "Summary Statistics:")?;
    writeln!(file, "-------------------")?;
    writeln!(file, "  Total dates processed: {}", report.total_days)?;
    writeln!(file, "  Dates with presences: {}", report.days.len())?;
    writeln!(file, "  Dates with duplicates: {}", report.fixed_days().count())?;
    writeln!(file, "  Presences before: {}", report.total_before())?;
    writeln!(file, "  Presences after: {}", report.total_after())?;
    writeln!(file, "  Duplicates removed: {}", report.removed())?;

    if report.total_before() > 0 {
        let dup_pct = (report.removed() as f64 / report.total_before() as f64) * 100.0;
        writeln!(file, "  Duplicate rate: {:.2}%", dup_pct)?;
    }
    writeln!(file)?;

    if report.has_duplicates() {
        writeln!(file, "Breakdown By Date:")?;
        writeln!(file, "------------------")?;
        for day in report.fixed_days() {
            writeln!(
                file,
                "  {}: {} -> {} (removed {})",
                day.date,
                day.before,
                day.after,
                day.removed()
            )?;
        }
    } else {
        writeln!(file, "No duplicates found.")?;
    }

    file.flush()?;
    Ok(())
}
