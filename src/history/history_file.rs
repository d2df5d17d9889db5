//! Presence-history file I/O

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::model::HistoryDocument;

/// Load a history document from disk
///
/// # Arguments
/// * `path` - JSON file whose top level is an array of day entries
///
/// # Returns
/// The day entries in file order
pub fn load_history(path: &Path) -> Result<HistoryDocument> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open history file {}", path.display()))?;
    let history: HistoryDocument = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse history file {}", path.display()))?;

    info!(path = %path.display(), days = history.len(), "Loaded history");
    Ok(history)
}

/// Write a history document as pretty-printed JSON (two-space indent)
pub fn save_history(path: &Path, history: &HistoryDocument) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, history)
        .with_context(|| format!("Failed to write output file {}", path.display()))?;
    writeln!(writer)?;
    writer.flush()?;

    debug!(path = %path.display(), days = history.len(), "Saved history");
    Ok(())
}

/// Copy the original file to `backup` before anything is overwritten
///
/// An existing file at `backup` is never replaced.
pub fn backup_history(source: &Path, backup: &Path) -> Result<()> {
    let mut original = File::open(source)
        .with_context(|| format!("Failed to open history file {}", source.display()))?;
    let mut target = match OpenOptions::new().write(true).create_new(true).open(backup) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            bail!("Backup file {} already exists, refusing to overwrite it", backup.display())
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to create backup file {}", backup.display()))
        }
    };

    io::copy(&mut original, &mut target).with_context(|| {
        format!(
            "Failed to back up {} to {}",
            source.display(),
            backup.display()
        )
    })?;
    target.flush()?;

    debug!(source = %source.display(), backup = %backup.display(), "Backup created");
    Ok(())
}

/// `presence-history.json` -> `presence-history-cleaned.json`, next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    sibling_with_suffix(input, "cleaned")
}

/// `presence-history.json` -> `presence-history-backup-20240101T080000Z.json`,
/// next to the input, stamped with `now`
pub fn default_backup_path(input: &Path, now: DateTime<Utc>) -> PathBuf {
    let suffix = format!("backup-{}", now.format("%Y%m%dT%H%M%SZ"));
    sibling_with_suffix(input, &suffix)
}

fn sibling_with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "presence-history".to_string());
    let name = match input.extension() {
        Some(ext) => format!("{}-{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}-{}.json", stem, suffix),
    };
    input.with_file_name(name)
}
