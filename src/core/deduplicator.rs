//! Duplicate presence removal
//!
//! Within each day, the first presence seen for a given identity key is kept
//! and later ones are dropped. Kept presences stay in their original order.

use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use super::error::Result;
use super::identity::PresenceKey;
use super::model::{DayEntry, HistoryDocument};

/// Before/after presence counts for one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayStats {
    pub date: String,
    pub before: usize,
    pub after: usize,
}

impl DayStats {
    pub fn removed(&self) -> usize {
        self.before - self.after
    }

    pub fn is_fixed(&self) -> bool {
        self.before != self.after
    }
}

/// Counts gathered over a whole document, for reporting only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupReport {
    /// Number of day entries in the document, with or without presences
    pub total_days: usize,
    /// One entry per day that had a non-empty presences sequence
    pub days: Vec<DayStats>,
}

impl DedupReport {
    pub fn total_before(&self) -> usize {
        self.days.iter().map(|d| d.before).sum()
    }

    pub fn total_after(&self) -> usize {
        self.days.iter().map(|d| d.after).sum()
    }

    pub fn removed(&self) -> usize {
        self.total_before() - self.total_after()
    }

    pub fn fixed_days(&self) -> impl Iterator<Item = &DayStats> {
        self.days.iter().filter(|d| d.is_fixed())
    }

    pub fn has_duplicates(&self) -> bool {
        self.removed() > 0
    }
}

/// Cleaned document together with its report
#[derive(Debug, Clone)]
pub struct Cleaned {
    pub history: HistoryDocument,
    pub report: DedupReport,
}

/// Removes duplicate presences day by day
#[derive(Debug, Clone, Copy, Default)]
pub struct Deduplicator {
    tolerance_micros: i64,
}

impl Deduplicator {
    /// Exact identity: same normalized names and same instant
    pub fn new() -> Self {
        Self::default()
    }

    /// Also treat a presence as a duplicate when a kept presence of the same
    /// person lies strictly less than `tolerance_ms` milliseconds away
    ///
    /// # Arguments
    /// * `tolerance_ms` - Window in milliseconds; 0 gives the exact rule
    pub fn with_tolerance(tolerance_ms: u64) -> Self {
        let millis = i64::try_from(tolerance_ms).unwrap_or(i64::MAX);
        Self {
            tolerance_micros: millis.saturating_mul(1_000),
        }
    }

    /// Deduplicate one sequence of presences
    ///
    /// # Arguments
    /// * `day` - Label of the day, used in errors and logs
    /// * `presences` - Raw presence values, in document order
    ///
    /// # Returns
    /// Clones of the kept presences, untouched and in their original order
    pub fn dedup_presences(&self, day: &str, presences: &[Value]) -> Result<Vec<Value>> {
        // kept timestamps per (nom, prenom)
        let mut seen: HashMap<(String, String), Vec<i64>> = HashMap::new();
        let mut kept = Vec::with_capacity(presences.len());

        for (index, presence) in presences.iter().enumerate() {
            let key = PresenceKey::from_value(presence, day, index)?;
            let times = seen.entry((key.nom, key.prenom)).or_default();

            if times.iter().any(|&t| self.matches(t, key.timestamp)) {
                debug!(day, index, presence = %presence, "Removed duplicate presence");
                continue;
            }

            times.push(key.timestamp);
            kept.push(presence.clone());
        }

        Ok(kept)
    }

    /// Deduplicate a single day entry in place
    ///
    /// The entry is only rewritten once every presence has been keyed; on
    /// error it is left as it was.
    ///
    /// # Returns
    /// `None` when the entry has no non-empty presences sequence and was left alone
    pub fn dedup_day(&self, entry: &mut DayEntry) -> Result<Option<DayStats>> {
        let date = entry.date_label();
        let Some(presences) = entry.presences_mut() else {
            return Ok(None);
        };
        if presences.is_empty() {
            return Ok(None);
        }

        let before = presences.len();
        let kept = self.dedup_presences(&date, presences)?;
        let after = kept.len();
        *presences = kept;

        Ok(Some(DayStats { date, before, after }))
    }

    /// Deduplicate every day of a document
    pub fn dedup_document(&self, history: HistoryDocument) -> Result<Cleaned> {
        self.dedup_document_with(history, |_| {})
    }

    /// Same as [`Deduplicator::dedup_document`], calling `on_day` after each
    /// day entry with its stats (or `None` if it was passed through)
    pub fn dedup_document_with<F>(&self, history: HistoryDocument, mut on_day: F) -> Result<Cleaned>
    where
        F: FnMut(Option<&DayStats>),
    {
        let mut report = DedupReport {
            total_days: history.len(),
            days: Vec::new(),
        };
        let mut cleaned = Vec::with_capacity(history.len());

        for mut entry in history {
            let stats = self.dedup_day(&mut entry)?;
            on_day(stats.as_ref());
            if let Some(stats) = stats {
                report.days.push(stats);
            }
            cleaned.push(entry);
        }

        Ok(Cleaned {
            history: cleaned,
            report,
        })
    }

    fn matches(&self, kept: i64, candidate: i64) -> bool {
        kept == candidate || kept.abs_diff(candidate) < self.tolerance_micros.unsigned_abs()
    }
}

/// Deduplicate with the exact identity rule
pub fn deduplicate(history: HistoryDocument) -> Result<Cleaned> {
    Deduplicator::new().dedup_document(history)
}
