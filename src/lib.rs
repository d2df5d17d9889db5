//! Presence history deduplication library
//!
//! Loads a presence-history document, removes duplicate presences inside each
//! day and reports what was removed.

pub mod cleanup;
pub mod core;
pub mod history;
pub mod reporting;

pub use crate::core::deduplicator;
pub use crate::history::history_file;
pub use crate::reporting::report_writer;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cleanup::run::{run, BackupMode, RunOptions, RunOutcome};
    pub use crate::core::deduplicator::{deduplicate, Cleaned, DayStats, DedupReport, Deduplicator};
    pub use crate::core::error::DedupError;
    pub use crate::core::identity::{normalize_name, parse_timestamp, PresenceKey};
    pub use crate::core::model::{DayEntry, HistoryDocument, Presence};
    pub use crate::history::history_file::{
        backup_history, default_backup_path, default_output_path, load_history, save_history,
    };
    pub use crate::reporting::console::{format_day_fix, print_banner, print_summary};
    pub use crate::reporting::report_writer::write_report;
}
