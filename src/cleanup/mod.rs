//! End-to-end cleanup of one history file

pub mod run;

pub use run::{run, BackupMode, RunOptions, RunOutcome};
