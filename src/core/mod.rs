//! Deduplication core: data model, identity keys and the keep-first rule

pub mod deduplicator;
pub mod error;
pub mod identity;
pub mod model;

pub use deduplicator::{deduplicate, Cleaned, DayStats, DedupReport, Deduplicator};
pub use error::DedupError;
