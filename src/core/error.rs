//! Errors raised while deduplicating a history document

use thiserror::Error;

/// A presence that cannot be keyed. Any of these aborts the whole run.
#[derive(Error, Debug)]
pub enum DedupError {
    #[error("{day}: presence #{index} has no `date` field")]
    MissingTimestamp { day: String, index: usize },

    #[error("{day}: presence #{index} has an unparsable date {value:?}")]
    InvalidTimestamp {
        day: String,
        index: usize,
        value: String,
    },

    #[error("{day}: presence #{index} is malformed: {source}")]
    MalformedPresence {
        day: String,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, DedupError>;
