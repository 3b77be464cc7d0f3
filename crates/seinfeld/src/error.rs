//! Seinfeld Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction: driver errors are attached as children of the kind
//! that describes them.
//!
//! Lookups that find nothing are *not* errors; they return `Ok(None)`.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A query error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for query operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The database path does not point to an existing file.
    #[display("database file does not exist: {}", _0.display())]
    Configuration(#[error(not(source))] PathBuf),
    #[display("database error")]
    Database,
    /// The dataset is inconsistent: a quote belongs to an episode that does
    /// not exist.
    #[display("quote {quote} references missing episode {episode}")]
    Integrity { quote: u64, episode: u64 },
    /// A stored value cannot be represented in the domain model.
    #[display("invalid data: {_0}")]
    InvalidData(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
