//! Error taxonomy for the indexing engine.
//!
//! Per-file indexing failures are deliberately *not* represented here: they
//! are isolated into [`crate::engine::repo::FileIndexOutcome`] records so a
//! single bad file never aborts its sibling tasks. This enum covers the
//! failures that do surface to the caller.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The user-supplied path filter is not a valid regular expression.
    /// No partial results are returned in this case.
    #[error("invalid path filter: {0}")]
    InvalidPathFilter(#[from] regex::Error),

    /// Repository-level failure: enumerating candidate files failed before
    /// any file task was dispatched.
    #[error("file enumeration failed under {}: {source}", root.display())]
    Enumeration {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directly indexed document exceeds the configured size limit.
    #[error("document {path} is {size} bytes, over the {limit} byte limit")]
    DocumentTooLarge { path: String, size: u64, limit: u64 },
}

pub type Result<T> = std::result::Result<T, EngineError>;
