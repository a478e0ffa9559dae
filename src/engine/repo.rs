//! Outcome types for repository-level indexing.
//!
//! Each file task resolves independently: a failed file never aborts its
//! siblings, and the aggregate simply counts what happened.

use serde::Serialize;

/// Result of one file's indexing task.
#[derive(Debug, Clone, Serialize)]
pub struct FileIndexOutcome {
    pub path: String,
    pub success: bool,
    /// Set when delta indexing found the file unchanged; skips count as
    /// success.
    pub skipped: bool,
    pub error: Option<String>,
}

impl FileIndexOutcome {
    pub fn indexed(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            success: true,
            skipped: false,
            error: None,
        }
    }

    pub fn skipped(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            success: true,
            skipped: true,
            error: None,
        }
    }

    pub fn failed(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            success: false,
            skipped: false,
            error: Some(error.into()),
        }
    }
}

/// Aggregate result of indexing a repository.
#[derive(Debug, Clone, Serialize)]
pub struct RepoIndexOutcome {
    pub total_files: usize,
    pub successful_files: usize,
    pub skipped_files: usize,
    pub elapsed_ms: u64,
    /// Per-file results, in dispatch order
    pub files: Vec<FileIndexOutcome>,
}

impl RepoIndexOutcome {
    pub fn aggregate(files: Vec<FileIndexOutcome>, elapsed_ms: u64) -> Self {
        let successful_files = files.iter().filter(|f| f.success).count();
        let skipped_files = files.iter().filter(|f| f.skipped).count();
        Self {
            total_files: files.len(),
            successful_files,
            skipped_files,
            elapsed_ms,
            files,
        }
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &FileIndexOutcome> {
        self.files.iter().filter(|f| !f.success)
    }
}
