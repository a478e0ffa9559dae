//! File enumeration and reading collaborators.
//!
//! The engine core never walks the filesystem itself: it consumes already
//! loaded [`SourceFile`] values, or a [`FileSource`] implementation that
//! produces them. [`FsFileSource`] is the default, built on the `ignore`
//! walker so VCS ignore rules apply.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Extensions treated as code files by the default source.
pub const CODE_EXTENSIONS: [&str; 10] =
    ["java", "js", "ts", "py", "cpp", "c", "h", "cs", "go", "rs"];

/// A loaded source file, ready for indexing.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path-like document key
    pub path: String,
    pub content: String,
    /// Modification time as epoch milliseconds
    pub modified_ms: u64,
    /// Size in bytes
    pub size: u64,
}

impl SourceFile {
    /// Build a file record directly from in-memory content, stamping it with
    /// the given modification time.
    pub fn from_content(path: impl Into<String>, content: impl Into<String>, modified_ms: u64) -> Self {
        let content = content.into();
        let size = content.len() as u64;
        Self {
            path: path.into(),
            content,
            modified_ms,
            size,
        }
    }
}

/// Enumeration and reading of candidate code files.
pub trait FileSource: Send + Sync {
    /// List candidate code files under `root`.
    fn list_code_files(&self, root: &Path) -> io::Result<Vec<PathBuf>>;

    /// Load a single file with its modification metadata.
    fn read_file(&self, path: &Path) -> io::Result<SourceFile>;
}

/// Filesystem-backed source honoring gitignore rules and hidden-file
/// filtering.
#[derive(Debug, Default)]
pub struct FsFileSource;

impl FileSource for FsFileSource {
    fn list_code_files(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", root.display()),
            ));
        }

        let walker = ignore::WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(_) => continue,
            };
            let path = entry.path();
            if path.is_file() && has_code_extension(path) {
                files.push(path.to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }

    fn read_file(&self, path: &Path) -> io::Result<SourceFile> {
        let content = fs::read_to_string(path)?;
        let metadata = fs::metadata(path)?;
        let modified_ms = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Ok(SourceFile {
            path: path.to_string_lossy().into_owned(),
            size: content.len() as u64,
            content,
            modified_ms,
        })
    }
}

fn has_code_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            CODE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}
