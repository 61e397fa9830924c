//! The `BuildRuntime` trait and supporting error types.
//!
//! The composition engine runs once per host build invocation, synchronously.
//! All file access goes through `BuildRuntime` so tests and alternative hosts
//! can substitute their own file layer.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A package-qualified reference resolved against neither candidate path
    #[error("path does not exist: {reference}\ntested path 1: {}\ntested path 2: {}",
        tried.first().map(|p| p.display().to_string()).unwrap_or_default(),
        tried.get(1).map(|p| p.display().to_string()).unwrap_or_default())]
    PathResolution {
        reference: String,
        tried: Vec<PathBuf>,
    },

    /// SASS compilation failed
    #[error("SASS compilation failed: {0}")]
    Sass(String),

    /// Script compilation failed
    #[error("script compilation failed: {0}")]
    Script(String),
}

/// File system access for a single build invocation.
///
/// Implementations are expected to be synchronous and blocking; the pipeline
/// is run-to-completion and has no internal parallelism.
pub trait BuildRuntime: Send + Sync {
    /// Read a file's contents as a UTF-8 string.
    fn file_read_string(&self, path: &Path) -> RuntimeResult<String>;

    /// Write string contents to a file, creating parent directories as needed.
    fn file_write_string(&self, path: &Path, contents: &str) -> RuntimeResult<()>;

    /// Check whether a path exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Check whether a path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Check whether a path exists at all (file or directory).
    fn path_exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    /// List the entries of a directory.
    fn dir_list(&self, path: &Path) -> RuntimeResult<Vec<PathBuf>>;
}
