//! Error types for the composition engine.
//!
//! All errors are fatal and propagation-only: the engine runs at build time,
//! and any inconsistency should abort the host build rather than produce a
//! partially correct artifact.

use thiserror::Error;
use trellis_runtime::RuntimeError;

use crate::settings::SETTINGS_FILE;

/// Errors that can occur while composing assets
#[derive(Debug, Error)]
pub enum ComposeError {
    /// More than one settings descriptor found in the candidate file set
    #[error("more than one {SETTINGS_FILE} found in the project; exactly one is allowed")]
    DuplicateSettingsFile,

    /// The settings descriptor is not valid JSON (or not the expected shape)
    #[error("failed to parse {SETTINGS_FILE}: {0}")]
    MalformedSettings(#[source] serde_json::Error),

    /// A style import resolved against neither the vendored root nor the
    /// settings directory
    #[error("unresolved style import: {message}")]
    UnresolvedImport { message: String },

    /// The style compiler failed
    #[error("style compilation failed: {message}")]
    StyleCompilation { message: String },

    /// The script compiler failed
    #[error("script compilation failed: {message}")]
    ScriptCompilation { message: String },

    /// A vendored framework asset is missing from the embedded resources
    #[error("vendored framework asset not found: {path}")]
    MissingAsset { path: String },

    /// Runtime (file system / path resolution) failure
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

pub type Result<T> = std::result::Result<T, ComposeError>;
