//! The host build system contract.
//!
//! The host supplies candidate files and accepts generated artifacts; the
//! engine never discovers files or registers build steps itself.

use std::path::PathBuf;

/// One candidate file supplied by the host's file-set enumeration.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    /// Package-relative display path (used to spot the settings file).
    pub display_path: String,

    /// Owning package name, if the file belongs to a package.
    pub package_name: Option<String>,

    /// Path of the file inside its package.
    pub path_in_package: String,

    /// File content as text.
    pub contents: String,
}

/// A generated script artifact attached inline to the build.
#[derive(Debug, Clone)]
pub struct GeneratedScript {
    pub data: String,
    pub path: PathBuf,

    /// When set, the host loads the script outside any module wrapper.
    pub bare: bool,

    pub source_map: Option<String>,
}

/// A generated stylesheet artifact attached inline to the build.
#[derive(Debug, Clone)]
pub struct GeneratedStylesheet {
    pub data: String,
    pub path: PathBuf,
}

/// Sink for generated artifacts, implemented by the host build.
pub trait BuildHost {
    fn attach_script(&mut self, script: GeneratedScript);

    fn attach_stylesheet(&mut self, stylesheet: GeneratedStylesheet);
}
