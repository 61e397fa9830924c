//! Embedded vendored framework assets.
//!
//! The vendored framework (SCSS modules, script modules, the tether
//! positioning library, and the default settings template) is embedded at
//! compile time and exposed under a virtual path prefix so the style
//! compiler can resolve imports against it ahead of the real file system.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use include_dir::{Dir, DirEntry, include_dir};
use trellis_runtime::AssetProvider;

use crate::error::{ComposeError, Result};

/// The vendored framework tree embedded at compile time.
static FRAMEWORK_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/resources");

/// Virtual path prefix for embedded assets.
///
/// The vendored SCSS root is e.g.
/// `/__trellis_resources__/bootstrap/scss`.
pub const RESOURCE_PATH_PREFIX: &str = "/__trellis_resources__";

/// Vendored SCSS module directory (relative to the resource root).
pub const SCSS_DIR: &str = "bootstrap/scss";

/// Vendored script module directory (relative to the resource root).
pub const JS_DIR: &str = "bootstrap/js/src";

/// The master stylesheet whose import list defines the style module catalog.
pub const MASTER_STYLESHEET: &str = "bootstrap/scss/bootstrap.scss";

/// Vendored positioning library, injected when tooltips are active.
pub const TETHER_JS: &str = "tether/dist/js/tether.js";

/// Template for synthesizing a fresh settings descriptor.
pub const SETTINGS_TEMPLATE: &str = "defaults/bootstrap-settings.default.json";

/// Embedded assets with lazy path indexes for efficient lookups.
pub struct EmbeddedAssets {
    dir: &'static Dir<'static>,
    files: OnceLock<HashSet<String>>,
    directories: OnceLock<HashSet<String>>,
}

/// The vendored framework assets.
pub static FRAMEWORK_ASSETS: EmbeddedAssets = EmbeddedAssets::new(&FRAMEWORK_DIR);

impl EmbeddedAssets {
    const fn new(dir: &'static Dir<'static>) -> Self {
        Self {
            dir,
            files: OnceLock::new(),
            directories: OnceLock::new(),
        }
    }

    /// The virtual load path of the vendored SCSS root.
    pub fn scss_root() -> PathBuf {
        PathBuf::from(format!("{}/{}", RESOURCE_PATH_PREFIX, SCSS_DIR))
    }

    /// Read an embedded file by resource-relative path.
    pub fn read_str(&self, relative: &str) -> Option<&'static str> {
        self.dir.get_file(relative).and_then(|f| f.contents_utf8())
    }

    /// Read an embedded file, failing with `MissingAsset` when absent.
    pub fn read_required(&self, relative: &str) -> Result<&'static str> {
        self.read_str(relative).ok_or_else(|| ComposeError::MissingAsset {
            path: relative.to_string(),
        })
    }

    /// List the file names of an embedded directory, in declared order.
    pub fn list_files(&self, relative: &str) -> Vec<String> {
        let Some(dir) = self.dir.get_dir(relative) else {
            return Vec::new();
        };
        dir.files()
            .filter_map(|f| f.path().file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    fn files(&self) -> &HashSet<String> {
        self.files.get_or_init(|| {
            let mut set = HashSet::new();
            collect_paths(self.dir, &mut set, &mut HashSet::new());
            set
        })
    }

    fn directories(&self) -> &HashSet<String> {
        self.directories.get_or_init(|| {
            let mut dirs = HashSet::new();
            collect_paths(self.dir, &mut HashSet::new(), &mut dirs);
            dirs
        })
    }

    /// Map a virtual-prefix path to a resource-relative path.
    ///
    /// Returns `None` for paths outside the virtual prefix; those belong to
    /// the real file system.
    fn strip_prefix(&self, path: &Path) -> Option<String> {
        let text = path.to_str()?;
        let stripped = text.strip_prefix(RESOURCE_PATH_PREFIX)?;
        Some(stripped.trim_start_matches('/').to_string())
    }
}

impl AssetProvider for EmbeddedAssets {
    fn is_file(&self, path: &Path) -> bool {
        match self.strip_prefix(path) {
            Some(relative) => self.files().contains(&relative),
            None => false,
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        match self.strip_prefix(path) {
            Some(relative) => relative.is_empty() || self.directories().contains(&relative),
            None => false,
        }
    }

    fn read(&self, path: &Path) -> Option<&'static [u8]> {
        let relative = self.strip_prefix(path)?;
        self.dir.get_file(&relative).map(|f| f.contents())
    }
}

fn collect_paths(dir: &'static Dir<'static>, files: &mut HashSet<String>, dirs: &mut HashSet<String>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(d) => {
                dirs.insert(d.path().to_string_lossy().into_owned());
                collect_paths(d, files, dirs);
            }
            DirEntry::File(f) => {
                files.insert(f.path().to_string_lossy().into_owned());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_stylesheet_is_embedded() {
        let master = FRAMEWORK_ASSETS.read_str(MASTER_STYLESHEET).unwrap();
        assert!(master.contains("@import \"variables\""));
        assert!(master.contains("@import \"mixins\""));
    }

    #[test]
    fn test_virtual_prefix_lookups() {
        let path = PathBuf::from(format!(
            "{}/{}/_variables.scss",
            RESOURCE_PATH_PREFIX, SCSS_DIR
        ));
        assert!(FRAMEWORK_ASSETS.is_file(&path));
        assert!(FRAMEWORK_ASSETS.is_dir(&EmbeddedAssets::scss_root()));
        assert!(FRAMEWORK_ASSETS.read(&path).is_some());
    }

    #[test]
    fn test_paths_outside_prefix_are_not_embedded() {
        assert!(!FRAMEWORK_ASSETS.is_file(Path::new("/etc/passwd")));
        assert!(!FRAMEWORK_ASSETS.is_dir(Path::new("/tmp")));
    }

    #[test]
    fn test_missing_asset_error() {
        let err = FRAMEWORK_ASSETS.read_required("bootstrap/scss/_nope.scss");
        assert!(matches!(err, Err(ComposeError::MissingAsset { .. })));
    }

    #[test]
    fn test_list_script_modules() {
        let names = FRAMEWORK_ASSETS.list_files(JS_DIR);
        assert!(names.contains(&"util.js".to_string()));
        assert!(names.contains(&"tooltip.js".to_string()));
    }
}
