//! SCSS compilation using the grass crate.
//!
//! The engine composes a manifest of `@import` directives and hands it to
//! grass. Import resolution follows an explicit ordered root list: embedded
//! (compile-time) framework assets are consulted first, then the real file
//! system through the `BuildRuntime`. First success wins; an import that
//! resolves against neither root surfaces as grass's native not-found error.

use std::fmt::Debug;
use std::io;
use std::path::{Path, PathBuf};

use grass::{Options, OutputStyle};

use crate::traits::{BuildRuntime, RuntimeError, RuntimeResult};

/// Provider of assets embedded at compile time.
///
/// Embedded assets live under a virtual path prefix; paths outside that
/// prefix are not the provider's concern and fall through to the runtime.
pub trait AssetProvider: Send + Sync {
    /// Check if a path exists as a file in the embedded assets.
    fn is_file(&self, path: &Path) -> bool;

    /// Check if a path exists as a directory in the embedded assets.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a file's contents from the embedded assets.
    fn read(&self, path: &Path) -> Option<&'static [u8]>;
}

/// Adapter implementing `grass::Fs` over the ordered resolver roots.
///
/// Embedded assets are checked first (when present), then the runtime.
pub struct AssetFs<'a> {
    runtime: &'a dyn BuildRuntime,
    assets: Option<&'a dyn AssetProvider>,
}

impl<'a> AssetFs<'a> {
    pub fn new(runtime: &'a dyn BuildRuntime) -> Self {
        Self {
            runtime,
            assets: None,
        }
    }

    pub fn with_assets(runtime: &'a dyn BuildRuntime, assets: &'a dyn AssetProvider) -> Self {
        Self {
            runtime,
            assets: Some(assets),
        }
    }
}

impl Debug for AssetFs<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetFs")
            .field("runtime", &"<BuildRuntime>")
            .field("assets", &self.assets.is_some())
            .finish()
    }
}

impl grass::Fs for AssetFs<'_> {
    fn is_dir(&self, path: &Path) -> bool {
        if let Some(assets) = self.assets {
            if assets.is_dir(path) {
                return true;
            }
        }
        self.runtime.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        if let Some(assets) = self.assets {
            if assets.is_file(path) {
                return true;
            }
        }
        self.runtime.is_file(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        if let Some(assets) = self.assets {
            if let Some(contents) = assets.read(path) {
                return Ok(contents.to_vec());
            }
        }
        self.runtime
            .file_read_string(path)
            .map(String::into_bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
    }
}

/// Compile SCSS source to CSS.
///
/// # Arguments
///
/// * `runtime` - file system access for on-disk imports
/// * `assets` - optional embedded assets, consulted before the runtime
/// * `scss` - the SCSS source to compile
/// * `load_paths` - directories searched for import resolution, in order
///
/// # Returns
///
/// Compiled CSS on success, `RuntimeError::Sass` on failure (including
/// imports that resolve against no root).
pub fn compile_scss(
    runtime: &dyn BuildRuntime,
    assets: Option<&dyn AssetProvider>,
    scss: &str,
    load_paths: &[PathBuf],
) -> RuntimeResult<String> {
    let fs = match assets {
        Some(assets) => AssetFs::with_assets(runtime, assets),
        None => AssetFs::new(runtime),
    };

    let options = Options::default()
        .fs(&fs)
        .load_paths(load_paths)
        .style(OutputStyle::Expanded);

    grass::from_string(scss, &options).map_err(|e| RuntimeError::Sass(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NativeRuntime;

    #[test]
    fn test_compile_simple_scss() {
        let runtime = NativeRuntime::new();
        let scss = "$primary: #007bff; .btn { color: $primary; }";

        let css = compile_scss(&runtime, None, scss, &[]).unwrap();

        assert!(css.contains(".btn"));
        assert!(css.contains("#007bff"));
    }

    #[test]
    fn test_compile_scss_with_mixins() {
        let runtime = NativeRuntime::new();
        let scss = r#"
            @mixin center {
                display: flex;
                justify-content: center;
            }
            .container {
                @include center;
            }
        "#;

        let css = compile_scss(&runtime, None, scss, &[]).unwrap();

        assert!(css.contains(".container"));
        assert!(css.contains("display: flex"));
    }

    #[test]
    fn test_compile_scss_error() {
        let runtime = NativeRuntime::new();
        let scss = ".btn { color: $undefined-variable; }";

        let result = compile_scss(&runtime, None, scss, &[]);

        assert!(matches!(result, Err(RuntimeError::Sass(_))));
    }

    #[test]
    fn test_import_resolves_from_load_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("_colors.scss"), "$accent: #ff0000;").unwrap();

        let runtime = NativeRuntime::new();
        let scss = "@import \"colors\";\n.badge { color: $accent; }";

        let css = compile_scss(&runtime, None, scss, &[dir.path().to_path_buf()]).unwrap();

        assert!(css.contains("#ff0000"));
    }

    #[test]
    fn test_unresolved_import_is_sass_error() {
        let runtime = NativeRuntime::new();
        let scss = "@import \"does-not-exist\";";

        let result = compile_scss(&runtime, None, scss, &[]);

        let err = result.unwrap_err();
        assert!(matches!(err, RuntimeError::Sass(_)));
    }

    #[test]
    fn test_asset_fs_debug() {
        let runtime = NativeRuntime::new();
        let fs = AssetFs::new(&runtime);
        assert!(format!("{:?}", fs).contains("AssetFs"));
    }
}
