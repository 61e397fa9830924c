//! Stylesheet composition.
//!
//! Builds an import manifest from the active style list and drives the SCSS
//! compiler with an ordered two-root resolver: the embedded vendored SCSS
//! root first, then the settings file's own directory, so user override
//! files co-resolve with vendored ones.
//!
//! Known limitation, carried deliberately: an import issued from *within* a
//! mixin partial resolves against the vendored SCSS root, not a
//! mixin-specific subfolder. No shipped mixin currently imports anything.

use std::path::Path;

use trellis_runtime::{BuildRuntime, RuntimeError, compile_scss};

use crate::error::{ComposeError, Result};
use crate::resources::{EmbeddedAssets, FRAMEWORK_ASSETS};

/// The flag assignment prepended to the manifest when flexbox is enabled.
const ENABLE_FLEX_PREFIX: &str = "$enable-flex: true;\n";

/// Compose the active style modules into a single stylesheet.
///
/// One `@import "name";` directive is emitted per active module, in list
/// order; the compiler resolves each against the vendored root and then
/// `settings_dir`, using conventional `_name.scss` partial probing.
pub fn compose(
    active: &[String],
    settings_dir: &Path,
    enable_flex: bool,
    runtime: &dyn BuildRuntime,
) -> Result<String> {
    let mut manifest = String::new();
    if enable_flex {
        manifest.push_str(ENABLE_FLEX_PREFIX);
    }
    for name in active {
        manifest.push_str(&format!("@import \"{}\";\n", name));
    }

    let load_paths = [EmbeddedAssets::scss_root(), settings_dir.to_path_buf()];

    compile_scss(runtime, Some(&FRAMEWORK_ASSETS), &manifest, &load_paths)
        .map_err(classify_style_error)
}

/// Distinguish unresolved imports from other compiler failures, keeping the
/// compiler's own message either way.
fn classify_style_error(error: RuntimeError) -> ComposeError {
    match error {
        RuntimeError::Sass(message) => {
            if message.contains("Can't find stylesheet to import") {
                ComposeError::UnresolvedImport { message }
            } else {
                ComposeError::StyleCompilation { message }
            }
        }
        other => ComposeError::Runtime(other),
    }
}
