//! The vendored module catalog.
//!
//! Style module names come from the master stylesheet's import list, in
//! declared order; script module names from the vendored script directory.
//! The catalog is derived per build and never persisted.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::resources::{FRAMEWORK_ASSETS, JS_DIR, MASTER_STYLESHEET};

/// Always-present style anchors, excluded from the orderable catalog.
pub const STYLE_ANCHORS: [&str; 2] = ["variables", "mixins"];

static STYLE_IMPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"@import\s+"([^"]+)""#).unwrap());

/// Ordered sets of vendored style and script module names.
#[derive(Debug, Clone)]
pub struct ModuleCatalog {
    styles: Vec<String>,
    scripts: Vec<String>,
}

impl ModuleCatalog {
    /// Enumerate the vendored framework's modules.
    ///
    /// Style order reflects the master stylesheet's import order (duplicates
    /// included, if the source declares any); script order reflects the
    /// embedded directory's declared order.
    pub fn load() -> Result<Self> {
        let master = FRAMEWORK_ASSETS.read_required(MASTER_STYLESHEET)?;
        let mut styles = parse_style_imports(master);
        for anchor in STYLE_ANCHORS {
            if let Some(index) = styles.iter().position(|name| name == anchor) {
                styles.remove(index);
            }
        }

        let scripts = FRAMEWORK_ASSETS.list_files(JS_DIR);

        Ok(Self { styles, scripts })
    }

    /// Style module names, anchors excluded, master-stylesheet order.
    pub fn style_modules(&self) -> &[String] {
        &self.styles
    }

    /// Script module file names (with extension), directory order.
    pub fn script_modules(&self) -> &[String] {
        &self.scripts
    }
}

/// Scan stylesheet text for `@import "name"` directives, in order of first
/// occurrence. Case-sensitive; no de-duplication.
fn parse_style_imports(stylesheet: &str) -> Vec<String> {
    STYLE_IMPORT
        .captures_iter(stylesheet)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// A script module's settings key: the file name without its `.js` extension.
pub fn script_base_name(name: &str) -> &str {
    name.strip_suffix(".js").unwrap_or(name)
}
