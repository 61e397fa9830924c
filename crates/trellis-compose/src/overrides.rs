//! User override file synthesis.
//!
//! The variables and mixins override files are user-owned: each is generated
//! once from the vendored source and never touched again. This is the
//! opposite policy from the settings file's legacy migration, which does
//! overwrite.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use trellis_runtime::BuildRuntime;

use crate::error::Result;
use crate::resources::{FRAMEWORK_ASSETS, SCSS_DIR};

/// Fixed name of the user's variables override file.
pub const VARIABLES_FILE: &str = "_bootstrap-variables.scss";

/// Fixed name of the user's mixins override file.
pub const MIXINS_FILE: &str = "_bootstrap-mixins.scss";

const VARIABLES_HEADER: &str = "\
// These are custom bootstrap variables for you to edit.
// They override the default bootstrap values outright, so you may delete
// anything in this file and the default value will be used instead.
";

const MIXINS_HEADER: &str = "\
// Editing these mixins will not edit the mixins used by the core bootstrap
// modules. They are exposed here for your use and convenience.
// They can be imported using @import \"path/to/bootstrap-mixins\"
";

static DEFAULT_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*!default").unwrap());

static MIXIN_IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"@import\s+"mixins/([^"]+)";?"#).unwrap());

/// Generate the variables override file if it does not exist.
///
/// The vendored variables source is copied with its header commentary cut
/// (everything up to the first blank line) and its `!default` markers
/// stripped, so the values become unconditional overrides.
pub fn ensure_variables_file(runtime: &dyn BuildRuntime, dir: &Path) -> Result<()> {
    let target = dir.join(VARIABLES_FILE);
    if runtime.is_file(&target) {
        return Ok(());
    }

    let source = FRAMEWORK_ASSETS.read_required(&format!("{}/_variables.scss", SCSS_DIR))?;
    let body = DEFAULT_MARKER.replace_all(strip_leading_commentary(source), "");
    runtime.file_write_string(&target, &format!("{}{}", VARIABLES_HEADER, body))?;
    Ok(())
}

/// Generate the mixins override file if it does not exist.
///
/// Nested `@import "mixins/x"` references are inlined one level deep,
/// flattening the mixin module into a single self-contained file. Expansion
/// is deliberately not recursive: a mixin partial that itself imported
/// further files would keep those imports verbatim.
pub fn ensure_mixins_file(runtime: &dyn BuildRuntime, dir: &Path) -> Result<()> {
    let target = dir.join(MIXINS_FILE);
    if runtime.is_file(&target) {
        return Ok(());
    }

    let source = FRAMEWORK_ASSETS.read_required(&format!("{}/_mixins.scss", SCSS_DIR))?;
    let body = strip_leading_commentary(source);

    let mut flattened = String::new();
    let mut last = 0;
    for caps in MIXIN_IMPORT.captures_iter(body) {
        let Some(span) = caps.get(0) else { continue };
        flattened.push_str(&body[last..span.start()]);
        flattened
            .push_str(FRAMEWORK_ASSETS.read_required(&format!("{}/mixins/_{}.scss", SCSS_DIR, &caps[1]))?);
        last = span.end();
    }
    flattened.push_str(&body[last..]);

    runtime.file_write_string(&target, &format!("{}{}", MIXINS_HEADER, flattened))?;
    Ok(())
}

/// Drop everything up to the first blank line (the file's own header
/// commentary). Files without a blank line are kept whole.
fn strip_leading_commentary(source: &str) -> &str {
    match source.find("\n\n") {
        Some(index) => &source[index..],
        None => source,
    }
}
