//! Package-qualified path resolution.
//!
//! Host builds refer to files with a `{package}/relative/path` notation.
//! On disk, package contents live under `<root>/packages/<identifier>/`,
//! where the identifier may carry an `owner:name` prefix. Resolution tries
//! the fully qualified identifier (with `:` flattened to `_`) first, then
//! the bare name after the last `:`.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::traits::{BuildRuntime, RuntimeError, RuntimeResult};

static PACKAGE_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{(.*)\}/(.*)$").unwrap());

/// Resolve a package-qualified reference to a concrete path under `root`.
///
/// References without the `{package}` prefix pass through (joined onto
/// `root`). An empty package (`{}/...`) refers to the project itself and
/// resolves to the bare relative path. Absolute paths are kept as-is.
///
/// # Errors
///
/// `RuntimeError::PathResolution` when neither candidate exists, listing both
/// attempted paths.
pub fn resolve_package_path(
    runtime: &dyn BuildRuntime,
    root: &Path,
    reference: &str,
) -> RuntimeResult<PathBuf> {
    let Some(caps) = PACKAGE_REF.captures(reference) else {
        return Ok(root.join(reference));
    };

    let package = &caps[1];
    let relative = &caps[2];

    if package.is_empty() {
        return Ok(root.join(relative));
    }

    let qualified = root.join(format!(
        "packages/{}/{}",
        package.replace(':', "_"),
        relative
    ));
    if runtime.path_exists(&qualified) {
        return Ok(qualified);
    }

    let bare_name = package.rsplit(':').next().unwrap_or(package);
    let fallback = root.join(format!("packages/{}/{}", bare_name, relative));
    if runtime.path_exists(&fallback) {
        return Ok(fallback);
    }

    Err(RuntimeError::PathResolution {
        reference: reference.to_string(),
        tried: vec![qualified, fallback],
    })
}
