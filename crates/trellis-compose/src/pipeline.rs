//! Pipeline orchestration.
//!
//! One synchronous run per host build invocation: locate the settings
//! descriptor in the candidate set, resolve settings, select modules,
//! synthesize override files, compose both bundles, route artifacts. Any
//! failure aborts the run and propagates to the host.

use std::path::{Path, PathBuf};

use tracing::debug;
use trellis_runtime::{BuildRuntime, ScriptCompiler, resolve_package_path};

use crate::catalog::ModuleCatalog;
use crate::error::{ComposeError, Result};
use crate::host::{BuildHost, CandidateFile, GeneratedScript};
use crate::overrides::{ensure_mixins_file, ensure_variables_file};
use crate::route::route;
use crate::select::{select_scripts, select_styles};
use crate::settings::{self, SETTINGS_FILE};
use crate::{scripts, styles};

/// Attach path of the bare marker script flagging that the settings file
/// was found and processed.
pub const SETTINGS_MARKER_PATH: &str = "client/lib/settings-file-checked.generated.js";

const SETTINGS_MARKER: &str = "window.__bootstrapSettingsFileLoaded = true;\n";

/// The composition engine, bound to a runtime and a script compiler.
pub struct Pipeline<'a> {
    runtime: &'a dyn BuildRuntime,
    compiler: &'a dyn ScriptCompiler,
    project_root: PathBuf,
}

impl<'a> Pipeline<'a> {
    pub fn new(runtime: &'a dyn BuildRuntime, compiler: &'a dyn ScriptCompiler) -> Self {
        Self {
            runtime,
            compiler,
            project_root: PathBuf::from("."),
        }
    }

    /// Set the project root package-qualified references resolve under.
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = root.into();
        self
    }

    /// Process one candidate file set.
    ///
    /// A set without a settings descriptor is a no-op; a set with more than
    /// one is a fatal configuration error.
    pub fn process_files(
        &self,
        host: &mut dyn BuildHost,
        files: &[CandidateFile],
    ) -> Result<()> {
        let Some(settings_file) = find_settings_file(files)? else {
            return Ok(());
        };

        // Flag the settings file as present so the host can skip its
        // missing-settings warning.
        host.attach_script(GeneratedScript {
            data: SETTINGS_MARKER.to_string(),
            path: PathBuf::from(SETTINGS_MARKER_PATH),
            bare: true,
            source_map: None,
        });

        let reference = format!(
            "{{{}}}/{}",
            settings_file.package_name.as_deref().unwrap_or(""),
            settings_file.path_in_package
        );
        let settings_path = resolve_package_path(self.runtime, &self.project_root, &reference)?;
        let settings_dir = settings_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let catalog = ModuleCatalog::load()?;
        let resolved = settings::resolve(&settings_file.contents, &catalog)?;
        if let Some(content) = &resolved.persist {
            // Keep the user's working copy in sync with what this build used.
            self.runtime.file_write_string(&settings_path, content)?;
            debug!(path = %settings_path.display(), "regenerated settings descriptor");
        }
        let settings = resolved.settings;

        let active_styles = select_styles(&catalog, &settings.scss);
        debug!(modules = active_styles.len(), "selected style modules");

        if settings.scss.custom_variables {
            ensure_variables_file(self.runtime, &settings_dir)?;
        }
        if settings.scss.expose_mixins {
            ensure_mixins_file(self.runtime, &settings_dir)?;
        }

        let css = styles::compose(
            &active_styles,
            &settings_dir,
            settings.scss.enable_flex,
            self.runtime,
        )?;

        let active_scripts = select_scripts(&catalog, &settings.javascript);
        debug!(modules = active_scripts.len(), "selected script modules");

        let namespace = settings.javascript.resolved_namespace();
        let script = scripts::compose(&active_scripts, namespace.as_deref())?;

        route(
            host,
            self.runtime,
            self.compiler,
            css,
            script,
            &settings,
            &settings_dir,
        )
    }
}

/// Locate the settings descriptor among the candidate files by basename.
fn find_settings_file(files: &[CandidateFile]) -> Result<Option<&CandidateFile>> {
    let mut found: Option<&CandidateFile> = None;
    for file in files {
        let basename = Path::new(&file.display_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if basename == SETTINGS_FILE {
            if found.is_some() {
                return Err(ComposeError::DuplicateSettingsFile);
            }
            found = Some(file);
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(display_path: &str) -> CandidateFile {
        CandidateFile {
            display_path: display_path.to_string(),
            package_name: None,
            path_in_package: display_path.to_string(),
            contents: String::new(),
        }
    }

    #[test]
    fn test_find_settings_file_by_basename() {
        let files = vec![
            candidate("client/style.css"),
            candidate("lib/bootstrap-settings.json"),
        ];
        let found = find_settings_file(&files).unwrap().unwrap();
        assert_eq!(found.display_path, "lib/bootstrap-settings.json");
    }

    #[test]
    fn test_no_settings_file_is_none() {
        let files = vec![candidate("client/style.css")];
        assert!(find_settings_file(&files).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_settings_files_error() {
        let files = vec![
            candidate("bootstrap-settings.json"),
            candidate("lib/bootstrap-settings.json"),
        ];
        let result = find_settings_file(&files);
        assert!(matches!(result, Err(ComposeError::DuplicateSettingsFile)));
    }
}
