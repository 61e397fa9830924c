//! Artifact routing.
//!
//! The composed stylesheet always attaches inline. The composed script is
//! either exposed as an on-disk file in the user's project (optionally
//! compiled first) or compiled and attached inline with its source map.
//! Compilation failures are not caught here; they abort the build.

use std::path::{Path, PathBuf};

use trellis_runtime::{BuildRuntime, ScriptCompiler};

use crate::error::{ComposeError, Result};
use crate::host::{BuildHost, GeneratedScript, GeneratedStylesheet};
use crate::settings::Settings;

/// Fixed attach path of the generated stylesheet.
pub const GENERATED_CSS_PATH: &str = "client/stylesheets/bootstrap/bootstrap.generated.css";

/// Fixed attach path of the generated (inline) script bundle.
pub const GENERATED_JS_PATH: &str = "client/lib/bootstrap/bootstrap.generated.js";

/// Fixed name of the exposed script file, written next to the settings file.
pub const EXPOSED_JS_FILE: &str = "bootstrap.js";

const EXPOSED_FILE_BANNER: &str = "\
// DO NOT EDIT THIS FILE, CHANGES _WILL_ BE OVERWRITTEN
// This file was generated and exposed per your settings in bootstrap-settings.json.

";

/// Route the composed artifacts to the host.
pub fn route(
    host: &mut dyn BuildHost,
    runtime: &dyn BuildRuntime,
    compiler: &dyn ScriptCompiler,
    css: String,
    script_source: String,
    settings: &Settings,
    settings_dir: &Path,
) -> Result<()> {
    host.attach_stylesheet(GeneratedStylesheet {
        data: css,
        path: PathBuf::from(GENERATED_CSS_PATH),
    });

    if settings.javascript.expose {
        let target = settings_dir.join(EXPOSED_JS_FILE);

        let mut source = script_source;
        if settings.javascript.compile_exposed {
            source = compiler
                .compile(&source, &target)
                .map_err(|e| ComposeError::ScriptCompilation {
                    message: e.to_string(),
                })?
                .code;
        }

        runtime.file_write_string(&target, &format!("{}{}", EXPOSED_FILE_BANNER, source))?;
    } else {
        let path = PathBuf::from(GENERATED_JS_PATH);
        let compiled = compiler
            .compile(&script_source, &path)
            .map_err(|e| ComposeError::ScriptCompilation {
                message: e.to_string(),
            })?;

        host.attach_script(GeneratedScript {
            data: compiled.code,
            path,
            bare: false,
            source_map: compiled.source_map,
        });
    }

    Ok(())
}
