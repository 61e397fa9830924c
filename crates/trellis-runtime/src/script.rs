//! The script compiler seam.
//!
//! The composition engine treats script compilation as a pure function:
//! source text in, compiled code (and optionally a source map) out. The host
//! build supplies the real transpiler; `PassthroughCompiler` is the default
//! when no transformation is wanted.

use std::path::Path;

use crate::traits::RuntimeResult;

/// Output of a script compilation.
#[derive(Debug, Clone)]
pub struct CompiledScript {
    /// The compiled (or passed-through) source code.
    pub code: String,

    /// Source map text, when the compiler produces one.
    pub source_map: Option<String>,
}

/// A script compiler/transpiler engine.
///
/// Failures propagate to the caller uncaught; the pipeline performs no retry
/// and produces no partial output.
pub trait ScriptCompiler: Send + Sync {
    /// Compile script source.
    ///
    /// `filename` is the logical output path, used by compilers that embed
    /// file names in source maps.
    fn compile(&self, source: &str, filename: &Path) -> RuntimeResult<CompiledScript>;
}

/// Identity compiler: returns the source unchanged, with no source map.
#[derive(Debug, Default)]
pub struct PassthroughCompiler;

impl PassthroughCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl ScriptCompiler for PassthroughCompiler {
    fn compile(&self, source: &str, _filename: &Path) -> RuntimeResult<CompiledScript> {
        Ok(CompiledScript {
            code: source.to_string(),
            source_map: None,
        })
    }
}
