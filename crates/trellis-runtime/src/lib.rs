//! Runtime abstraction layer for the trellis asset pipeline.
//!
//! This crate isolates everything that touches the world outside the
//! composition engine:
//! - `BuildRuntime`: file system access behind a trait, with a std-backed
//!   `NativeRuntime` implementation
//! - SCSS compilation via the grass crate, with an `AssetProvider` seam so
//!   embedded (compile-time) resources resolve ahead of on-disk files
//! - `ScriptCompiler`: the transpiler seam; the engine never assumes a
//!   particular script toolchain
//! - package-qualified path resolution (`{package}/relative/path`)

mod native;
mod paths;
mod sass;
mod script;
mod traits;

pub use native::NativeRuntime;
pub use paths::resolve_package_path;
pub use sass::{AssetFs, AssetProvider, compile_scss};
pub use script::{CompiledScript, PassthroughCompiler, ScriptCompiler};
pub use traits::{BuildRuntime, RuntimeError, RuntimeResult};
