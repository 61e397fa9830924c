//! Build-time module selection and asset composition for a vendored
//! Bootstrap-style UI framework.
//!
//! Given the candidate file set supplied by a host build, the engine:
//!
//! 1. resolves the user's settings descriptor (`bootstrap-settings.json`),
//!    creating or migrating it as needed,
//! 2. computes the active style and script module lists from the vendored
//!    framework catalog,
//! 3. synthesizes missing user override files (variables/mixins),
//! 4. composes the active style modules into one stylesheet and the active
//!    script modules into one script bundle,
//! 5. routes the results to the host as inline artifacts or exposed files.
//!
//! # Example
//!
//! ```ignore
//! use trellis_compose::{CandidateFile, Pipeline};
//! use trellis_runtime::{NativeRuntime, PassthroughCompiler};
//!
//! let runtime = NativeRuntime::new();
//! let compiler = PassthroughCompiler::new();
//! let pipeline = Pipeline::new(&runtime, &compiler);
//!
//! pipeline.process_files(&mut host, &candidate_files)?;
//! ```
//!
//! Everything that touches the outside world (file system, SCSS compiler,
//! script transpiler) goes through the seams in `trellis-runtime`.

pub mod catalog;
pub mod error;
pub mod host;
pub mod overrides;
pub mod pipeline;
pub mod resources;
pub mod route;
pub mod scripts;
pub mod select;
pub mod settings;
pub mod styles;

pub use catalog::ModuleCatalog;
pub use error::{ComposeError, Result};
pub use host::{BuildHost, CandidateFile, GeneratedScript, GeneratedStylesheet};
pub use pipeline::Pipeline;
pub use settings::{ResolvedSettings, SETTINGS_FILE, Settings};
