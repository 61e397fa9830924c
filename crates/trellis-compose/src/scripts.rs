//! Script bundle composition.
//!
//! Active script modules are concatenated into one self-contained bundle.
//! Cross-module references resolve through shared scope after concatenation,
//! so static import statements are stripped rather than linked. The
//! rewriting here is a pattern-based substitution pass over the source text,
//! not a parser; unusual but syntactically different input forms can evade
//! it.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::resources::{FRAMEWORK_ASSETS, JS_DIR, TETHER_JS};

/// Name of the global object namespaces are created on.
pub const GLOBAL_OBJECT: &str = "window";

/// The module whose presence triggers injection of the positioning library.
const TOOLTIP_MODULE: &str = "tooltip.js";

static IMPORT_STATEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"import\s+\S+\s+from\s+'[^']*'").unwrap());

static EXPORT_DEFAULT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"export\s+default\s+(\S+)").unwrap());

/// Compose the active script modules into a single bundle.
///
/// Steps, in fixed order:
/// 1. concatenate module sources, in list order;
/// 2. strip static import statements;
/// 3. if tooltips are active, prepend a guarded definition of the
///    positioning library and rewrite the module's own presence check so it
///    also recognizes the conditionally-injected definition;
/// 4. if a namespace is set, create it on the global object when absent and
///    rewrite `export default X` into an assignment onto the namespace;
/// 5. wrap everything in a client-environment guard, re-indented for
///    readability in case the result gets exposed to the user.
pub fn compose(active: &[String], namespace: Option<&str>) -> Result<String> {
    let mut source = String::new();
    for name in active {
        source.push_str(FRAMEWORK_ASSETS.read_required(&format!("{}/{}", JS_DIR, name))?);
        source.push('\n');
    }

    let mut source = IMPORT_STATEMENT.replace_all(&source, "").into_owned();

    if active.iter().any(|name| name == TOOLTIP_MODULE) {
        let tether = FRAMEWORK_ASSETS.read_required(TETHER_JS)?;
        source = source.replacen(
            "window.Tether === undefined",
            "typeof Tether === \"undefined\"",
            1,
        );
        source = format!(
            "if (typeof {global}.Tether === \"undefined\") {{\n{tether}\n}}\n\n{source}",
            global = GLOBAL_OBJECT,
            tether = tether,
            source = source,
        );
    }

    if let Some(namespace) = namespace {
        source = format!(
            "if (typeof {global}.{ns} === \"undefined\")\n  {global}.{ns} = {{}};\n{source}",
            global = GLOBAL_OBJECT,
            ns = namespace,
            source = source,
        );
        source = EXPORT_DEFAULT
            .replace_all(&source, format!("{}.{}.$1 = $1", GLOBAL_OBJECT, namespace))
            .into_owned();
    }

    Ok(format!(
        "if (typeof {global} !== \"undefined\") {{\n  {body}\n}}\n",
        global = GLOBAL_OBJECT,
        body = source.replace('\n', "\n  "),
    ))
}
