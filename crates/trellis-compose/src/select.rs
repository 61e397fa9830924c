//! Active module selection.
//!
//! Pure filtering and ordering of the catalog against the settings
//! descriptor. Styles always carry the `variables`/`mixins` anchors; scripts
//! honor a fixed load-first list so modules with cross-module static
//! dependencies are concatenated before their dependents.

use crate::catalog::{ModuleCatalog, script_base_name};
use crate::settings::{JsSettings, ScssSettings};

/// The always-first style anchor.
pub const STYLE_VARIABLES: &str = "variables";

/// The second style anchor, after any custom variables override.
pub const STYLE_MIXINS: &str = "mixins";

/// Import name of the user's variables override file
/// (`_bootstrap-variables.scss`).
pub const CUSTOM_VARIABLES_MODULE: &str = "bootstrap-variables";

/// Script modules moved to the front of the bundle, in this order.
pub const JS_LOAD_FIRST: [&str; 2] = ["util.js", "tooltip.js"];

/// Compute the active style module list.
///
/// Result order is always `[variables, (override?), mixins, ...enabled in
/// catalog order]`. Each name appears at most once.
pub fn select_styles(catalog: &ModuleCatalog, scss: &ScssSettings) -> Vec<String> {
    let mut active = vec![STYLE_VARIABLES.to_string()];
    if scss.custom_variables {
        active.push(CUSTOM_VARIABLES_MODULE.to_string());
    }
    active.push(STYLE_MIXINS.to_string());
    active.extend(
        catalog
            .style_modules()
            .iter()
            .filter(|name| scss.module_enabled(name))
            .cloned(),
    );
    active
}

/// Compute the active script module list.
///
/// Catalog order is kept for modules outside the load-first list; load-first
/// modules, when enabled, lead in their declared order. The list is walked
/// in reverse so each front-insertion lands ahead of the previous one.
pub fn select_scripts(catalog: &ModuleCatalog, javascript: &JsSettings) -> Vec<String> {
    let mut active: Vec<String> = catalog
        .script_modules()
        .iter()
        .filter(|name| javascript.module_enabled(script_base_name(name)))
        .cloned()
        .collect();

    for name in JS_LOAD_FIRST.iter().rev() {
        if let Some(index) = active.iter().position(|module| module == name) {
            let module = active.remove(index);
            active.insert(0, module);
        }
    }

    active
}
