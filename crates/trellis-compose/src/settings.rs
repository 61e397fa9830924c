//! Settings descriptor loading, defaulting, and migration.
//!
//! The settings descriptor (`bootstrap-settings.json`) is the single
//! user-owned configuration file controlling which modules are active and
//! how output is routed. Resolution is a pure function: it never writes the
//! file itself, but reports regenerated content back to the caller, who
//! decides whether to persist it.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

use crate::catalog::{ModuleCatalog, script_base_name};
use crate::error::{ComposeError, Result};
use crate::resources::{FRAMEWORK_ASSETS, SETTINGS_TEMPLATE};
use crate::scripts::GLOBAL_OBJECT;

/// Fixed name of the settings descriptor file.
pub const SETTINGS_FILE: &str = "bootstrap-settings.json";

/// Marker key identifying the legacy (pre-SCSS) descriptor shape.
const LEGACY_MARKER: &str = "less";

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_$][0-9a-zA-Z_$]*$").unwrap());

static SCSS_MODULES_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n([ \t]*)/\*SCSS_MODULES\*/").unwrap());

static JS_MODULES_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n([ \t]*)/\*JS_MODULES\*/").unwrap());

/// The persisted settings descriptor.
///
/// Every field is optional in the file; absent fields take their defaults
/// here rather than being patched in dynamically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub version: u32,
    pub scss: ScssSettings,
    pub javascript: JsSettings,
}

/// Style-side settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScssSettings {
    pub enable_flex: bool,
    pub custom_variables: bool,
    pub expose_mixins: bool,
    pub modules: BTreeMap<String, bool>,
}

impl ScssSettings {
    /// Absent module keys read as disabled.
    pub fn module_enabled(&self, name: &str) -> bool {
        self.modules.get(name).copied().unwrap_or(false)
    }
}

/// Script-side settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JsSettings {
    pub namespace: NamespaceSetting,
    pub expose: bool,
    pub compile_exposed: bool,
    pub modules: BTreeMap<String, bool>,
}

impl JsSettings {
    /// Absent module keys read as disabled.
    pub fn module_enabled(&self, base_name: &str) -> bool {
        self.modules.get(base_name).copied().unwrap_or(false)
    }

    /// Validate and resolve the namespace setting.
    ///
    /// Invalid values (non-strings, non-identifiers, the literal string
    /// `"false"`) silently disable namespacing rather than erroring: a
    /// missing namespace just turns off the exported-global wrapping. The
    /// reserved alias `"global"` (case-insensitive) resolves to the global
    /// object's own name.
    pub fn resolved_namespace(&self) -> Option<String> {
        let name = match &self.namespace {
            NamespaceSetting::Named(name) => name,
            _ => return None,
        };
        if name == "false" || !IDENTIFIER.is_match(name) {
            return None;
        }
        if name.eq_ignore_ascii_case("global") {
            return Some(GLOBAL_OBJECT.to_string());
        }
        Some(name.clone())
    }
}

/// The raw `javascript.namespace` value: a string or `false`.
///
/// Anything else found in the file is tolerated and treated as disabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NamespaceSetting {
    Named(String),
    Disabled(bool),
    Other(serde_json::Value),
}

impl Default for NamespaceSetting {
    fn default() -> Self {
        NamespaceSetting::Disabled(false)
    }
}

/// Outcome of settings resolution.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub settings: Settings,

    /// Regenerated descriptor content that should be written back to the
    /// user's file (fresh synthesis or legacy migration). `None` when the
    /// on-disk content was used as-is.
    pub persist: Option<String>,
}

/// Resolve raw settings file content into a fully-defaulted descriptor.
///
/// - Blank content synthesizes the default descriptor from the packaged
///   template and reports it for persistence.
/// - A legacy-shaped descriptor (carrying the `less` marker) is replaced
///   wholesale by a regenerated default; prior customization is discarded.
/// - Otherwise the content is parsed, with absent fields defaulted.
///
/// Resolution is idempotent: resolving content it previously generated
/// yields the same settings and nothing to persist.
pub fn resolve(raw: &str, catalog: &ModuleCatalog) -> Result<ResolvedSettings> {
    if raw.trim().is_empty() {
        let content = default_content(catalog)?;
        let settings = parse(&content)?;
        return Ok(ResolvedSettings {
            settings,
            persist: Some(content),
        });
    }

    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(ComposeError::MalformedSettings)?;

    if value.get(LEGACY_MARKER).is_some() {
        let content = default_content(catalog)?;
        let settings = parse(&content)?;
        return Ok(ResolvedSettings {
            settings,
            persist: Some(content),
        });
    }

    let settings =
        serde_json::from_value(value).map_err(ComposeError::MalformedSettings)?;
    Ok(ResolvedSettings {
        settings,
        persist: None,
    })
}

fn parse(content: &str) -> Result<Settings> {
    serde_json::from_str(content).map_err(ComposeError::MalformedSettings)
}

/// Synthesize default descriptor content from the packaged template.
///
/// The template carries two placeholder markers which are substituted with
/// one `"name": true` entry per catalog module, indented like the marker
/// lines. Module lists always come from the current catalog, so a freshly
/// generated file advertises every available module even if the template
/// itself is stale.
pub fn default_content(catalog: &ModuleCatalog) -> Result<String> {
    let template = FRAMEWORK_ASSETS.read_required(SETTINGS_TEMPLATE)?;

    let scss_indent = marker_indent(&SCSS_MODULES_MARKER, template);
    let js_indent = marker_indent(&JS_MODULES_MARKER, template);

    let mut style_names: Vec<&str> = catalog
        .style_modules()
        .iter()
        .map(String::as_str)
        .collect();
    style_names.sort_unstable();

    let scss_entries = render_entries(&style_names, &scss_indent);
    let js_names: Vec<&str> = catalog
        .script_modules()
        .iter()
        .map(|name| script_base_name(name))
        .collect();
    let js_entries = render_entries(&js_names, &js_indent);

    let content = SCSS_MODULES_MARKER.replace(template, NoExpand(&format!("\n{}", scss_entries)));
    let content = JS_MODULES_MARKER.replace(&content, NoExpand(&format!("\n{}", js_entries)));
    Ok(content.into_owned())
}

fn marker_indent(marker: &Regex, template: &str) -> String {
    marker
        .captures(template)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn render_entries(names: &[&str], indent: &str) -> String {
    names
        .iter()
        .map(|name| format!("{}\"{}\": true", indent, name))
        .collect::<Vec<_>>()
        .join(",\n")
}
