//! End-to-end pipeline tests against a real temp project directory.

use std::path::PathBuf;

use trellis_compose::route::{EXPOSED_JS_FILE, GENERATED_CSS_PATH, GENERATED_JS_PATH};
use trellis_compose::{
    BuildHost, CandidateFile, ComposeError, GeneratedScript, GeneratedStylesheet, Pipeline,
    SETTINGS_FILE,
};
use trellis_runtime::{BuildRuntime, NativeRuntime, PassthroughCompiler};

#[derive(Default)]
struct RecordingHost {
    scripts: Vec<GeneratedScript>,
    stylesheets: Vec<GeneratedStylesheet>,
}

impl BuildHost for RecordingHost {
    fn attach_script(&mut self, script: GeneratedScript) {
        self.scripts.push(script);
    }

    fn attach_stylesheet(&mut self, stylesheet: GeneratedStylesheet) {
        self.stylesheets.push(stylesheet);
    }
}

fn settings_candidate(contents: &str) -> CandidateFile {
    CandidateFile {
        display_path: SETTINGS_FILE.to_string(),
        package_name: None,
        path_in_package: SETTINGS_FILE.to_string(),
        contents: contents.to_string(),
    }
}

#[test]
fn test_blank_settings_synthesize_and_compose_everything() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = NativeRuntime::new();
    let compiler = PassthroughCompiler::new();
    let pipeline = Pipeline::new(&runtime, &compiler).with_project_root(dir.path());
    let mut host = RecordingHost::default();

    pipeline
        .process_files(&mut host, &[settings_candidate("")])
        .unwrap();

    // The synthesized descriptor lands on disk and advertises every module.
    let written = runtime
        .file_read_string(&dir.path().join(SETTINGS_FILE))
        .unwrap();
    assert!(written.contains("\"grid\": true"));
    assert!(written.contains("\"tooltip\": true"));
    serde_json::from_str::<serde_json::Value>(&written).unwrap();

    // One stylesheet with the full framework compiled in.
    assert_eq!(host.stylesheets.len(), 1);
    let css = &host.stylesheets[0];
    assert_eq!(css.path, PathBuf::from(GENERATED_CSS_PATH));
    assert!(css.data.contains(".btn"));
    assert!(css.data.contains(".container"));
    assert!(css.data.contains(".tooltip"));

    // The bare marker script plus the inline bundle.
    assert_eq!(host.scripts.len(), 2);
    let marker = &host.scripts[0];
    assert!(marker.bare);
    assert!(marker.data.contains("__bootstrapSettingsFileLoaded"));

    let bundle = &host.scripts[1];
    assert_eq!(bundle.path, PathBuf::from(GENERATED_JS_PATH));
    assert!(!bundle.bare);
    assert!(bundle.data.starts_with("if (typeof window !== \"undefined\") {"));
    // All modules active by default, so tooltips pull in tether.
    assert!(bundle.data.contains("class Tooltip"));
    assert!(bundle.data.contains("tether (vendored)"));
}

#[test]
fn test_no_settings_file_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = NativeRuntime::new();
    let compiler = PassthroughCompiler::new();
    let pipeline = Pipeline::new(&runtime, &compiler).with_project_root(dir.path());
    let mut host = RecordingHost::default();

    let other = CandidateFile {
        display_path: "client/app.js".to_string(),
        package_name: None,
        path_in_package: "client/app.js".to_string(),
        contents: "var x;".to_string(),
    };
    pipeline.process_files(&mut host, &[other]).unwrap();

    assert!(host.scripts.is_empty());
    assert!(host.stylesheets.is_empty());
    assert!(!dir.path().join(SETTINGS_FILE).exists());
}

#[test]
fn test_duplicate_settings_files_abort() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = NativeRuntime::new();
    let compiler = PassthroughCompiler::new();
    let pipeline = Pipeline::new(&runtime, &compiler).with_project_root(dir.path());
    let mut host = RecordingHost::default();

    let result = pipeline.process_files(
        &mut host,
        &[settings_candidate("{}"), settings_candidate("{}")],
    );

    assert!(matches!(result, Err(ComposeError::DuplicateSettingsFile)));
    assert!(host.stylesheets.is_empty());
}

#[test]
fn test_existing_settings_are_not_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = NativeRuntime::new();
    let compiler = PassthroughCompiler::new();
    let pipeline = Pipeline::new(&runtime, &compiler).with_project_root(dir.path());
    let mut host = RecordingHost::default();

    let contents = r#"{"scss": {"modules": {"buttons": true}}, "javascript": {"modules": {"util": true}}}"#;
    pipeline
        .process_files(&mut host, &[settings_candidate(contents)])
        .unwrap();

    // Nothing persisted: the descriptor was already in the current shape.
    assert!(!dir.path().join(SETTINGS_FILE).exists());

    let css = &host.stylesheets[0].data;
    assert!(css.contains(".btn"));
    assert!(!css.contains(".container"));
    assert!(!css.contains(".tooltip"));

    let bundle = &host.scripts[1].data;
    assert!(bundle.contains("const Util"));
    assert!(!bundle.contains("class Modal"));
    assert!(!bundle.contains("tether (vendored)"));
}

#[test]
fn test_legacy_settings_migrate_destructively() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = NativeRuntime::new();
    let compiler = PassthroughCompiler::new();
    let pipeline = Pipeline::new(&runtime, &compiler).with_project_root(dir.path());
    let mut host = RecordingHost::default();

    let legacy = r#"{"less": {"modules": {"old-thing": true}}}"#;
    pipeline
        .process_files(&mut host, &[settings_candidate(legacy)])
        .unwrap();

    let written = runtime
        .file_read_string(&dir.path().join(SETTINGS_FILE))
        .unwrap();
    assert!(!written.contains("old-thing"));
    assert!(written.contains("\"grid\": true"));
}

#[test]
fn test_custom_variables_file_created_and_honored() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = NativeRuntime::new();
    let compiler = PassthroughCompiler::new();
    let pipeline = Pipeline::new(&runtime, &compiler).with_project_root(dir.path());
    let mut host = RecordingHost::default();

    let contents =
        r#"{"scss": {"customVariables": true, "modules": {"buttons": true}}}"#;
    pipeline
        .process_files(&mut host, &[settings_candidate(contents)])
        .unwrap();

    let override_path = dir.path().join("_bootstrap-variables.scss");
    assert!(override_path.exists());
    let override_content = runtime.file_read_string(&override_path).unwrap();
    assert!(!override_content.contains("!default"));

    // The generated override carries the vendored values, so output is
    // unchanged on first run.
    assert!(host.stylesheets[0].data.contains("#0275d8"));
}

#[test]
fn test_user_edited_variables_override_compiled_output() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = NativeRuntime::new();
    let compiler = PassthroughCompiler::new();
    let pipeline = Pipeline::new(&runtime, &compiler).with_project_root(dir.path());
    let mut host = RecordingHost::default();

    std::fs::write(
        dir.path().join("_bootstrap-variables.scss"),
        "$primary: #bada55;\n",
    )
    .unwrap();

    let contents =
        r#"{"scss": {"customVariables": true, "modules": {"buttons": true}}}"#;
    pipeline
        .process_files(&mut host, &[settings_candidate(contents)])
        .unwrap();

    // User's file untouched, and its value wins over the vendored default.
    let override_content = runtime
        .file_read_string(&dir.path().join("_bootstrap-variables.scss"))
        .unwrap();
    assert_eq!(override_content, "$primary: #bada55;\n");
    assert!(host.stylesheets[0].data.contains("#bada55"));
    assert!(!host.stylesheets[0].data.contains("#0275d8"));
}

#[test]
fn test_expose_mixins_writes_flattened_file() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = NativeRuntime::new();
    let compiler = PassthroughCompiler::new();
    let pipeline = Pipeline::new(&runtime, &compiler).with_project_root(dir.path());
    let mut host = RecordingHost::default();

    let contents = r#"{"scss": {"exposeMixins": true}}"#;
    pipeline
        .process_files(&mut host, &[settings_candidate(contents)])
        .unwrap();

    let mixins = runtime
        .file_read_string(&dir.path().join("_bootstrap-mixins.scss"))
        .unwrap();
    assert!(mixins.contains("@mixin border-radius"));
    assert!(!mixins.contains("@import \"mixins/"));
}

#[test]
fn test_exposed_script_written_with_banner() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = NativeRuntime::new();
    let compiler = PassthroughCompiler::new();
    let pipeline = Pipeline::new(&runtime, &compiler).with_project_root(dir.path());
    let mut host = RecordingHost::default();

    let contents = r#"{"javascript": {"expose": true, "modules": {"util": true}}}"#;
    pipeline
        .process_files(&mut host, &[settings_candidate(contents)])
        .unwrap();

    let exposed = runtime
        .file_read_string(&dir.path().join(EXPOSED_JS_FILE))
        .unwrap();
    assert!(exposed.starts_with("// DO NOT EDIT THIS FILE"));
    assert!(exposed.contains("const Util"));

    // Only the marker script attaches inline when exposing.
    assert_eq!(host.scripts.len(), 1);
    assert!(host.scripts[0].bare);
}

#[test]
fn test_namespace_wraps_exports_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = NativeRuntime::new();
    let compiler = PassthroughCompiler::new();
    let pipeline = Pipeline::new(&runtime, &compiler).with_project_root(dir.path());
    let mut host = RecordingHost::default();

    let contents =
        r#"{"javascript": {"namespace": "Global", "modules": {"util": true}}}"#;
    pipeline
        .process_files(&mut host, &[settings_candidate(contents)])
        .unwrap();

    let bundle = &host.scripts[1].data;
    // "Global" is the reserved alias for the global object itself.
    assert!(bundle.contains("window.window.Util = Util"));
    assert!(!bundle.contains("export default"));
}
