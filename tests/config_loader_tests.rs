//! Integration tests for project configuration loading.
//!
//! Writes a project file into a temp directory and builds targets from
//! the loaded options.

use bundle_config::config::{ConfigLoader, ConfigPaths};
use bundle_config::env::{EnvironmentFlags, Mode};
use bundle_config::targets::{self, BuildContext, EntryPoint, Target};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn load(project: &TempDir) -> ConfigLoader {
    let paths = ConfigPaths::with_root(project.path(), None);
    ConfigLoader::load_with_paths(paths).expect("Failed to load configuration")
}

fn project_yaml() -> &'static str {
    r#"
dirs:
  output:
    root: build
client:
  entry:
    app: ./index.js
    vendor: [./polyfills.js, ./vendor.js]
  rules:
    cssNodeModulesRule: null
    svgRule:
      test: '\.svg$'
      use: [svg-loader]
server:
  entry:
    server: ./main.js
  externals:
    allowlist: [lodash-es]
"#
}

#[test]
fn test_project_rules_reach_module_rules() {
    let project = TempDir::new().unwrap();
    fs::write(project.path().join("bundle.config.yaml"), project_yaml()).unwrap();
    let loader = load(&project);

    let options = loader.config().options(Target::Client);
    assert_eq!(
        options.entry.as_ref().unwrap()["vendor"],
        EntryPoint::Many(vec!["./polyfills.js".to_string(), "./vendor.js".to_string()])
    );
    assert!(options.rules.get("cssNodeModulesRule").unwrap().is_disabled());

    let ctx = BuildContext::new(
        loader.path_registry(),
        EnvironmentFlags::new(Mode::Production, false),
    );
    let config = targets::build(Target::Client, options, &ctx).unwrap();

    let rules = config.module_rules();
    assert_eq!(rules.len(), 4);
    assert_eq!(rules[3], json!({"test": r"\.svg$", "use": ["svg-loader"]}));
    assert!(
        config.value()["output"]["path"]
            .as_str()
            .unwrap()
            .contains("/build")
    );
}

#[test]
fn test_server_externals_from_file() {
    let project = TempDir::new().unwrap();
    fs::write(project.path().join("bundle.config.yaml"), project_yaml()).unwrap();
    let loader = load(&project);

    let ctx = BuildContext::new(
        loader.path_registry(),
        EnvironmentFlags::new(Mode::Development, false),
    );
    let config = targets::build(Target::Server, loader.config().options(Target::Server), &ctx).unwrap();

    assert_eq!(
        config.value()["externals"][0]["nodeExternals"]["allowlist"],
        json!(["lodash-es"])
    );
    assert_eq!(config.value()["entry"]["server"], "./main.js");
}

#[test]
fn test_target_without_entry_fails() {
    let project = TempDir::new().unwrap();
    fs::write(project.path().join("bundle.config.yaml"), project_yaml()).unwrap();
    let loader = load(&project);

    let ctx = BuildContext::new(loader.path_registry(), EnvironmentFlags::default());
    let err = targets::build(Target::Universal, loader.config().options(Target::Universal), &ctx)
        .unwrap_err();
    assert_eq!(err.field.as_deref(), Some("entry"));
}

#[test]
fn test_invalid_rules_section_rejected() {
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join("bundle.config.yaml"),
        "client:\n  rules: [not, a, mapping]\n",
    )
    .unwrap();

    let paths = ConfigPaths::with_root(project.path(), None);
    assert!(ConfigLoader::load_with_paths(paths).is_err());
}

#[test]
fn test_explicit_config_file() {
    let project = TempDir::new().unwrap();
    let file = project.path().join("custom.yaml");
    fs::write(&file, "dirs:\n  server:\n    root: api\n").unwrap();

    let paths = ConfigPaths::with_root(project.path(), Some(file));
    let loader = ConfigLoader::load_with_paths(paths).unwrap();

    assert_eq!(loader.config().dirs.server.root, "api");
    assert!(loader.path_registry().server.sources.ends_with("/api/src"));
}
