use predicates::prelude::*;

use crate::common::{TestProject, strings};

#[test]
fn test_production_resolves_transitive_directories_in_order() {
    let project = TestProject::with_react().unwrap();

    let output = project.run_json(&["--mode", "production", "resolve"]).unwrap();

    assert_eq!(output["mode"], "production");
    assert_eq!(
        strings(&output, "paths"),
        vec![
            project.prefix("node_modules/react"),
            project.prefix("node_modules/loose-envify"),
            project.prefix("node_modules/js-tokens"),
            project.prefix("node_modules/react-dom"),
            project.prefix("node_modules/scheduler"),
        ]
    );
    assert!(output["misses"].as_array().unwrap().is_empty());

    let entries = output["entries"].as_array().unwrap();
    assert_eq!(entries[0]["package"], "react");
    assert!(entries[0]["introduced_by"].is_null());
    assert_eq!(entries[1]["package"], "loose-envify");
    assert_eq!(entries[1]["introduced_by"], "react");
    assert_eq!(entries[4]["introduced_by"], "react-dom");
}

#[test]
fn test_node_env_production_enables_resolution() {
    let project = TestProject::with_react().unwrap();

    project
        .command()
        .env("NODE_ENV", "production")
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 framework path(s)"))
        .stdout(predicate::str::contains(project.prefix("node_modules/scheduler")));
}

#[test]
fn test_development_build_is_empty() {
    let project = TestProject::with_react().unwrap();

    project
        .command()
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains("development build"))
        .stdout(predicate::str::contains("node_modules").not());

    let output = project.run_json(&["resolve"]).unwrap();
    assert_eq!(output["mode"], "development");
    assert!(strings(&output, "paths").is_empty());
}

#[test]
fn test_mode_flag_overrides_node_env() {
    let project = TestProject::with_react().unwrap();

    let output = project
        .command()
        .env("NODE_ENV", "production")
        .args(["--mode", "development", "resolve", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(strings(&json, "paths").is_empty());
}

#[test]
fn test_missing_package_is_skipped() {
    let project = TestProject::with_react().unwrap();

    let output = project
        .run_json(&["--mode", "production", "-p", "not-installed", "-p", "scheduler", "resolve"])
        .unwrap();

    assert_eq!(
        strings(&output, "paths"),
        vec![
            project.prefix("node_modules/scheduler"),
            project.prefix("node_modules/loose-envify"),
            project.prefix("node_modules/js-tokens"),
        ]
    );
    let misses = output["misses"].as_array().unwrap();
    assert_eq!(misses.len(), 1);
    assert_eq!(misses[0]["package"], "not-installed");
    assert_eq!(misses[0]["kind"], "not-installed");
}

#[test]
fn test_nested_copy_is_preferred_over_hoisted() {
    let project = TestProject::new().unwrap();
    project
        .install("react", r#"{ "name": "react", "dependencies": { "loose-envify": "^1.1.0" } }"#)
        .unwrap();
    project.install("loose-envify", r#"{ "name": "loose-envify", "version": "1.0.0" }"#).unwrap();
    project
        .tree()
        .install_at("node_modules/react", "loose-envify", r#"{ "name": "loose-envify", "version": "1.4.0" }"#)
        .unwrap();

    let output = project.run_json(&["--mode", "production", "-p", "react", "resolve"]).unwrap();

    assert_eq!(
        strings(&output, "paths"),
        vec![
            project.prefix("node_modules/react"),
            project.prefix("node_modules/react/node_modules/loose-envify"),
        ]
    );
}

#[test]
fn test_dependency_cycle_terminates() {
    let project = TestProject::new().unwrap();
    project.install("a", r#"{ "dependencies": { "b": "*" } }"#).unwrap();
    project.install("b", r#"{ "dependencies": { "a": "*" } }"#).unwrap();

    let output = project.run_json(&["--mode", "production", "-p", "a", "resolve"]).unwrap();
    assert_eq!(
        strings(&output, "paths"),
        vec![project.prefix("node_modules/a"), project.prefix("node_modules/b")]
    );
}

#[test]
fn test_exports_hiding_manifest_drops_package() {
    let project = TestProject::new().unwrap();
    project
        .install("sealed", r#"{ "name": "sealed", "exports": { ".": "./index.js" } }"#)
        .unwrap();
    project
        .install("open", r#"{ "name": "open", "exports": { ".": "./index.js", "./package.json": "./package.json" } }"#)
        .unwrap();

    let output = project
        .run_json(&["--mode", "production", "-p", "sealed", "-p", "open", "resolve"])
        .unwrap();
    assert_eq!(strings(&output, "paths"), vec![project.prefix("node_modules/open")]);
    assert_eq!(output["misses"][0]["kind"], "not-exported");

    project.write_config("[resolve]\nrespect_exports = false\n").unwrap();
    let output = project
        .run_json(&["--mode", "production", "-p", "sealed", "-p", "open", "resolve"])
        .unwrap();
    assert_eq!(strings(&output, "paths").len(), 2);
}

#[test]
fn test_explain_shows_provenance_and_misses() {
    let project = TestProject::with_react().unwrap();

    project
        .command()
        .args(["--mode", "production", "-p", "react", "-p", "preact", "resolve", "--explain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(via react)"))
        .stdout(predicate::str::contains("Skipped lookups:"))
        .stdout(predicate::str::contains("'preact' is not installed"));
}
