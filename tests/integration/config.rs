use predicates::prelude::*;

use crate::common::{TestProject, strings};

#[test]
fn test_config_file_discovered_from_subdirectory() {
    let project = TestProject::with_react().unwrap();
    project
        .write_config("mode = \"production\"\nframework_packages = [\"scheduler\"]\n")
        .unwrap();
    project.write_file("src/pages/index.js", "export default 1;\n").unwrap();

    let output = project
        .command()
        .current_dir(project.root().join("src").join("pages"))
        .args(["resolve", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["mode"], "production");
    assert_eq!(
        strings(&json, "paths"),
        vec![
            project.prefix("node_modules/scheduler"),
            project.prefix("node_modules/loose-envify"),
            project.prefix("node_modules/js-tokens"),
        ]
    );
}

#[test]
fn test_cli_packages_override_config() {
    let project = TestProject::with_react().unwrap();
    project.write_config("framework_packages = [\"scheduler\"]\n").unwrap();

    let output = project.run_json(&["--mode", "production", "-p", "js-tokens", "resolve"]).unwrap();
    assert_eq!(strings(&output, "paths"), vec![project.prefix("node_modules/js-tokens")]);
    assert_eq!(strings(&output, "packages"), vec!["js-tokens"]);
}

#[test]
fn test_explicit_config_path() {
    let project = TestProject::with_react().unwrap();
    project.write_file("build/chunks.toml", "mode = \"production\"\nroot = \"..\"\n").unwrap();

    let output = project.run_json(&["--config", "build/chunks.toml", "resolve"]).unwrap();
    assert_eq!(output["mode"], "production");
    assert_eq!(strings(&output, "paths").len(), 5);
}

#[test]
fn test_missing_explicit_config() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["--config", "missing.toml", "resolve"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"))
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn test_malformed_config() {
    let project = TestProject::new().unwrap();
    project.write_config("mode = \"production\"\nunknown_key = 1\n").unwrap();

    let output = project.run(&["resolve"]).unwrap();
    output.assert_failure().assert_stderr_contains("Invalid configuration file syntax");
}

#[test]
fn test_invalid_mode_in_config() {
    let project = TestProject::new().unwrap();
    project.write_config("mode = \"staging\"\n").unwrap();

    let output = project.run(&["resolve"]).unwrap();
    output.assert_failure().assert_stderr_contains("Invalid configuration file syntax");
}

#[test]
fn test_invalid_mode_flag() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["--mode", "staging", "resolve"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn test_invalid_group_pattern() {
    let project = TestProject::new().unwrap();
    project
        .write_config("[[groups]]\nname = \"broken\"\ntest = \"(unclosed\"\n")
        .unwrap();

    let output = project.run(&["resolve"]).unwrap();
    output
        .assert_failure()
        .assert_stderr_contains("Invalid pattern '(unclosed' for cache group 'broken'");
}

#[test]
fn test_missing_root() {
    let project = TestProject::new().unwrap();

    let output = project.run(&["--root", "does-not-exist", "resolve"]).unwrap();
    output.assert_failure().assert_stderr_contains("Root directory does not exist");
}

#[test]
fn test_conflicting_chunk_names() {
    let project = TestProject::new().unwrap();
    project.write_config("[chunks]\nruntime_chunk = \"framework\"\n").unwrap();

    let output = project.run(&["resolve"]).unwrap();
    output.assert_failure().assert_stderr_contains("both named 'framework'");
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let project = TestProject::with_react().unwrap();

    let output = project.run(&["--verbose", "--mode", "production", "resolve", "--format", "json"]).unwrap();
    output.assert_success().assert_stderr_contains("Recorded 'react'");
    let json: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(strings(&json, "paths").len(), 5);
}
