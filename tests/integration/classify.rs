use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_classify_framework_and_lookalike() {
    let project = TestProject::with_react().unwrap();
    let react = project.resource("node_modules/react/cjs/react.production.min.js");
    let slider = project.resource("node_modules/react-slider/index.js");

    let output = project
        .run_json(&["--mode", "production", "classify", &react, &slider])
        .unwrap();
    let results = output.as_array().unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["resource"], react.as_str());
    assert_eq!(results[0]["framework"], true);
    assert_eq!(results[0]["cache_group"], "framework");
    assert_eq!(results[1]["framework"], false);
    assert!(results[1]["cache_group"].is_null());
}

#[test]
fn test_classify_transitive_dependency() {
    let project = TestProject::with_react().unwrap();
    let tokens = project.resource("node_modules/js-tokens/index.js");

    project
        .command()
        .args(["--mode", "production", "classify", &tokens])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("framework"));
}

#[test]
fn test_classify_relative_paths_from_working_directory() {
    let project = TestProject::with_react().unwrap();

    let output = project
        .run_json(&["--mode", "production", "classify", "node_modules/scheduler/index.js", "src/app.js"])
        .unwrap();
    let results = output.as_array().unwrap();

    assert_eq!(results[0]["resource"], project.resource("node_modules/scheduler/index.js").as_str());
    assert_eq!(results[0]["framework"], true);
    assert_eq!(results[1]["framework"], false);
}

#[test]
fn test_async_vendor_module_claimed_by_vendors() {
    let project = TestProject::with_react().unwrap();
    let slider = project.resource("node_modules/react-slider/index.js");

    let output = project
        .run_json(&["--mode", "production", "classify", "--async", &slider])
        .unwrap();
    assert_eq!(output[0]["cache_group"], "vendors");
}

#[test]
fn test_development_never_classifies_as_framework() {
    let project = TestProject::with_react().unwrap();
    let react = project.resource("node_modules/react/index.js");

    let output = project.run_json(&["classify", &react]).unwrap();
    assert_eq!(output[0]["framework"], false);
    assert!(output[0]["cache_group"].is_null());
}

#[test]
fn test_classify_requires_a_resource() {
    let project = TestProject::new().unwrap();
    project.command().arg("classify").assert().failure().code(2);
}
