use predicates::prelude::*;
use serde_json::json;

use crate::common::{TestProject, strings};

fn module_list(project: &TestProject) -> serde_json::Value {
    json!([
        { "id": "./src/index.js", "resource": project.resource("src/index.js"), "size": 4000 },
        { "id": "react", "resource": project.resource("node_modules/react/index.js"), "size": 6500 },
        { "id": "react-dom", "resource": project.resource("node_modules/react-dom/index.js"), "size": 130000 },
        { "id": "scheduler", "resource": project.resource("node_modules/scheduler/index.js"), "size": 4000 },
        {
            "id": "react-slider",
            "resource": project.resource("node_modules/react-slider/index.js"),
            "size": 900,
            "chunks": ["settings"],
            "async": true
        },
        { "id": "webpack/runtime/define", "size": 300 }
    ])
}

fn chunk<'a>(plan: &'a serde_json::Value, name: &str) -> &'a serde_json::Value {
    plan["chunks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|chunk| chunk["name"] == name)
        .unwrap_or_else(|| panic!("no chunk '{name}' in {plan}"))
}

#[test]
fn test_production_plan_isolates_framework() {
    let project = TestProject::with_react().unwrap();
    project.write_file("modules.json", &module_list(&project).to_string()).unwrap();

    let plan = project.run_json(&["--mode", "production", "plan", "modules.json"]).unwrap();

    let framework = chunk(&plan, "framework");
    assert_eq!(framework["cache_group"], "framework");
    assert_eq!(strings(framework, "modules"), vec!["react", "react-dom", "scheduler"]);
    assert_eq!(framework["size"], 140500);

    assert_eq!(strings(chunk(&plan, "main"), "modules"), vec!["./src/index.js", "webpack/runtime/define"]);
    // Below min_size, so the async vendor module stays in its origin chunk
    assert_eq!(strings(chunk(&plan, "settings"), "modules"), vec!["react-slider"]);
    assert_eq!(plan["runtime_chunk"], "runtime");
}

#[test]
fn test_development_plan_has_no_framework_chunk() {
    let project = TestProject::with_react().unwrap();
    project.write_file("modules.json", &module_list(&project).to_string()).unwrap();

    let plan = project.run_json(&["plan", "modules.json"]).unwrap();

    let names: Vec<&str> =
        plan["chunks"].as_array().unwrap().iter().filter_map(|c| c["name"].as_str()).collect();
    assert_eq!(names, vec!["main", "settings"]);
}

#[test]
fn test_plan_reads_stdin() {
    let project = TestProject::with_react().unwrap();

    project
        .command()
        .args(["--mode", "production", "plan", "-"])
        .write_stdin(module_list(&project).to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("framework [cache group framework] (3 module(s), 140500 bytes)"))
        .stdout(predicate::str::contains("runtime [runtime]"));
}

#[test]
fn test_custom_group_from_config() {
    let project = TestProject::with_react().unwrap();
    project
        .write_config(
            r#"
mode = "production"

[chunks]
runtime_chunk = "webpack-runtime"

[[groups]]
name = "sliders"
test = "[\\/]react-slider[\\/]"
priority = 10
enforce = true
"#,
        )
        .unwrap();
    project.write_file("modules.json", &module_list(&project).to_string()).unwrap();

    let plan = project.run_json(&["plan", "modules.json"]).unwrap();

    assert_eq!(strings(chunk(&plan, "sliders"), "modules"), vec!["react-slider"]);
    assert_eq!(plan["runtime_chunk"], "webpack-runtime");
}

#[test]
fn test_invalid_module_list() {
    let project = TestProject::new().unwrap();
    project.write_file("modules.json", r#"{ "id": "not-an-array" }"#).unwrap();

    let output = project.run(&["plan", "modules.json"]).unwrap();
    output.assert_failure().assert_stderr_contains("Invalid module list");
}

#[test]
fn test_missing_module_list() {
    let project = TestProject::new().unwrap();

    let output = project.run(&["plan", "absent.json"]).unwrap();
    output.assert_failure().assert_stderr_contains("absent.json");
    assert_eq!(output.code, Some(1));
}
