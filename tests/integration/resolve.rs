use assert_cmd::Command;
use predicates::prelude::*;
use resmeta_cli::test_utils::TestProject;
use serde_json::{Value, json};

fn resmeta() -> Command {
    Command::cargo_bin("resmeta").unwrap()
}

fn resolve_json(project: &TestProject, args: &[&str]) -> Value {
    let assert =
        resmeta().current_dir(project.path()).arg("resolve").args(args).assert().success();
    serde_json::from_slice(&assert.get_output().stdout).unwrap()
}

#[test]
fn test_resolve_with_param_flags() {
    let project = TestProject::new().unwrap();
    let output = resolve_json(
        &project,
        &[
            "%prefix%/books?limit=%limit%",
            "--param",
            "prefix=/api",
            "--param",
            "limit=30",
        ],
    );

    assert_eq!(
        output,
        json!({"value": "/api/books?limit=30", "parameters": {"prefix": "/api", "limit": 30}})
    );
}

#[test]
fn test_resolve_uses_project_parameters() {
    let project = TestProject::with_books().unwrap();
    let output = resolve_json(&project, &["%book_short_name%: 100%%"]);

    assert_eq!(output["value"], "Book: 100%");
    assert_eq!(output["parameters"], json!({"book_short_name": "Book"}));
}

#[test]
fn test_resolve_json_value() {
    let project = TestProject::with_books().unwrap();
    let output = resolve_json(
        &project,
        &["--json", r#"{"%api_prefix%": ["%api_prefix%/a", true, null, {"n": "%page_size%"}]}"#],
    );

    // Keys are not resolved
    assert_eq!(output["value"], json!({"%api_prefix%": ["/api/a", true, null, {"n": "30"}]}));
    assert_eq!(output["parameters"], json!({"api_prefix": "/api", "page_size": 30}));
}

#[test]
fn test_resolve_lone_percent_is_literal() {
    let project = TestProject::with_books().unwrap();
    let output = resolve_json(&project, &["50% off"]);

    assert_eq!(output, json!({"value": "50% off", "parameters": {}}));
}

#[test]
fn test_resolve_unknown_parameter_without_alternatives() {
    let project = TestProject::with_books().unwrap();

    resmeta()
        .current_dir(project.path())
        .args(["resolve", "%zzz%"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("You have requested a non-existent parameter \"zzz\"."))
        .stderr(predicate::str::contains("Did you mean").not());
}

#[test]
fn test_resolve_yaml_output() {
    let project = TestProject::new().unwrap();

    resmeta()
        .current_dir(project.path())
        .args(["resolve", "%a%", "--param", "a=x", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("value: x"))
        .stdout(predicate::str::contains("parameters:\n  a: x"));
}

#[test]
fn test_resolve_help() {
    resmeta()
        .args(["resolve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--param"));
}
