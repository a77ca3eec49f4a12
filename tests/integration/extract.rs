use assert_cmd::Command;
use predicates::prelude::*;
use resmeta_cli::test_utils::{MappingFixture, TestProject};
use serde_json::{Value, json};
use std::fs;

fn resmeta() -> Command {
    Command::cargo_bin("resmeta").unwrap()
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_extract_from_project_config() {
    let project = TestProject::with_books().unwrap();

    let assert = resmeta().current_dir(project.path()).arg("extract").assert().success();
    let output = stdout_json(assert.get_output());

    // Directory walk is sorted: authors.xml before books.yaml
    let resources = output["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0]["resourceClass"], "App\\Entity\\Author");
    assert_eq!(
        resources[0]["collectionOperations"],
        json!({"get": {"path": "/api/authors"}})
    );
    assert_eq!(resources[1]["resourceClass"], "App\\Entity\\Book");
    assert_eq!(resources[1]["shortName"], "Book");
    assert_eq!(resources[1]["description"], "Books at 100% discount");
    assert_eq!(resources[1]["itemOperations"]["get"]["path"], "/api/books/{id}");
    assert_eq!(resources[1]["attributes"]["pagination_items_per_page"], "30");

    assert_eq!(
        output["parameters"],
        json!({"api_prefix": "/api", "book_short_name": "Book", "page_size": 30})
    );
}

#[test]
fn test_extract_param_flag_overrides_files() {
    let project = TestProject::with_books().unwrap();

    let assert = resmeta()
        .current_dir(project.path())
        .args(["extract", "--param", "api_prefix=/v2"])
        .assert()
        .success();
    let output = stdout_json(assert.get_output());

    assert_eq!(output["resources"][1]["itemOperations"]["get"]["path"], "/v2/books/{id}");
    assert_eq!(output["parameters"]["api_prefix"], "/v2");
}

#[test]
fn test_extract_yaml_output() {
    let project = TestProject::with_books().unwrap();

    resmeta()
        .current_dir(project.path())
        .args(["extract", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shortName: Book"))
        .stdout(predicate::str::contains("api_prefix: /api"));
}

#[test]
fn test_extract_explicit_path_without_config() {
    let project = TestProject::new().unwrap();
    let file = MappingFixture::books_yaml().write_to(project.path()).unwrap();

    let assert = resmeta()
        .current_dir(project.path())
        .args(["extract", "--no-parameters", "--path"])
        .arg(&file)
        .assert()
        .success();
    let output = stdout_json(assert.get_output());

    // No parameter source: placeholders stay, nothing is collected
    assert_eq!(output["resources"][0]["shortName"], "%book_short_name%");
    assert_eq!(output["parameters"], json!({}));
}

#[test]
fn test_extract_glob_path() {
    let project = TestProject::with_books().unwrap();

    let assert = resmeta()
        .current_dir(project.path())
        .args(["extract", "--path", "resources/*.xml", "-c"])
        .arg(project.path().join("resmeta.toml"))
        .assert()
        .success();
    let output = stdout_json(assert.get_output());

    // Config paths first, then the glob match again
    let classes: Vec<&str> = output["resources"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["resourceClass"].as_str().unwrap())
        .collect();
    assert_eq!(classes, ["App\\Entity\\Author", "App\\Entity\\Book", "App\\Entity\\Author"]);
}

#[test]
fn test_extract_unknown_parameter_suggests_alternative() {
    let project = TestProject::with_books().unwrap();
    project.add_mapping(&MappingFixture::with_unknown_parameter()).unwrap();

    resmeta()
        .current_dir(project.path())
        .arg("extract")
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-existent parameter \"api_prefx\""))
        .stderr(predicate::str::contains("Did you mean this: \"api_prefix\"?"));
}

#[test]
fn test_extract_env_reference_is_rejected() {
    let project = TestProject::with_books().unwrap();
    project.add_mapping(&MappingFixture::with_env_reference()).unwrap();

    resmeta()
        .current_dir(project.path())
        .arg("extract")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Using \"%env(DATABASE_URL)%\" is not allowed in resource configuration.",
        ));
}

#[test]
fn test_extract_invalid_parameter_type() {
    let project = TestProject::with_books().unwrap();
    fs::write(
        project.path().join("parameters.yaml"),
        "parameters:\n  api_prefix: [a, b]\n  book_short_name: Book\n  page_size: 30\n",
    )
    .unwrap();

    resmeta()
        .current_dir(project.path())
        .arg("extract")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a string or numeric, but it is of type array"));
}

#[test]
fn test_extract_without_paths() {
    let project = TestProject::new().unwrap();

    resmeta()
        .current_dir(project.path())
        .arg("extract")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No mapping paths given"));
}

#[test]
fn test_extract_missing_path() {
    let project = TestProject::new().unwrap();

    resmeta()
        .current_dir(project.path())
        .args(["extract", "--path", "missing.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Mapping path does not exist: missing.yaml"));
}

#[test]
fn test_extract_malformed_config() {
    let project = TestProject::new().unwrap();
    fs::write(project.path().join("resmeta.toml"), "paths = [unclosed").unwrap();

    resmeta()
        .current_dir(project.path())
        .arg("extract")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration file syntax"));
}
