use assert_cmd::Command;
use predicates::prelude::*;
use raml2html::test_utils::{RamlFixture, TemplateFixture};
use tempfile::TempDir;

fn raml2html() -> Command {
    let mut cmd = Command::cargo_bin("raml2html").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("RAML2HTML_TEMPLATE")
        .env_remove("RAML2HTML_RESOURCE")
        .env_remove("RAML2HTML_ITEM");
    cmd
}

#[test]
fn test_missing_input_argument() {
    raml2html().assert().failure().stderr(predicate::str::contains("--input"));
}

#[test]
fn test_unreadable_input_is_parse_error() {
    let temp = TempDir::new().unwrap();

    raml2html()
        .arg(temp.path().join("missing.raml"))
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to parse API description"))
        .stderr(predicate::str::contains("missing.raml"));
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let input = RamlFixture::invalid_syntax().write_to(temp.path()).unwrap();

    raml2html()
        .arg(&input)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to parse API description"))
        .stderr(predicate::str::contains("RAML"));
}

#[test]
fn test_template_variable_error_suggests_field() {
    let temp = TempDir::new().unwrap();
    let input = RamlFixture::delete_then_get().write_to(temp.path()).unwrap();
    let template = TemplateFixture::simple("typo.tera", "<h1>{{ titel }}</h1>")
        .write_to(temp.path())
        .unwrap();

    raml2html()
        .arg("-t")
        .arg(&template)
        .arg(&input)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Template variable not found: 'titel'"))
        .stderr(predicate::str::contains("- title"));
}

#[test]
fn test_missing_partial_error() {
    let temp = TempDir::new().unwrap();
    let input = RamlFixture::delete_then_get().write_to(temp.path()).unwrap();
    let template = TemplateFixture::simple("include.tera", "{% include \"footer\" %}")
        .write_to(temp.path())
        .unwrap();

    raml2html()
        .arg("-t")
        .arg(&template)
        .arg(&input)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("'footer'"))
        .stderr(predicate::str::contains("[footer]").not());
}

#[test]
fn test_missing_template_file_is_config_error() {
    let temp = TempDir::new().unwrap();
    let input = RamlFixture::petstore().write_to(temp.path()).unwrap();

    raml2html()
        .arg("-m")
        .arg(temp.path().join("nope.tera"))
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("nope.tera"));
}

#[test]
fn test_output_directory_must_exist() {
    let temp = TempDir::new().unwrap();
    let input = RamlFixture::petstore().write_to(temp.path()).unwrap();

    raml2html()
        .arg(&input)
        .arg("-o")
        .arg(temp.path().join("missing-dir").join("api.html"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to write output file"));
}
