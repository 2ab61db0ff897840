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
fn test_renders_positional_input_to_stdout() {
    let temp = TempDir::new().unwrap();
    let input = RamlFixture::petstore().write_to(temp.path()).unwrap();

    raml2html()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE HTML>"))
        .stdout(predicate::str::contains("<title>Pet Store API documentation</title>"))
        .stdout(predicate::str::contains("http://api.petstore.example"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_https_flag_changes_protocol() {
    let temp = TempDir::new().unwrap();
    let input = RamlFixture::petstore().write_to(temp.path()).unwrap();

    raml2html()
        .arg("--https")
        .arg("--input")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("https://api.petstore.example"))
        .stdout(predicate::str::contains("https://netdna.bootstrapcdn.com"));
}

#[test]
fn test_output_file() {
    let temp = TempDir::new().unwrap();
    let input = RamlFixture::petstore().write_to(temp.path()).unwrap();
    let output = temp.path().join("api.html");

    raml2html()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("Pet Store"));
}

#[test]
fn test_custom_template_orders_methods() {
    let temp = TempDir::new().unwrap();
    let input = RamlFixture::delete_then_get().write_to(temp.path()).unwrap();
    let template = TemplateFixture::method_echo().write_to(temp.path()).unwrap();

    raml2html()
        .arg("-t")
        .arg(&template)
        .arg(&input)
        .assert()
        .success()
        .stdout("GET DELETE ");
}

#[test]
fn test_relative_template_path_resolves_against_cwd() {
    let temp = TempDir::new().unwrap();
    RamlFixture::delete_then_get().write_to(temp.path()).unwrap();
    TemplateFixture::simple("title.tera", "{{ title }}").write_to(temp.path()).unwrap();

    raml2html()
        .current_dir(temp.path())
        .args(["-t", "./title.tera", "ordering.raml"])
        .assert()
        .success()
        .stdout("Ordering");
}

#[test]
fn test_custom_partials() {
    let temp = TempDir::new().unwrap();
    let input = RamlFixture::petstore().write_to(temp.path()).unwrap();
    let resource = TemplateFixture::simple("resource.tera", "[{{ resource.relativeUri }}]")
        .write_to(temp.path())
        .unwrap();

    raml2html()
        .arg("--resource")
        .arg(&resource)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("[&#x2F;pets]"));
}

#[test]
fn test_minify_flag() {
    let temp = TempDir::new().unwrap();
    let input = RamlFixture::petstore().write_to(temp.path()).unwrap();

    let plain = raml2html().arg(&input).output().unwrap();
    let minified = raml2html().arg("--minify").arg(&input).output().unwrap();

    assert!(plain.status.success());
    assert!(minified.status.success());
    assert!(minified.stdout.len() < plain.stdout.len());
    let html = String::from_utf8(minified.stdout).unwrap();
    assert!(html.contains("Pet Store"));
    assert!(html.contains("[{\"id\": 1}]"), "quotes should be unescaped");
}

#[test]
fn test_no_sentence_helpers_still_renders() {
    let temp = TempDir::new().unwrap();
    let input = RamlFixture::petstore().write_to(temp.path()).unwrap();

    raml2html()
        .arg("--no-sentence-helpers")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>List pets.</p>"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let temp = TempDir::new().unwrap();
    let input = RamlFixture::petstore().write_to(temp.path()).unwrap();

    raml2html()
        .arg("--verbose")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Pet Store"))
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn test_version_flag() {
    raml2html()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_nested_resources_render() {
    let temp = TempDir::new().unwrap();
    let input = RamlFixture::petstore().write_to(temp.path()).unwrap();

    raml2html()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("id=\"pets\""))
        .stdout(predicate::str::contains("id=\"pets__petId\""))
        .stdout(predicate::str::contains("Remove the pet."));
}

#[test]
fn test_input_flag_wins_over_positional() {
    let temp = TempDir::new().unwrap();
    let input = RamlFixture::delete_then_get().write_to(temp.path()).unwrap();
    let template = TemplateFixture::method_echo().write_to(temp.path()).unwrap();

    raml2html()
        .arg("-t")
        .arg(&template)
        .arg("--input")
        .arg(&input)
        .arg(temp.path().join("unused.raml"))
        .assert()
        .success()
        .stdout("GET DELETE ");
}
