use raml2html::config::{BuildOptions, ConfigurationBuilder, Helper, Template, build_default_configuration};
use raml2html::core::RenderError;
use raml2html::parser::DocumentSource;
use raml2html::pipeline::render;
use raml2html::test_utils::{PETSTORE_RAML, RamlFixture, init_test_logging};
use std::collections::HashMap;
use tempfile::TempDir;
use tera::Value;

fn petstore() -> DocumentSource {
    DocumentSource::inline(PETSTORE_RAML)
}

#[tokio::test]
async fn test_default_templates_render_every_section() {
    init_test_logging(None);
    let config = build_default_configuration(false, None, None, None).await.unwrap();
    let html = render(&petstore(), &config).await.unwrap();

    // Documentation chapters go through the markdown helper
    assert!(html.contains("<p>Register an application first. Then request a token.</p>"));
    // Nested resources are rendered through the recursive partial
    assert!(html.contains("id=\"pets__petId\""));
    assert!(html.contains("<span class=\"parent\">&#x2F;pets</span>"));
    // Query parameters go through the item partial
    assert!(html.contains("<strong>limit</strong>"));
    // Schema URLs become links
    assert!(html.contains("<a href=\"http://schemas.petstore.example/pet.json\">Schema</a>"));
    // Secured methods get the lock icon
    assert!(html.contains("glyphicon-lock"));
    // Response codes are rendered from stringified keys
    assert!(html.contains("httpstatus.es/200"));
}

#[tokio::test]
async fn test_nested_resources_do_not_inherit_parent_fields() {
    let config = build_default_configuration(false, None, None, None).await.unwrap();
    let source = DocumentSource::inline(
        "title: Nested\n/parent:\n  description: Parent only text.\n  get:\n    description: Read parent.\n  /child:\n    get:\n      description: Read child.\n    /leaf:\n      post:\n        description: Write leaf.\n",
    );

    let html = render(&source, &config).await.unwrap();

    assert!(html.contains("id=\"parent_child\""));
    assert!(html.contains("id=\"parent_child_leaf\""));
    assert!(html.contains("<span class=\"parent\">&#x2F;parent&#x2F;child</span>"));
    // Once in the top-level heading, once in the resource panel
    assert_eq!(html.matches("Parent only text.").count(), 2);
    assert_eq!(html.matches("Read parent.").count(), 1);
    assert_eq!(html.matches("Write leaf.").count(), 1);
}

#[tokio::test]
async fn test_methods_are_sorted_in_every_resource() {
    let config = build_default_configuration(false, None, None, None).await.unwrap();
    let html = render(&petstore(), &config).await.unwrap();

    let get_pets = html.find("List pets").unwrap();
    let post_pets = html.find("Add a pet").unwrap();
    assert!(get_pets < post_pets);

    let get_pet = html.find("Fetch the pet").unwrap();
    let delete_pet = html.find("Remove the pet").unwrap();
    assert!(get_pet < delete_pet);
}

#[tokio::test]
async fn test_sentence_helpers_split_descriptions() {
    let config = build_default_configuration(false, None, None, None).await.unwrap();
    let html = render(&petstore(), &config).await.unwrap();

    assert!(html.contains("<p>All pets in the store.</p>"));
    assert!(html.contains("<p>Filter with query parameters.</p>"));
}

#[tokio::test]
async fn test_minifying_post_processor() {
    let plain = build_default_configuration(false, None, None, None).await.unwrap();
    let minifying = ConfigurationBuilder::new(false)
        .options(BuildOptions {
            post_process: true,
            ..BuildOptions::default()
        })
        .build()
        .await
        .unwrap();

    let plain_html = render(&petstore(), &plain).await.unwrap();
    let minified_html = render(&petstore(), &minifying).await.unwrap();

    assert!(plain_html.contains("&quot;id&quot;"));
    assert!(!minified_html.contains("&quot;"));
    assert!(minified_html.len() < plain_html.len());
}

#[tokio::test]
async fn test_helper_override_replaces_default() {
    let config = build_default_configuration(false, None, None, None)
        .await
        .unwrap()
        .with_template(Template::inline("{{ description | markdown }}"))
        .with_helper(
            "markdown",
            Helper::filter(|v: &Value, _: &HashMap<String, Value>| -> tera::Result<Value> {
                Ok(Value::String(format!("md({})", v.as_str().unwrap_or_default())))
            }),
        );

    let html = render(&DocumentSource::inline("description: plain"), &config).await.unwrap();
    assert_eq!(html, "md(plain)");
}

#[tokio::test]
async fn test_render_from_file() {
    let temp = TempDir::new().unwrap();
    let path = RamlFixture::delete_then_get().write_to(temp.path()).unwrap();
    let config = build_default_configuration(true, None, None, None)
        .await
        .unwrap()
        .with_template(Template::inline("{{ title }} {{ config.protocol }}"));

    let html = render(&DocumentSource::from(path.as_path()), &config).await.unwrap();
    assert_eq!(html, "Ordering https:");
}

#[tokio::test]
async fn test_non_mapping_document_is_parse_error() {
    let config = build_default_configuration(false, None, None, None).await.unwrap();
    let err = render(&DocumentSource::inline("- a\n- b\n"), &config).await.unwrap_err();
    assert!(matches!(err, RenderError::ParseError { .. }), "{err:?}");
}
