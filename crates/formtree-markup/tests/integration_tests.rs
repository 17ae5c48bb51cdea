//! Integration tests for formtree-markup with the shipped template file.
//!
//! These load the templates from disk, the way an application overriding
//! the built-ins would.

use formtree_markup::{cssid, MarkupRenderer, TemplatesFile, BUILTIN_TEMPLATES};
use serde_json::json;

/// Path to the templates file relative to the crate root
const TEMPLATES_PATH: &str = "templates/containers.yaml";

fn templates_path() -> String {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    std::path::Path::new(&manifest_dir)
        .join(TEMPLATES_PATH)
        .to_string_lossy()
        .to_string()
}

#[test]
fn test_file_matches_embedded_templates() {
    let from_disk = std::fs::read_to_string(templates_path()).unwrap();
    assert_eq!(from_disk, BUILTIN_TEMPLATES);
}

#[test]
fn test_load_from_path() {
    let renderer = MarkupRenderer::load(&templates_path()).unwrap();
    assert_eq!(renderer.list_templates(), vec!["fieldset", "form"]);
}

// =============================================================================
// Fieldset
// =============================================================================

#[test]
fn test_fieldset_with_legend_and_class() {
    let renderer = MarkupRenderer::builtin().unwrap();
    let out = renderer
        .render(
            "fieldset",
            &json!({
                "id": cssid("profile.address", "fieldset"),
                "class": "wide",
                "legend": "Address",
                "body": "<input name=\"street\" />"
            }),
        )
        .unwrap();
    assert_eq!(
        out,
        "<fieldset id=\"fieldset-profile-address\" class=\"wide\"><legend>Address</legend><input name=\"street\" /></fieldset>"
    );
}

#[test]
fn test_fieldset_legend_is_escaped_body_is_not() {
    let renderer = MarkupRenderer::builtin().unwrap();
    let out = renderer
        .render(
            "fieldset",
            &json!({ "legend": "<b>Bold</b>", "body": "<i>raw</i>" }),
        )
        .unwrap();
    assert_eq!(
        out,
        "<fieldset><legend>&lt;b&gt;Bold&lt;/b&gt;</legend><i>raw</i></fieldset>"
    );
}

// =============================================================================
// Form
// =============================================================================

#[test]
fn test_form_minimal() {
    let renderer = MarkupRenderer::builtin().unwrap();
    let out = renderer
        .render("form", &json!({ "action": "/go", "id": "form-f", "body": "" }))
        .unwrap();
    assert_eq!(out, "<form action=\"/go\" id=\"form-f\"></form>");
}

#[test]
fn test_override_file_layers_on_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("override.yaml");
    std::fs::write(
        &path,
        r#"
version: "1.0"
templates:
  form:
    description: Form without attributes
    template: "<form>{{{body}}}</form>"
"#,
    )
    .unwrap();

    let renderer = MarkupRenderer::load(path.to_str().unwrap()).unwrap();
    let out = renderer
        .render("form", &json!({ "action": "/ignored", "body": "x" }))
        .unwrap();
    assert_eq!(out, "<form>x</form>");
    assert!(renderer.has_template("fieldset"));

    let file = TemplatesFile::load(path.to_str().unwrap()).unwrap();
    assert_eq!(file.list_templates(), vec!["form"]);
}
