//! Integration tests for RenderService: document loading, rendering and formatting.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use aidtree::application::format::OutputFormat;
use aidtree::application::ApplicationError;
use aidtree::config::Settings;
use aidtree::domain::{TreeNode, View};
use aidtree::infrastructure::traits::RealFileSystem;
use aidtree::infrastructure::ServiceContainer;
use aidtree::util::testing;

fn resource(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources")
        .join(name)
}

fn container() -> ServiceContainer {
    testing::init_test_setup();
    let settings = Settings {
        color: false,
        width: 40,
        ..Settings::default()
    };
    ServiceContainer::with_deps(settings, Arc::new(RealFileSystem))
}

#[test]
fn given_sms_document_when_rendering_markdown_then_emits_heading_and_fields() {
    let c = container();

    let node = c.render.load(&resource("sms.json")).unwrap();
    let view = c.render.render_node(&node).unwrap();
    let out = c.render.format(&view, OutputFormat::Markdown).unwrap();

    assert_eq!(
        out,
        "## AFAD\n\n**SMS:** DEPREM\n\n**Number:** 2800\n\n**Amount:** 10 TL"
    );
}

#[test]
fn given_sms_document_when_rendering_text_then_lines_are_centered() {
    let c = container();
    let content = fs::read_to_string(resource("sms.json")).unwrap();

    let out = c
        .render
        .render_document(&content, "sms.json", OutputFormat::Text)
        .unwrap();

    let heading = out.lines().next().unwrap();
    assert_eq!(heading.trim(), "AFAD");
    assert!(heading.starts_with("  "), "expected centering padding: {heading:?}");
    assert!(out.contains("DEPREM"));
}

#[test]
fn given_accommodation_document_when_rendering_markdown_then_emits_pipe_table() {
    let c = container();

    let node = c.render.load(&resource("accommodation.json")).unwrap();
    let view = c.render.render_node(&node).unwrap();
    let out = c.render.format(&view, OutputFormat::Markdown).unwrap();

    assert!(out.starts_with("## Adana\n\n| Name | Phone | Status | Source |"), "{out}");
    assert!(out.contains(
        "| Spor Salonu | [0322 111 22 33](tel:03221112233) | Verified | [Source](https://adana.bel.tr/duyuru) |"
    ));
    assert!(out.contains("| Yurt | - | Unverified |"), "{out}");
}

#[test]
fn given_accommodation_document_when_rendering_json_then_view_tree_is_tagged() {
    let c = container();

    let node = c.render.load(&resource("accommodation.json")).unwrap();
    let view = c.render.render_node(&node).unwrap();
    let out = c.render.format(&view, OutputFormat::Json).unwrap();

    let parsed: View = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed, view);
    let raw: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(raw["kind"], "stack");
    assert_eq!(raw["align"], "center");
}

#[rstest]
#[case(OutputFormat::Text)]
#[case(OutputFormat::Markdown)]
fn given_unknown_data_type_when_rendering_then_output_is_empty(#[case] format: OutputFormat) {
    let c = container();

    let node = c.render.load(&resource("unknown.json")).unwrap();
    let view = c.render.render_node(&node).unwrap();

    assert!(view.is_blank());
    assert_eq!(c.render.format(&view, format).unwrap(), "");
}

#[test]
fn given_question_document_when_rendering_then_not_a_data_node() {
    let c = container();

    let node = c.render.load(&resource("question.json")).unwrap();
    let TreeNode::Question(question) = &node else {
        panic!("expected question node");
    };
    assert_eq!(question.options.len(), 1);
    assert_eq!(question.options[0].name, "Donate by SMS");

    let err = c.render.render_node(&node).unwrap_err();
    assert!(
        matches!(&err, ApplicationError::NotADataNode(text) if text == "How can you help?"),
        "{err}"
    );
}

#[test]
fn given_missing_file_when_loading_then_input_not_found() {
    let c = container();
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.json");

    let err = c.render.load(&missing).unwrap_err();

    assert!(matches!(&err, ApplicationError::InputNotFound(p) if p == &missing), "{err}");
}

#[rstest]
#[case::not_json("this is not json")]
#[case::missing_type(r#"{"data": {"dataType": "url-donation", "url": "https://x.org"}}"#)]
#[case::malformed_payload(r#"{"type": "data", "data": {"dataType": "sms-donation", "name": "AFAD"}}"#)]
fn given_invalid_document_when_loading_then_invalid_document(#[case] content: &str) {
    let c = container();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(&path, content).unwrap();

    let err = c.render.load(&path).unwrap_err();

    match err {
        ApplicationError::InvalidDocument { origin, .. } => {
            assert_eq!(origin, path.display().to_string())
        }
        other => panic!("expected InvalidDocument, got {other}"),
    }
}

#[test]
fn given_domestic_and_international_url_when_rendering_then_same_output() {
    let c = container();
    let domestic = r#"{"type":"data","data":{"dataType":"url-donation","url":"https://ahbap.org/bagis"}}"#;
    let international = r#"{"type":"data","data":{"dataType":"international-url-donation","url":"https://ahbap.org/bagis"}}"#;

    let a = c
        .render
        .render_document(domestic, "a", OutputFormat::Markdown)
        .unwrap();
    let b = c
        .render
        .render_document(international, "b", OutputFormat::Markdown)
        .unwrap();

    assert_eq!(a, b);
    assert_eq!(a, "[ahbap.org](https://ahbap.org/bagis)");
}
