//! Integration tests for the PresentationBuilder API
//!
//! These tests run whole documents through the directive and layout passes.

use std::ops::ControlFlow;

use float_cmp::assert_approx_eq;

use impress::{
    ImpressError, LayoutError, PresentationBuilder, ResolveError,
    config::{AppConfig, HostConfig, LayoutConfig},
    node::{DIRECTIVE, Document, Node},
    registry::StaticModule,
};

fn directive(name: &str, options: &[(&str, &str)]) -> Node {
    options.iter().fold(
        Node::new(DIRECTIVE).with_attribute("name", name),
        |node, (key, value)| node.with_attribute(*key, *value),
    )
}

fn section(id: &str, title: &str) -> Node {
    Node::section(id).with_child(Node::title(title))
}

fn number(node: &Node, key: &str) -> f64 {
    node.attributes
        .number(key)
        .expect("numeric attribute")
        .unwrap_or_else(|| panic!("{key} missing on {:?}", node.attributes.ids()))
}

fn ids(document: &Document) -> Vec<&str> {
    document
        .children
        .iter()
        .map(|slide| slide.attributes.ids()[0].as_str())
        .collect()
}

#[test]
fn test_nested_sections_share_document_scale() {
    let mut document = Document::new("talk.rst")
        .with_child(directive("impress", &[("data-scale", "2")]))
        .with_child(
            section("one", "One")
                .with_child(directive("slide", &[]))
                .with_child(
                    section("two", "Two")
                        .with_child(directive("slide", &[]))
                        .with_child(section("three", "Three").with_child(directive("slide", &[]))),
                ),
        );
    let mut builder = PresentationBuilder::default();
    let mut state = builder.build_state();

    let report = builder.process(&mut state, &mut document).unwrap();

    assert_eq!(report.directives.applied(), 4);
    assert_eq!(report.layout.positioned, 3);
    assert_eq!(ids(&document), ["one", "two", "three"]);
    for slide in &document.children {
        assert_eq!(slide.attributes.classes(), ["step", "slide"]);
        assert_approx_eq!(f64, number(slide, "data-scale"), 2.0);
        assert_eq!(slide.children.len(), 1, "only the title stays nested");
    }
}

#[test]
fn test_default_layout_cascades_horizontally() {
    let mut document = Document::new("talk.rst")
        .with_child(section("a", "A"))
        .with_child(section("b", "B").with_child(directive("step", &[("data-y", "300")])))
        .with_child(section("c", "C"));
    let mut builder = PresentationBuilder::default();
    let mut state = builder.build_state();

    builder.process(&mut state, &mut document).unwrap();

    let slides = &document.children;
    assert_approx_eq!(f64, number(&slides[0], "data-x"), 0.0);
    assert_approx_eq!(f64, number(&slides[1], "data-x"), 1000.0);
    assert_approx_eq!(f64, number(&slides[1], "data-y"), 300.0);
    assert_approx_eq!(f64, number(&slides[2], "data-x"), 2000.0);
    assert_approx_eq!(f64, number(&slides[2], "data-y"), 300.0);

    let last = state.steps().last_pose("talk.rst").unwrap();
    assert_approx_eq!(f64, last.x, 2000.0);
    assert_approx_eq!(f64, last.scale, 1.0);
}

#[test]
fn test_unread_free_text_field_on_last_slide_is_not_fatal() {
    let mut document = Document::new("talk.rst")
        .with_child(section("good", "Good").with_child(directive("step", &[("data-y", "5")])))
        .with_child(section("bad", "Bad").with_child(directive("step", &[("data-y", "north")])));
    let mut builder = PresentationBuilder::default();
    let mut state = builder.build_state();

    let report = builder.process(&mut state, &mut document).unwrap();

    assert_eq!(report.layout.positioned, 2);
    assert_approx_eq!(f64, number(&document.children[1], "data-x"), 1000.0);
    assert_eq!(document.children[1].attributes.text("data-y"), Some("north"));
    assert!(state.steps().last_pose("talk.rst").is_none());
}

#[test]
fn test_document_func_with_local_override() {
    let mut document = Document::new("talk.rst")
        .with_child(directive("impress", &[("func", "vertical")]))
        .with_child(section("a", "A").with_child(directive("step", &[])))
        .with_child(section("b", "B").with_child(directive("step", &[])))
        .with_child(
            section("c", "C").with_child(directive("step", &[("func", "manual"), ("data-x", "7")])),
        );
    let mut builder = PresentationBuilder::default();
    let mut state = builder.build_state();

    builder.process(&mut state, &mut document).unwrap();

    let slides = &document.children;
    assert_eq!(slides[1].attributes.text("func"), Some("vertical"));
    assert_approx_eq!(f64, number(&slides[1], "data-y"), 1000.0);
    assert_eq!(slides[2].attributes.text("func"), Some("manual"));
    assert_approx_eq!(f64, number(&slides[2], "data-x"), 7.0);
    assert_approx_eq!(f64, number(&slides[2], "data-y"), 1000.0);
}

#[test]
fn test_stop_halts_layout() {
    let mut document = Document::new("talk.rst")
        .with_child(section("a", "A"))
        .with_child(section("b", "B").with_child(directive("step", &[("func", "stop")])))
        .with_child(section("c", "C"));
    let mut builder = PresentationBuilder::default();
    let mut state = builder.build_state();

    let report = builder.process(&mut state, &mut document).unwrap();

    assert_eq!(report.layout.halted_at, Some(1));
    let untouched = &document.children[2].attributes;
    assert!(!untouched.contains_key("data-x"));
    assert!(!untouched.contains_key("func"));
}

#[test]
fn test_unknown_function_is_fatal() {
    let mut document = Document::new("talk.rst")
        .with_child(section("a", "A").with_child(directive("step", &[("func", "zigzag")])));
    let mut builder = PresentationBuilder::default();
    let mut state = builder.build_state();

    let err = builder.process(&mut state, &mut document).unwrap_err();

    assert!(matches!(
        err,
        ImpressError::Layout(LayoutError::Unresolved(ResolveError::UnknownFunction(ref name)))
            if name == "zigzag"
    ));
}

#[test]
fn test_external_module_positions_slides() {
    let mut document = Document::new("talk.rst")
        .with_child(directive("impress", &[("func", "grid.diagonal")]))
        .with_child(section("a", "A").with_child(directive("slide", &[])))
        .with_child(section("b", "B").with_child(directive("slide", &[])));
    let mut builder = PresentationBuilder::default().with_module(
        "grid",
        StaticModule::new().with_function("diagonal", |coord, slides| {
            let offset = coord.index() as f64 * 100.0;
            coord.set_x(offset);
            coord.set_z(-offset);
            assert_eq!(slides.len(), 2);
            Ok(ControlFlow::Continue(()))
        }),
    );
    let mut state = builder.build_state();

    builder.process(&mut state, &mut document).unwrap();

    assert_approx_eq!(f64, number(&document.children[1], "data-x"), 100.0);
    assert_approx_eq!(f64, number(&document.children[1], "data-z"), -100.0);
}

#[test]
fn test_misplaced_step_is_reported_not_fatal() {
    let mut document = Document::new("talk.rst")
        .with_child(directive("step", &[("data-x", "5")]))
        .with_child(section("a", "A"));
    let mut builder = PresentationBuilder::default();
    let mut state = builder.build_state();

    let report = builder.process(&mut state, &mut document).unwrap();

    let diagnostics = report.directives.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].severity().is_warning());
    assert_eq!(
        diagnostics[0].to_string(),
        "talk.rst:: WARNING: step found out of section are ignored"
    );
    assert_approx_eq!(f64, number(&document.children[0], "data-x"), 0.0);
}

#[test]
fn test_strict_mode_rejects_invalid_options() {
    let config = AppConfig::new(
        LayoutConfig::default(),
        HostConfig::default().with_strict_directives(true),
    );
    let mut document = Document::new("talk.rst")
        .with_child(section("a", "A").with_child(directive("step", &[("data-scale", "big")])));
    let mut builder = PresentationBuilder::new(config);
    let mut state = builder.build_state();

    let err = builder.process(&mut state, &mut document).unwrap_err();

    let ImpressError::Directive { diagnostics } = err else {
        panic!("expected a directive error, got {err:?}");
    };
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message().contains("data-scale"));
}

#[test]
fn test_reset_clears_options_between_builds() {
    let mut builder = PresentationBuilder::default();
    let mut state = builder.build_state();
    let mut first = Document::new("talk.rst")
        .with_child(directive("impress", &[("func", "vertical")]))
        .with_child(section("a", "A").with_child(directive("step", &[])));
    builder.process(&mut state, &mut first).unwrap();

    let rebuild = || {
        Document::new("talk.rst")
            .with_child(directive("impress", &[("hide-title", "false")]))
            .with_child(section("a", "A").with_child(directive("step", &[])))
    };

    let mut stale = rebuild();
    builder.process(&mut state, &mut stale).unwrap();
    assert_eq!(stale.children[0].attributes.text("func"), Some("vertical"));

    state.signal_mut().request();
    let mut fresh = rebuild();
    builder.process(&mut state, &mut fresh).unwrap();
    assert_eq!(fresh.children[0].attributes.text("func"), None);
    assert!(!state.signal().is_pending());
}

#[test]
fn test_custom_spacing() {
    let config = AppConfig::new(LayoutConfig::new("vertical", 250.0, 1200.0, 30.0), HostConfig::default());
    let mut document = Document::new("talk.rst")
        .with_child(section("a", "A"))
        .with_child(section("b", "B"));
    let mut builder = PresentationBuilder::new(config);
    let mut state = builder.build_state();

    builder.process(&mut state, &mut document).unwrap();

    assert_approx_eq!(f64, number(&document.children[1], "data-y"), 250.0);
}

#[test]
fn test_json_document_round_trip() {
    let json = r#"{
        "source": "talk.rst",
        "children": [
            {"tagname": "directive", "attributes": {"name": "impress", "hide-title": "true"}},
            {"tagname": "section", "attributes": {"ids": ["a"]}, "children": [
                {"tagname": "title", "text": "A"},
                {"tagname": "directive", "attributes": {"name": "slide", "data-x": "-400"}}
            ]}
        ]
    }"#;
    let mut document: Document = serde_json::from_str(json).unwrap();
    let mut builder = PresentationBuilder::default();
    let mut state = builder.build_state();

    builder.process(&mut state, &mut document).unwrap();
    let output = serde_json::to_value(&document).unwrap();

    let slide = &output["children"][0];
    assert_eq!(slide["attributes"]["classes"], serde_json::json!(["step", "slide"]));
    assert_eq!(slide["attributes"]["data-x"], serde_json::json!(-400.0));
    assert_eq!(slide["children"][0]["attributes"]["classes"], serde_json::json!(["hidden"]));
}

#[test]
fn test_finish_relocates_private_folders() {
    let out = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(out.path().join("_static")).unwrap();
    std::fs::write(out.path().join("_static/impress.css"), "body {}").unwrap();
    let builder = PresentationBuilder::default();

    let moved = builder.finish(out.path()).unwrap();

    assert_eq!(moved, [out.path().join("static")]);
    assert!(out.path().join("static/impress.css").is_file());
    assert_eq!(builder.public_uri("_static/impress.css"), "static/impress.css");
}
