//! Flattening of the nested section tree into a slide sequence.
//!
//! Sections are collected level by level: every top-level section first, then
//! every section nested one level deep, and so on. Within a level, document
//! order is kept.

use std::collections::VecDeque;

use log::{debug, trace};

use impress_core::node::{Document, Node};

const STEP_CLASS: &str = "step";
const SLIDE_CLASS: &str = "slide";

/// Replace the document's children with its sections in level order.
///
/// Nested sections are detached from their parents; every other child stays
/// where it was. Top-level children that are not sections are discarded.
/// Returns the number of slides.
pub fn flatten(document: &mut Document) -> usize {
    let top_level = std::mem::take(&mut document.children);
    let discarded = top_level.iter().filter(|node| !node.is_section()).count();
    let mut queue: VecDeque<Node> = top_level.into_iter().filter(Node::is_section).collect();

    let mut slides = Vec::with_capacity(queue.len());
    while let Some(mut slide) = queue.pop_front() {
        let (sections, content): (Vec<Node>, Vec<Node>) = std::mem::take(&mut slide.children)
            .into_iter()
            .partition(Node::is_section);
        slide.children = content;
        queue.extend(sections);
        classify(&mut slide);
        slides.push(slide);
    }

    debug!(source = document.source, slides = slides.len(), discarded; "Flattened document");
    trace!(slides:?; "Flattened slides");

    document.children = slides;
    document.children.len()
}

/// Tag a slide that was never touched by a step directive.
///
/// Only the classes it lacks are appended, so an existing `slide` is not doubled.
fn classify(slide: &mut Node) {
    if slide.attributes.has_class(STEP_CLASS) {
        return;
    }
    let classes = slide.attributes.classes_mut();
    for class in [STEP_CLASS, SLIDE_CLASS] {
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn ids(document: &Document) -> Vec<&str> {
        document
            .children
            .iter()
            .map(|slide| slide.attributes.ids()[0].as_str())
            .collect()
    }

    #[test]
    fn test_level_order() {
        let mut doc = Document::new("talk.rst")
            .with_child(
                Node::section("a")
                    .with_child(Node::title("A"))
                    .with_child(Node::section("a1").with_child(Node::section("a1x")))
                    .with_child(Node::section("a2")),
            )
            .with_child(Node::section("b").with_child(Node::section("b1")));

        let count = flatten(&mut doc);

        assert_eq!(count, 6);
        assert_eq!(ids(&doc), ["a", "b", "a1", "a2", "b1", "a1x"]);
        assert_eq!(doc.children[0].children.len(), 1);
        assert!(doc.children.iter().all(|slide| !slide
            .children
            .iter()
            .any(Node::is_section)));
    }

    #[test]
    fn test_non_section_top_level_children_are_dropped() {
        let mut doc = Document::new("talk.rst")
            .with_child(Node::paragraph("preamble"))
            .with_child(Node::section("a"));

        flatten(&mut doc);

        assert_eq!(ids(&doc), ["a"]);
    }

    #[test]
    fn test_untagged_slides_gain_only_missing_classes() {
        let mut stepped = Node::section("a");
        stepped.attributes.classes_mut().extend(["step".to_string(), "wide".to_string()]);
        let mut tagged = Node::section("b");
        tagged.attributes.classes_mut().push("slide".to_string());
        let mut doc = Document::new("talk.rst")
            .with_child(stepped)
            .with_child(tagged)
            .with_child(Node::section("c"));

        flatten(&mut doc);

        assert_eq!(doc.children[0].attributes.classes(), ["step", "wide"]);
        assert_eq!(doc.children[1].attributes.classes(), ["slide", "step"]);
        assert_eq!(doc.children[2].attributes.classes(), ["step", "slide"]);
    }

    #[test]
    fn test_empty_document() {
        let mut doc = Document::new("empty.rst");

        assert_eq!(flatten(&mut doc), 0);
        assert!(doc.children.is_empty());
    }

    /// A section tree where node `i` hangs under `parents[i] % (i + 1)`; a
    /// pick of `i` itself puts the node at top level. Also returns the ids in
    /// level order.
    fn tree(parents: &[usize]) -> (Document, Vec<String>) {
        let parent_of: Vec<Option<usize>> = parents
            .iter()
            .enumerate()
            .map(|(i, pick)| Some(pick % (i + 1)).filter(|p| *p < i))
            .collect();
        let mut built: Vec<Option<Node>> = (0..parents.len())
            .map(|i| Some(Node::section(format!("s{i}"))))
            .collect();

        let mut doc = Document::new("prop.rst");
        for i in (0..parents.len()).rev() {
            let Some(node) = built[i].take() else {
                continue;
            };
            match parent_of[i].and_then(|p| built[p].as_mut()) {
                Some(parent) => parent.children.insert(0, node),
                None => doc.children.insert(0, node),
            }
        }

        let mut expected = Vec::new();
        let mut frontier: Vec<&Node> = doc.children.iter().collect();
        while !frontier.is_empty() {
            expected.extend(frontier.iter().map(|n| n.attributes.ids()[0].clone()));
            frontier = frontier.iter().flat_map(|n| n.children.iter()).collect();
        }
        (doc, expected)
    }

    proptest! {
        #[test]
        fn prop_flatten_keeps_every_section_in_level_order(
            parents in prop::collection::vec(0usize..64, 0..24)
        ) {
            let (mut doc, expected) = tree(&parents);
            let total = doc.count_sections();

            flatten(&mut doc);

            let actual: Vec<String> = ids(&doc).into_iter().map(str::to_string).collect();
            prop_assert_eq!(actual.len(), total);
            prop_assert_eq!(actual, expected);
            for slide in &doc.children {
                prop_assert!(slide.attributes.has_class("step"));
                prop_assert!(!slide.children.iter().any(Node::is_section));
            }
        }
    }
}
