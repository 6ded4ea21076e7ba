//! The document tree handed over by the parser.
//!
//! Nodes are identified by their `tagname` the same way the upstream markup
//! parser names them (`section`, `title`, `paragraph`, ...). Layout only cares
//! about sections; every other node is carried along untouched.

use serde::{Deserialize, Serialize};

use crate::attribute::{AttrValue, Attributes, IDS};

/// Tag name of section nodes.
pub const SECTION: &str = "section";
/// Tag name of title nodes.
pub const TITLE: &str = "title";
/// Tag name of paragraph nodes.
pub const PARAGRAPH: &str = "paragraph";
/// Tag name of directive invocations that have not been executed yet.
pub const DIRECTIVE: &str = "directive";

/// One node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub tagname: String,

    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,

    /// Text content of leaf nodes such as titles and paragraphs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Node {
    /// Create an empty node with the given tag name.
    pub fn new(tagname: impl Into<String>) -> Self {
        Self {
            tagname: tagname.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Create a section carrying a single id.
    pub fn section(id: impl Into<String>) -> Self {
        let mut node = Self::new(SECTION);
        node.attributes.list_mut(IDS).push(id.into());
        node
    }

    /// Create a title node with the given text.
    pub fn title(text: impl Into<String>) -> Self {
        Self::new(TITLE).with_text(text)
    }

    /// Create a paragraph node with the given text.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(PARAGRAPH).with_text(text)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn is_section(&self) -> bool {
        self.tagname == SECTION
    }

    pub fn is_directive(&self) -> bool {
        self.tagname == DIRECTIVE
    }

    /// The node that follows this one in document order, i.e. its first child.
    pub fn next_node_mut(&mut self) -> Option<&mut Node> {
        self.children.first_mut()
    }

    /// Count the sections in this subtree, including this node.
    pub fn count_sections(&self) -> usize {
        let own = usize::from(self.is_section());
        own + self
            .children
            .iter()
            .map(Node::count_sections)
            .sum::<usize>()
    }
}

/// The root of a parsed source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Source identifier, normally the path of the source file.
    pub source: String,

    #[serde(default)]
    pub children: Vec<Node>,
}

impl Document {
    /// Create an empty document for the given source.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Count every section in the document, at any depth.
    pub fn count_sections(&self) -> usize {
        self.children.iter().map(Node::count_sections).sum()
    }

    /// Iterate over the top-level sections.
    pub fn sections(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(|node| node.is_section())
    }
}
