//! Directives that annotate a document tree with slide layout options.
//!
//! Three directives are provided:
//!
//! - `impress` records document-wide default options,
//! - `step` merges its options onto the enclosing section,
//! - `slide` behaves like `step` and additionally tags the section as a slide.
//!
//! Directives share a [`BuildState`] that lives for one build pass and is
//! cleared either explicitly or through the [`ResetSignal`].
//!
//! # Example
//!
//! ```
//! # use impress_core::node::{Document, Node, DIRECTIVE};
//! # use impress_directives::{BuildState, DirectiveSet};
//! let mut doc = Document::new("talk.rst").with_child(
//!     Node::section("intro")
//!         .with_child(Node::title("Intro"))
//!         .with_child(Node::new(DIRECTIVE).with_attribute("name", "slide")),
//! );
//!
//! let mut state = BuildState::default();
//! let report = DirectiveSet::standard().process(&mut state, &mut doc);
//!
//! assert_eq!(report.applied(), 1);
//! assert_eq!(doc.children[0].attributes.classes(), ["step", "slide"]);
//! ```

pub mod error;
pub mod options;

mod directive;
mod processor;
mod state;

pub use directive::{Directive, DirectiveContext, Impress, Outcome, Slide, Step};
pub use error::{DirectiveError, Diagnostic, Severity};
pub use processor::{DirectiveSet, Invocation, Report};
pub use state::{BuildState, GlobalOptions, ResetSignal, StepState};
