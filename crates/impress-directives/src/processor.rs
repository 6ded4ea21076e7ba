//! Execution of directive nodes embedded in a document tree.
//!
//! The parser leaves each directive invocation in the tree as a node tagged
//! [`DIRECTIVE`](impress_core::node::DIRECTIVE) whose `name` attribute selects
//! the directive and whose remaining attributes are its raw options. The
//! processor runs them in document order against their enclosing node and
//! removes them from the tree.

use std::{collections::HashMap, fmt};

use log::{debug, error, info};

use impress_core::node::{Document, Node};

use crate::{
    BuildState,
    directive::{Directive, DirectiveContext, Impress, Outcome, Slide, Step},
    error::{Diagnostic, DirectiveError},
    options::parse_options,
};

/// Attribute of a directive node holding the directive name.
pub const NAME: &str = "name";

/// A directive invocation read from a directive node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    name: String,
    options: Vec<(String, String)>,
}

impl Invocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }

    /// Add a raw option (builder style).
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push((name.into(), value.into()));
        self
    }

    /// Read an invocation from a directive node.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::MissingName`] if the node has no textual `name`.
    pub fn from_node(node: &Node) -> Result<Self, DirectiveError> {
        let name = node
            .attributes
            .text(NAME)
            .ok_or(DirectiveError::MissingName)?;
        let options = node
            .attributes
            .iter()
            .filter(|(key, _)| *key != NAME)
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Ok(Self {
            name: name.to_string(),
            options,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Summary of one processing pass.
#[derive(Debug, Clone, Default)]
pub struct Report {
    applied: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// Number of directives that took effect.
    pub fn applied(&self) -> usize {
        self.applied
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity().is_error())
    }

    fn record(&mut self, outcome: Result<Outcome, Diagnostic>) {
        match outcome {
            Ok(Outcome::Applied) => self.applied += 1,
            Ok(Outcome::Ignored(diagnostic)) | Err(diagnostic) => {
                self.diagnostics.push(diagnostic)
            }
        }
    }
}

/// The directives available to a document, by name.
pub struct DirectiveSet {
    directives: HashMap<&'static str, Box<dyn Directive>>,
}

impl DirectiveSet {
    /// An empty set; every invocation is rejected as unknown.
    pub fn new() -> Self {
        Self {
            directives: HashMap::new(),
        }
    }

    /// The `impress`, `step` and `slide` directives.
    pub fn standard() -> Self {
        Self::new()
            .with_directive(Impress)
            .with_directive(Step)
            .with_directive(Slide)
    }

    /// Register a directive under its own name (builder style).
    pub fn with_directive(mut self, directive: impl Directive + 'static) -> Self {
        self.directives.insert(directive.name(), Box::new(directive));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.directives.contains_key(name)
    }

    /// Convert an invocation's options and run it.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectiveError`] for unknown directives or options that do
    /// not satisfy the directive's option spec.
    pub fn execute(
        &self,
        invocation: &Invocation,
        ctx: &mut DirectiveContext<'_>,
    ) -> Result<Outcome, DirectiveError> {
        let directive = self
            .directives
            .get(invocation.name.as_str())
            .ok_or_else(|| DirectiveError::UnknownDirective(invocation.name.clone()))?;
        let options = parse_options(
            directive.name(),
            directive.option_spec(),
            invocation
                .options
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        )?;
        Ok(directive.run(ctx, options))
    }

    /// Run every directive node of a document in document order.
    ///
    /// Directive nodes are removed from the tree whether they succeed or not.
    /// Rejected invocations and authoring warnings are logged and collected in
    /// the returned report; processing always continues.
    pub fn process(&self, state: &mut BuildState, document: &mut Document) -> Report {
        info!(source = document.source; "Processing directives");
        let mut report = Report::default();
        let source = document.source.as_str();

        let mut index = 0;
        while index < document.children.len() {
            if document.children[index].is_directive() {
                let node = document.children.remove(index);
                let outcome = self.run_node(state, source, None, &node);
                report.record(outcome);
            } else {
                self.process_node(state, source, &mut document.children[index], &mut report);
                index += 1;
            }
        }

        debug!(
            source = document.source,
            applied = report.applied,
            diagnostics = report.diagnostics.len();
            "Directives processed"
        );
        report
    }

    fn process_node(
        &self,
        state: &mut BuildState,
        source: &str,
        node: &mut Node,
        report: &mut Report,
    ) {
        let mut index = 0;
        while index < node.children.len() {
            if node.children[index].is_directive() {
                let directive = node.children.remove(index);
                let outcome = self.run_node(state, source, Some(&mut *node), &directive);
                report.record(outcome);
            } else {
                self.process_node(state, source, &mut node.children[index], report);
                index += 1;
            }
        }
    }

    fn run_node(
        &self,
        state: &mut BuildState,
        source: &str,
        parent: Option<&mut Node>,
        node: &Node,
    ) -> Result<Outcome, Diagnostic> {
        let mut ctx = DirectiveContext {
            state,
            source,
            parent,
        };
        Invocation::from_node(node)
            .and_then(|invocation| self.execute(&invocation, &mut ctx))
            .map_err(|err| {
                let diagnostic = Diagnostic::from_error(source, &err);
                error!("{diagnostic}");
                diagnostic
            })
    }
}

impl fmt::Debug for DirectiveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.directives.keys().collect();
        names.sort();
        f.debug_tuple("DirectiveSet").field(&names).finish()
    }
}

impl Default for DirectiveSet {
    fn default() -> Self {
        Self::standard()
    }
}
