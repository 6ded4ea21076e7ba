//! The `impress`, `step` and `slide` directives.

use log::{debug, warn};

use impress_core::{attribute::Attributes, node::Node};

use crate::{
    BuildState,
    error::Diagnostic,
    options::{CLASS, GLOBAL_OPTIONS, HIDE_TITLE, OptionSpec, STEP_OPTIONS},
};

/// Class inserted first on every section touched by a step.
pub const STEP_CLASS: &str = "step";
/// Class appended by the slide directive.
pub const SLIDE_CLASS: &str = "slide";
/// Class inserted on a title hidden with `hide-title: true`.
pub const HIDDEN_CLASS: &str = "hidden";

/// Everything a directive may touch while it runs.
pub struct DirectiveContext<'a> {
    /// State shared across the whole build pass.
    pub state: &'a mut BuildState,
    /// Source identifier of the document being processed.
    pub source: &'a str,
    /// The node enclosing the directive; `None` at document level.
    pub parent: Option<&'a mut Node>,
}

/// Result of running a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The directive ran without effect; the diagnostic says why.
    Ignored(Diagnostic),
}

/// A block-level directive that annotates the document tree.
pub trait Directive {
    /// Name the directive is invoked by.
    fn name(&self) -> &'static str;

    /// Options the directive accepts.
    fn option_spec(&self) -> OptionSpec;

    /// Execute the directive with already converted options.
    fn run(&self, ctx: &mut DirectiveContext<'_>, options: Attributes) -> Outcome;
}

/// Records document-wide default options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Impress;

impl Directive for Impress {
    fn name(&self) -> &'static str {
        "impress"
    }

    fn option_spec(&self) -> OptionSpec {
        GLOBAL_OPTIONS
    }

    fn run(&self, ctx: &mut DirectiveContext<'_>, options: Attributes) -> Outcome {
        if ctx.state.signal().is_pending() {
            debug!(source = ctx.source; "Reset requested, clearing global options");
            ctx.state.global_mut().clear();
        }
        ctx.state.global_mut().register(ctx.source, &options);
        debug!(source = ctx.source, count = options.len(); "Registered global options");
        Outcome::Applied
    }
}

/// Merges its options onto the enclosing section.
#[derive(Debug, Clone, Copy, Default)]
pub struct Step;

impl Step {
    /// Shared body of `step` and `slide`, reporting warnings under `name`.
    fn apply(name: &str, ctx: &mut DirectiveContext<'_>, mut options: Attributes) -> Outcome {
        if ctx.state.signal().is_pending() {
            debug!(source = ctx.source; "Reset requested, clearing step state");
            ctx.state.signal_mut().consume();
            ctx.state.steps_mut().clear();
        }

        let defaults = ctx.state.global_mut().merge_into(ctx.source, &mut options);

        let Some(section) = ctx.parent.as_deref_mut().filter(|parent| parent.is_section()) else {
            let diagnostic = Diagnostic::warning(
                ctx.source,
                format!("{name} found out of section are ignored"),
            )
            .with_directive(name);
            warn!("{diagnostic}");
            return Outcome::Ignored(diagnostic);
        };

        let hide_title = options.text(HIDE_TITLE) == Some("true");
        let classes = options
            .remove(CLASS)
            .map(|mut value| std::mem::take(value.make_list()))
            .unwrap_or_default();

        for (key, value) in options.iter() {
            section.attributes.insert(key, value.clone());
        }
        let section_classes = section.attributes.classes_mut();
        section_classes.extend(classes);
        section_classes.insert(0, STEP_CLASS.to_string());

        if hide_title {
            if let Some(title) = section.next_node_mut() {
                title.attributes.classes_mut().insert(0, HIDDEN_CLASS.to_string());
            }
        }

        ctx.state.steps_mut().record_applied(ctx.source);
        debug!(source = ctx.source, directive = name, merged_defaults = defaults; "Applied step options");
        Outcome::Applied
    }
}

impl Directive for Step {
    fn name(&self) -> &'static str {
        "step"
    }

    fn option_spec(&self) -> OptionSpec {
        STEP_OPTIONS
    }

    fn run(&self, ctx: &mut DirectiveContext<'_>, options: Attributes) -> Outcome {
        Step::apply(self.name(), ctx, options)
    }
}

/// A step that additionally tags the section as a slide.
#[derive(Debug, Clone, Copy, Default)]
pub struct Slide;

impl Directive for Slide {
    fn name(&self) -> &'static str {
        "slide"
    }

    fn option_spec(&self) -> OptionSpec {
        STEP_OPTIONS
    }

    fn run(&self, ctx: &mut DirectiveContext<'_>, mut options: Attributes) -> Outcome {
        options.list_mut(CLASS).push(SLIDE_CLASS.to_string());
        Step::apply(self.name(), ctx, options)
    }
}
