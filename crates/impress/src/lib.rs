//! Impress - lay out a document's sections as slides in 3D space.
//!
//! A parsed document arrives as a tree of sections annotated by the `impress`,
//! `step` and `slide` directives. This crate runs those directives, flattens
//! the tree into an ordered list of slides and gives each slide a pose
//! (translation, rotation and scale) through pluggable positioning functions.

pub mod config;
pub mod registry;

mod dispatch;
mod error;
mod flatten;
mod funcs;
mod host;

pub use impress_core::{CoordError, attribute, coord, node, slides};
pub use impress_directives::{BuildState, Diagnostic, Report, ResetSignal, Severity};

pub use dispatch::{LayoutSummary, position_slides};
pub use error::{ImpressError, LayoutError, ResolveError};
pub use flatten::flatten;
pub use host::{public_uri, relocate_private_dirs};

use std::path::{Path, PathBuf};

use log::{debug, info, trace};

use impress_core::{coord::Pose, node::Document};
use impress_directives::DirectiveSet;

use config::AppConfig;
use registry::{FunctionModule, ModuleLoader, Registry};

/// What one full build of a document did.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Directive pass result, including non-fatal diagnostics.
    pub directives: Report,
    /// Positioning pass result.
    pub layout: LayoutSummary,
}

/// Builder for laying out presentations.
///
/// This provides an API for processing documents through the directive,
/// flattening and positioning stages.
///
/// # Examples
///
/// ```rust
/// use impress::{PresentationBuilder, node::{Document, Node}};
///
/// let mut document = Document::new("talk.rst")
///     .with_child(Node::section("intro").with_child(Node::section("details")));
///
/// let mut builder = PresentationBuilder::default();
/// let mut state = builder.build_state();
/// let report = builder.process(&mut state, &mut document)
///     .expect("Failed to lay out");
///
/// assert_eq!(report.layout.positioned, 2);
/// assert_eq!(document.children.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct PresentationBuilder {
    config: AppConfig,
    registry: Registry,
    directives: DirectiveSet,
}

impl PresentationBuilder {
    /// Create a new builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Layout and host settings; the built-in positioning
    ///   functions are configured from its layout section.
    pub fn new(config: AppConfig) -> Self {
        let registry = Registry::new(config.layout());
        Self {
            config,
            registry,
            directives: DirectiveSet::standard(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Register an external positioning module (builder style).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::ops::ControlFlow;
    /// use impress::{PresentationBuilder, registry::StaticModule};
    ///
    /// let builder = PresentationBuilder::default().with_module(
    ///     "layouts",
    ///     StaticModule::new().with_function("diagonal", |coord, _| {
    ///         let step = coord.index() as f64 * 500.0;
    ///         coord.set_x(step);
    ///         coord.set_y(step);
    ///         Ok(ControlFlow::Continue(()))
    ///     }),
    /// );
    /// ```
    pub fn with_module(mut self, path: impl Into<String>, module: impl FunctionModule + 'static) -> Self {
        self.registry.register_module(path, module);
        self
    }

    /// Install a loader for modules that were not registered (builder style).
    pub fn with_loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.registry.set_loader(loader);
        self
    }

    /// Fresh build state observing the configured reset variable.
    pub fn build_state(&self) -> BuildState {
        BuildState::new(ResetSignal::from_env(self.config.host().reset_var()))
    }

    /// Run every directive in the document.
    ///
    /// Rejected directives and misplaced steps are reported, not fatal,
    /// unless strict directive handling is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ImpressError::Directive`] in strict mode when any directive
    /// was rejected.
    pub fn apply_directives(
        &self,
        state: &mut BuildState,
        document: &mut Document,
    ) -> Result<Report, ImpressError> {
        let report = self.directives.process(state, document);

        if self.config.host().strict_directives() && report.has_errors() {
            let diagnostics = report
                .diagnostics()
                .iter()
                .filter(|diagnostic| diagnostic.severity().is_error())
                .cloned()
                .collect();
            return Err(ImpressError::Directive { diagnostics });
        }
        Ok(report)
    }

    /// Flatten the document and position its slides.
    ///
    /// The pose of the last positioned slide is recorded in the step state
    /// when all of its fields are numeric.
    ///
    /// # Errors
    ///
    /// Returns [`ImpressError::Layout`] when a positioning function cannot be
    /// resolved or fails.
    pub fn position(
        &mut self,
        state: &mut BuildState,
        document: &mut Document,
    ) -> Result<LayoutSummary, ImpressError> {
        info!(source = document.source; "Laying out document");
        flatten(document);

        let summary = position_slides(
            &mut document.children,
            &mut self.registry,
            self.config.layout().default_func(),
        )?;

        if let Some(last) = summary.last_positioned() {
            // Fields no function read may still hold free text.
            match Pose::peek(&document.children[last].attributes) {
                Ok(pose) => {
                    trace!(pose:?; "Last pose");
                    state.steps_mut().record_pose(&document.source, pose);
                }
                Err(err) => debug!(slide = last, err:%; "Last pose not recorded"),
            }
        }

        debug!(
            source = document.source,
            positioned = summary.positioned;
            "Layout finished"
        );
        Ok(summary)
    }

    /// Run the directive pass followed by the layout pass.
    ///
    /// # Errors
    ///
    /// Fails as [`Self::apply_directives`] or [`Self::position`] do.
    pub fn process(
        &mut self,
        state: &mut BuildState,
        document: &mut Document,
    ) -> Result<BuildReport, ImpressError> {
        let directives = self.apply_directives(state, document)?;
        let layout = self.position(state, document)?;
        Ok(BuildReport { directives, layout })
    }

    /// Relocate private folders in a finished output directory.
    ///
    /// # Errors
    ///
    /// Returns [`ImpressError::Io`] if a folder cannot be moved.
    pub fn finish(&self, outdir: &Path) -> Result<Vec<PathBuf>, ImpressError> {
        Ok(relocate_private_dirs(outdir, self.config.host())?)
    }

    /// The name a private URI is served under.
    pub fn public_uri<'a>(&self, uri: &'a str) -> &'a str {
        public_uri(uri, self.config.host().private_prefix())
    }
}
