//! Error types for Impress operations.
//!
//! This module provides the main error type [`ImpressError`] which wraps
//! the error conditions that can occur while laying out a presentation.

use std::io;

use thiserror::Error;

use impress_core::CoordError;
use impress_directives::Diagnostic;

/// A positioning function reference that cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The name is not built in and has no `module.function` form.
    #[error("unknown positioning function `{0}`")]
    UnknownFunction(String),

    #[error("cannot load module `{module}` for positioning function `{reference}`")]
    MissingModule { module: String, reference: String },

    #[error("module `{module}` has no positioning function `{function}`")]
    MissingFunction { module: String, function: String },
}

/// Errors raised by the layout pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A slide names a positioning function that cannot be found.
    #[error(transparent)]
    Unresolved(#[from] ResolveError),

    #[error(transparent)]
    Coord(#[from] CoordError),
}

/// The main error type for Impress operations.
#[derive(Debug, Error)]
pub enum ImpressError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Directive errors in strict mode; the first diagnostic is shown.
    #[error("{}", .diagnostics.first().map(ToString::to_string).unwrap_or_default())]
    Directive { diagnostics: Vec<Diagnostic> },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Document error: {0}")]
    Document(Box<dyn std::error::Error + Send + Sync>),
}
