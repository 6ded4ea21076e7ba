//! A single message about one directive invocation.

use std::fmt;

use super::{DirectiveError, Severity};

/// A build-log message tied to a source document and, usually, a directive.
///
/// Displays in the build console format `<source>:: <SEVERITY>: <message>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    source: String,
    directive: Option<String>,
    message: String,
}

impl Diagnostic {
    /// Create a warning for the given source document.
    pub fn warning(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            source: source.into(),
            directive: None,
            message: message.into(),
        }
    }

    /// Create an error for the given source document.
    pub fn error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            source: source.into(),
            directive: None,
            message: message.into(),
        }
    }

    /// Turn a rejected invocation into an error diagnostic.
    pub fn from_error(source: impl Into<String>, err: &DirectiveError) -> Self {
        let directive = match err {
            DirectiveError::UnknownDirective(name) => Some(name.clone()),
            DirectiveError::UnknownOption { directive, .. }
            | DirectiveError::InvalidOption { directive, .. } => Some(directive.clone()),
            DirectiveError::MissingName => None,
        };
        Self {
            directive,
            ..Self::error(source, err.to_string())
        }
    }

    /// Name the directive this diagnostic refers to (builder style).
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = Some(directive.into());
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn directive(&self) -> Option<&str> {
        self.directive.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:: {}: {}", self.source, self.severity, self.message)
    }
}
