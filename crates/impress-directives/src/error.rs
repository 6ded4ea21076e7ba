//! Errors and diagnostics produced while executing directives.
//!
//! Malformed directive invocations are reported as [`DirectiveError`]s.
//! Directive execution never aborts the build: errors and authoring warnings
//! are both turned into [`Diagnostic`]s that are logged and collected in the
//! processing report.

mod diagnostic;
mod severity;

pub use diagnostic::Diagnostic;
pub use severity::Severity;

use thiserror::Error;

/// A directive invocation that cannot be executed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("unknown directive `{0}`")]
    UnknownDirective(String),

    #[error("directive node has no `name` attribute")]
    MissingName,

    #[error("`{directive}` directive has no option `{option}`")]
    UnknownOption { directive: String, option: String },

    #[error("invalid value `{value}` for option `{option}` of `{directive}`: {reason}")]
    InvalidOption {
        directive: String,
        option: String,
        value: String,
        reason: String,
    },
}
