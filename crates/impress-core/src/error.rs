//! Errors raised while reading slide coordinates.

use thiserror::Error;

/// Errors produced when a slide's layout attributes cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// A slide carries neither a `dupnames` nor an `ids` entry.
    ///
    /// Every section is expected to be named by the parser before layout runs.
    #[error("slide {index} has neither a `dupnames` nor an `ids` entry")]
    MissingIdentifier { index: usize },

    #[error("attribute `{key}` has non-numeric value `{value}`")]
    InvalidNumber { key: String, value: String },

    #[error("attribute `{key}` holds a list where a number was expected")]
    NotNumeric { key: String },
}
