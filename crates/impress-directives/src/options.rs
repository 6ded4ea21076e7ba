//! Directive option specs and raw option conversion.
//!
//! Each directive declares which named options it accepts and how their raw
//! text is converted before it reaches the document tree.

use impress_core::attribute::{AttrValue, Attributes};

use crate::error::DirectiveError;

/// Extra class tags, promoted into the section's `classes`.
pub const CLASS: &str = "class";
/// Positioning function name.
pub const FUNC: &str = "func";
/// Visual title suppression, `true` or `false`.
pub const HIDE_TITLE: &str = "hide-title";

/// How the raw text of an option is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Kept as text.
    Unchanged,
    /// Whitespace separated class names, normalized.
    ClassList,
    /// `true` or `false`.
    Flag,
    /// A non-negative integer.
    NonNegativeInt,
}

impl OptionKind {
    /// Convert raw option text.
    ///
    /// # Errors
    ///
    /// Returns a human readable reason when the text is not acceptable.
    pub fn convert(self, raw: &str) -> Result<AttrValue, String> {
        match self {
            OptionKind::Unchanged => Ok(AttrValue::Text(raw.to_string())),
            OptionKind::ClassList => class_list(raw).map(AttrValue::List),
            OptionKind::Flag => choice(raw, &["true", "false"]).map(AttrValue::Text),
            OptionKind::NonNegativeInt => raw
                .trim()
                .parse::<u64>()
                .map(AttrValue::from)
                .map_err(|_| "expected a non-negative integer".to_string()),
        }
    }
}

/// A directive's accepted options.
pub type OptionSpec = &'static [(&'static str, OptionKind)];

/// Options accepted by the `impress` directive.
pub const GLOBAL_OPTIONS: OptionSpec = &[
    (FUNC, OptionKind::Unchanged),
    (CLASS, OptionKind::ClassList),
    (HIDE_TITLE, OptionKind::Flag),
    ("data-scale", OptionKind::NonNegativeInt),
];

/// Options accepted by the `step` and `slide` directives.
pub const STEP_OPTIONS: OptionSpec = &[
    (FUNC, OptionKind::Unchanged),
    (CLASS, OptionKind::ClassList),
    (HIDE_TITLE, OptionKind::Flag),
    ("data-scale", OptionKind::NonNegativeInt),
    ("data-x", OptionKind::Unchanged),
    ("data-y", OptionKind::Unchanged),
    ("data-z", OptionKind::Unchanged),
    ("data-rotate", OptionKind::Unchanged),
    ("data-rotate-x", OptionKind::Unchanged),
    ("data-rotate-y", OptionKind::Unchanged),
    ("data-rotate-z", OptionKind::Unchanged),
];

/// Convert raw `(name, text)` options against a directive's spec.
///
/// # Errors
///
/// Returns [`DirectiveError::UnknownOption`] for names the directive does not accept and
/// [`DirectiveError::InvalidOption`] for values that fail conversion.
pub fn parse_options<'a>(
    directive: &str,
    spec: OptionSpec,
    raw: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<Attributes, DirectiveError> {
    let mut options = Attributes::new();
    for (name, value) in raw {
        let (_, kind) = spec.iter().find(|(known, _)| *known == name).ok_or_else(|| {
            DirectiveError::UnknownOption {
                directive: directive.to_string(),
                option: name.to_string(),
            }
        })?;
        let converted = kind
            .convert(value)
            .map_err(|reason| DirectiveError::InvalidOption {
                directive: directive.to_string(),
                option: name.to_string(),
                value: value.to_string(),
                reason,
            })?;
        options.insert(name, converted);
    }
    Ok(options)
}

/// Split and normalize a class list.
///
/// Each entry is lowercased; runs of characters other than ASCII letters and
/// digits collapse to a single `-`, and leading or trailing `-` are dropped.
fn class_list(raw: &str) -> Result<Vec<String>, String> {
    raw.split_whitespace()
        .map(|name| {
            let normalized = normalize_class(name);
            if normalized.is_empty() {
                Err(format!("cannot make `{name}` into a class name"))
            } else {
                Ok(normalized)
            }
        })
        .collect()
}

fn normalize_class(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !normalized.is_empty() {
                normalized.push('-');
            }
            pending_dash = false;
            normalized.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    normalized
}

fn choice(raw: &str, values: &[&str]) -> Result<String, String> {
    let value = raw.trim().to_lowercase();
    if values.contains(&value.as_str()) {
        Ok(value)
    } else {
        Err(format!("expected one of {}", values.join(", ")))
    }
}
