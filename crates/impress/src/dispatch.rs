//! The positioning pass over a flattened slide list.

use log::{debug, info, trace};

use impress_core::{coord::SlideCoord, node::Node, slides::Slides};

use crate::{error::LayoutError, registry::Registry};

/// Outcome of one positioning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutSummary {
    /// Number of slides in the list.
    pub slides: usize,
    /// Number of slides whose function ran to completion.
    pub positioned: usize,
    /// Index of the slide whose function halted the pass.
    pub halted_at: Option<usize>,
}

impl LayoutSummary {
    /// Index of the last slide that was positioned without halting.
    pub fn last_positioned(&self) -> Option<usize> {
        self.positioned.checked_sub(1)
    }
}

/// Position every slide in order.
///
/// Each slide first inherits unset fields from the previous positioned slide,
/// then runs the function named by its `func` attribute, or `default_func`.
/// Every slide must carry an identifier.
/// A function that breaks stops the pass; later slides are left untouched.
///
/// # Errors
///
/// Fails on the first slide without an identifier, the first function name
/// that cannot be resolved, or the first error returned by a positioning
/// function.
pub fn position_slides(
    slides: &mut [Node],
    registry: &mut Registry,
    default_func: &str,
) -> Result<LayoutSummary, LayoutError> {
    info!(slides = slides.len(); "Positioning slides");
    let mut summary = LayoutSummary {
        slides: slides.len(),
        ..LayoutSummary::default()
    };

    for index in 0..slides.len() {
        let (before, rest) = slides.split_at_mut(index);
        let Some((current, after)) = rest.split_first_mut() else {
            break;
        };

        let mut coord = SlideCoord::new(index, &mut current.attributes);
        if let Some(previous) = before.last() {
            let inherited = coord.inherit_from(&previous.attributes);
            trace!(index, inherited; "Inherited from previous slide");
        }

        let id = coord.id()?.to_string();
        let name = coord
            .func()
            .map_or_else(|| default_func.to_string(), |func| func.into_owned());
        let func = registry.resolve(&name)?;
        let view = Slides::new(before, after);

        if func(&mut coord, &view)?.is_break() {
            info!(slide = id, func = name; "Positioning halted");
            summary.halted_at = Some(index);
            break;
        }
        debug!(func = name; "Positioned {coord}");
        summary.positioned += 1;
    }

    Ok(summary)
}
