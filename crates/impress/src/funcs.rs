//! Built-in positioning functions.

use std::ops::ControlFlow;

use impress_core::{
    coord::{Field, SlideCoord},
    slides::Slides,
};

use crate::{
    config::LayoutConfig,
    registry::{Placement, PositionFn, position_fn},
};

/// The built-in namespace, configured from `config`.
pub(crate) fn builtins(config: &LayoutConfig) -> Vec<(&'static str, PositionFn)> {
    let spacing = config.spacing();
    let radius = config.radius();
    let step = config.spiral_step();

    let default = position_fn(move |coord, _| cascade(coord, Field::X, spacing));
    let vertical = position_fn(move |coord, _| cascade(coord, Field::Y, spacing));
    let circle = position_fn(move |coord, _| spiral(coord, radius, step));

    vec![
        ("default", default),
        ("vertical", vertical),
        ("manual", position_fn(manual)),
        ("spiral", circle),
        ("stop", position_fn(stop)),
    ]
}

/// Whether `field` carries a value the author put on this slide.
fn is_local(coord: &SlideCoord<'_>, field: Field) -> bool {
    coord.attributes().contains_key(field.key()) && !coord.is_inherited(field)
}

/// Offset `field` from the previous slide unless it was set locally.
fn cascade(coord: &mut SlideCoord<'_>, field: Field, spacing: f64) -> Placement {
    let local = is_local(coord, field);
    let value = coord.get(field)?;
    if coord.index() > 0 && !local {
        coord.set(field, value + spacing);
    }
    Ok(ControlFlow::Continue(()))
}

/// Keep explicit and inherited values as they are.
fn manual(coord: &mut SlideCoord<'_>, _: &Slides<'_>) -> Placement {
    coord.pose()?;
    Ok(ControlFlow::Continue(()))
}

/// Place the slide on a circle, facing along the tangent.
fn spiral(coord: &mut SlideCoord<'_>, radius: f64, step: f64) -> Placement {
    let angle = coord.index() as f64 * step;
    let (sin, cos) = angle.to_radians().sin_cos();
    for (field, value) in [
        (Field::X, radius * cos),
        (Field::Y, radius * sin),
        (Field::Rotate, angle),
    ] {
        if !is_local(coord, field) {
            coord.set(field, value);
        }
    }
    Ok(ControlFlow::Continue(()))
}

fn stop(_: &mut SlideCoord<'_>, _: &Slides<'_>) -> Placement {
    Ok(ControlFlow::Break(()))
}
