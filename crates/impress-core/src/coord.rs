//! Slide coordinate fields and the per-slide coordinate view.
//!
//! A [`SlideCoord`] is a transient accessor over one slide's attribute
//! mapping. It has no storage of its own: every read and write goes straight
//! to the underlying [`Attributes`], so changes are visible on the node as
//! soon as they are made.
//!
//! Reading a field that is not set stores the field's default first, so a
//! field that has been read once stays present on the slide.

use std::{borrow::Cow, fmt};

use indexmap::IndexMap;

use crate::{
    CoordError,
    attribute::{AttrValue, Attributes, DATA_PREFIX, FUNC},
};

/// A named pose field of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    X,
    Y,
    Z,
    Rotate,
    RotateX,
    RotateY,
    RotateZ,
    Scale,
}

impl Field {
    /// Every pose field, in attribute order.
    pub const ALL: [Field; 8] = [
        Field::X,
        Field::Y,
        Field::Z,
        Field::Rotate,
        Field::RotateX,
        Field::RotateY,
        Field::RotateZ,
        Field::Scale,
    ];

    /// The accessor name of this field, e.g. `rotate_x`.
    pub fn name(self) -> &'static str {
        match self {
            Field::X => "x",
            Field::Y => "y",
            Field::Z => "z",
            Field::Rotate => "rotate",
            Field::RotateX => "rotate_x",
            Field::RotateY => "rotate_y",
            Field::RotateZ => "rotate_z",
            Field::Scale => "scale",
        }
    }

    /// The attribute key this field is stored under, e.g. `data-rotate-x`.
    pub fn key(self) -> &'static str {
        match self {
            Field::X => "data-x",
            Field::Y => "data-y",
            Field::Z => "data-z",
            Field::Rotate => "data-rotate",
            Field::RotateX => "data-rotate-x",
            Field::RotateY => "data-rotate-y",
            Field::RotateZ => "data-rotate-z",
            Field::Scale => "data-scale",
        }
    }

    /// The value stored when the field is read before being set.
    pub fn default_value(self) -> f64 {
        match self {
            Field::Scale => 1.0,
            _ => 0.0,
        }
    }

    /// Whether a slide copies this field from its predecessor.
    ///
    /// Scale never propagates: each slide falls back to its own default.
    pub fn is_inheritable(self) -> bool {
        self != Field::Scale
    }

    /// Look a field up by accessor name or attribute key.
    ///
    /// `rotate_x`, `rotate-x` and `data-rotate-x` all name [`Field::RotateX`].
    pub fn from_name(name: &str) -> Option<Field> {
        let key = attribute_key(name);
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map an accessor name to its attribute key.
///
/// Underscores become hyphens and `data-` is prefixed unless already present.
pub fn attribute_key(name: &str) -> String {
    let key = name.replace('_', "-");
    if key.starts_with(DATA_PREFIX) {
        key
    } else {
        format!("{DATA_PREFIX}{key}")
    }
}

/// Whether an attribute is copied from a predecessor slide by [`SlideCoord::update`].
pub fn is_inherited_key(key: &str) -> bool {
    (key.starts_with(DATA_PREFIX) || key == FUNC) && key != Field::Scale.key()
}

/// Resolve the display identifier of a slide.
///
/// The first `dupnames` entry wins over the first `ids` entry.
pub(crate) fn identity(attributes: &Attributes, index: usize) -> Result<&str, CoordError> {
    attributes
        .dupnames()
        .first()
        .or_else(|| attributes.ids().first())
        .map(String::as_str)
        .ok_or(CoordError::MissingIdentifier { index })
}

/// Transient coordinate accessor over one slide's attributes.
pub struct SlideCoord<'a> {
    index: usize,
    attributes: &'a mut Attributes,
    inherited: Vec<String>,
}

impl<'a> SlideCoord<'a> {
    /// Wrap the attributes of the slide at `index` in the flattened list.
    pub fn new(index: usize, attributes: &'a mut Attributes) -> Self {
        Self {
            index,
            attributes,
            inherited: Vec::new(),
        }
    }

    /// Position of the slide in the flattened list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn attributes(&self) -> &Attributes {
        self.attributes
    }

    /// The slide's display identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError::MissingIdentifier`] if the slide has neither a
    /// `dupnames` nor an `ids` entry.
    pub fn id(&self) -> Result<&str, CoordError> {
        identity(self.attributes, self.index)
    }

    /// Name of the positioning function selected for this slide, if any.
    ///
    /// Numbers and lists are rendered as text, so a malformed reference still
    /// reaches the lookup and fails there under its own name.
    pub fn func(&self) -> Option<Cow<'_, str>> {
        match self.attributes.get(FUNC)? {
            AttrValue::Text(text) => Some(Cow::Borrowed(text)),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Read a field, storing its default first if it is unset.
    pub fn get(&mut self, field: Field) -> Result<f64, CoordError> {
        self.attributes
            .number_or_insert(field.key(), field.default_value())
    }

    /// Write a field directly.
    pub fn set(&mut self, field: Field, value: f64) {
        self.attributes.insert(field.key(), value);
    }

    /// Read any data attribute by accessor name, e.g. `transition_duration`.
    ///
    /// Unknown names default to `0`.
    pub fn get_named(&mut self, name: &str) -> Result<f64, CoordError> {
        let default = Field::from_name(name).map_or(0.0, Field::default_value);
        self.attributes
            .number_or_insert(&attribute_key(name), default)
    }

    /// Write any data attribute by accessor name.
    pub fn set_named(&mut self, name: &str, value: f64) {
        self.attributes.insert(attribute_key(name), value);
    }

    pub fn x(&mut self) -> Result<f64, CoordError> {
        self.get(Field::X)
    }

    pub fn set_x(&mut self, value: f64) {
        self.set(Field::X, value);
    }

    pub fn y(&mut self) -> Result<f64, CoordError> {
        self.get(Field::Y)
    }

    pub fn set_y(&mut self, value: f64) {
        self.set(Field::Y, value);
    }

    pub fn z(&mut self) -> Result<f64, CoordError> {
        self.get(Field::Z)
    }

    pub fn set_z(&mut self, value: f64) {
        self.set(Field::Z, value);
    }

    pub fn rotate(&mut self) -> Result<f64, CoordError> {
        self.get(Field::Rotate)
    }

    pub fn set_rotate(&mut self, value: f64) {
        self.set(Field::Rotate, value);
    }

    pub fn rotate_x(&mut self) -> Result<f64, CoordError> {
        self.get(Field::RotateX)
    }

    pub fn set_rotate_x(&mut self, value: f64) {
        self.set(Field::RotateX, value);
    }

    pub fn rotate_y(&mut self) -> Result<f64, CoordError> {
        self.get(Field::RotateY)
    }

    pub fn set_rotate_y(&mut self, value: f64) {
        self.set(Field::RotateY, value);
    }

    pub fn rotate_z(&mut self) -> Result<f64, CoordError> {
        self.get(Field::RotateZ)
    }

    pub fn set_rotate_z(&mut self, value: f64) {
        self.set(Field::RotateZ, value);
    }

    pub fn scale(&mut self) -> Result<f64, CoordError> {
        self.get(Field::Scale)
    }

    pub fn set_scale(&mut self, value: f64) {
        self.set(Field::Scale, value);
    }

    /// Fill unset inheritable attributes from predecessors and overrides.
    ///
    /// Predecessors are merged in order, later ones overwriting earlier ones;
    /// `overrides` are merged last and win over every predecessor. Only
    /// `data-*` attributes and `func` are considered, `data-scale` never is,
    /// and attributes already present on this slide are left alone.
    ///
    /// Returns the number of attributes copied.
    pub fn update(&mut self, predecessors: &[&Attributes], overrides: &Attributes) -> usize {
        let mut merged: IndexMap<&str, &AttrValue> = IndexMap::new();
        for attributes in predecessors.iter().copied().chain([overrides]) {
            merged.extend(attributes.iter());
        }

        let mut copied = 0;
        for (key, value) in merged {
            if is_inherited_key(key) && !self.attributes.contains_key(key) {
                self.attributes.insert(key, value.clone());
                self.inherited.push(key.to_string());
                copied += 1;
            }
        }
        copied
    }

    /// Fill unset inheritable attributes from the previous slide.
    pub fn inherit_from(&mut self, previous: &Attributes) -> usize {
        self.update(&[previous], &Attributes::new())
    }

    /// Whether a field was copied from a predecessor rather than set locally.
    pub fn is_inherited(&self, field: Field) -> bool {
        self.inherited.iter().any(|key| key == field.key())
    }

    /// Read every pose field, storing defaults for unset ones.
    pub fn pose(&mut self) -> Result<Pose, CoordError> {
        Ok(Pose {
            x: self.x()?,
            y: self.y()?,
            z: self.z()?,
            rotate: self.rotate()?,
            rotate_x: self.rotate_x()?,
            rotate_y: self.rotate_y()?,
            rotate_z: self.rotate_z()?,
            scale: self.scale()?,
        })
    }
}

impl fmt::Display for SlideCoord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut coords: Vec<_> = self
            .attributes
            .iter()
            .filter(|(key, _)| key.starts_with(DATA_PREFIX))
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        coords.sort();
        let id = self.id().unwrap_or("?");
        write!(f, "<SlideCoord {} {} [{}]>", self.index, id, coords.join(", "))
    }
}

/// A snapshot of a slide's full pose.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rotate: f64,
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
    pub scale: f64,
}

impl Pose {
    /// Read a pose from attributes without storing any defaults.
    pub fn peek(attributes: &Attributes) -> Result<Self, CoordError> {
        let read = |field: Field| -> Result<f64, CoordError> {
            Ok(attributes
                .number(field.key())?
                .unwrap_or_else(|| field.default_value()))
        };
        Ok(Self {
            x: read(Field::X)?,
            y: read(Field::Y)?,
            z: read(Field::Z)?,
            rotate: read(Field::Rotate)?,
            rotate_x: read(Field::RotateX)?,
            rotate_y: read(Field::RotateY)?,
            rotate_z: read(Field::RotateZ)?,
            scale: read(Field::Scale)?,
        })
    }

    /// Value of a single field.
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::X => self.x,
            Field::Y => self.y,
            Field::Z => self.z,
            Field::Rotate => self.rotate,
            Field::RotateX => self.rotate_x,
            Field::RotateY => self.rotate_y,
            Field::RotateZ => self.rotate_z,
            Field::Scale => self.scale,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            rotate: 0.0,
            rotate_x: 0.0,
            rotate_y: 0.0,
            rotate_z: 0.0,
            scale: Field::Scale.default_value(),
        }
    }
}
