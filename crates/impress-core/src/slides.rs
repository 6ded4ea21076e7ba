//! Read-only access to the flattened slide list.
//!
//! While one slide is being positioned it is borrowed mutably through its
//! [`SlideCoord`](crate::coord::SlideCoord). Every other slide stays
//! readable through [`Slides`], which splits the list around the current
//! slide.

use std::cmp::Ordering;

use crate::{
    CoordError,
    attribute::Attributes,
    coord::{self, Field, Pose},
    node::Node,
};

/// The flattened slide list as seen from the slide being positioned.
#[derive(Debug, Clone, Copy)]
pub struct Slides<'a> {
    before: &'a [Node],
    after: &'a [Node],
}

impl<'a> Slides<'a> {
    /// Build the view from the slides preceding and following the current one.
    pub fn new(before: &'a [Node], after: &'a [Node]) -> Self {
        Self { before, after }
    }

    /// Total number of slides, including the current one.
    pub fn len(&self) -> usize {
        self.before.len() + 1 + self.after.len()
    }

    /// Always `false`: the current slide is part of the list.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index of the slide currently being positioned.
    pub fn current_index(&self) -> usize {
        self.before.len()
    }

    /// Borrow the slide at `index`.
    ///
    /// Returns `None` for the current slide and for indices past the end.
    pub fn get(&self, index: usize) -> Option<SlideRef<'a>> {
        let current = self.current_index();
        let node = match index.cmp(&current) {
            Ordering::Less => self.before.get(index),
            Ordering::Greater => self.after.get(index - current - 1),
            Ordering::Equal => None,
        }?;
        Some(SlideRef { index, node })
    }

    /// The slide positioned just before the current one.
    pub fn previous(&self) -> Option<SlideRef<'a>> {
        self.current_index()
            .checked_sub(1)
            .and_then(|index| self.get(index))
    }

    /// The slide that will be positioned after the current one.
    pub fn following(&self) -> Option<SlideRef<'a>> {
        self.get(self.current_index() + 1)
    }

    /// Iterate over every slide except the current one, in order.
    pub fn iter(&self) -> impl Iterator<Item = SlideRef<'a>> + 'a {
        let offset = self.before.len() + 1;
        let before = self
            .before
            .iter()
            .enumerate()
            .map(|(index, node)| SlideRef { index, node });
        let after = self
            .after
            .iter()
            .enumerate()
            .map(move |(index, node)| SlideRef {
                index: index + offset,
                node,
            });
        before.chain(after)
    }
}

/// A read-only reference to a slide other than the one being positioned.
#[derive(Debug, Clone, Copy)]
pub struct SlideRef<'a> {
    index: usize,
    node: &'a Node,
}

impl<'a> SlideRef<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn attributes(&self) -> &'a Attributes {
        &self.node.attributes
    }

    /// The slide's display identifier.
    pub fn id(&self) -> Result<&'a str, CoordError> {
        coord::identity(&self.node.attributes, self.index)
    }

    /// Value of a field, falling back to its default without storing it.
    pub fn field(&self, field: Field) -> Result<f64, CoordError> {
        Ok(self
            .attributes()
            .number(field.key())?
            .unwrap_or_else(|| field.default_value()))
    }

    pub fn pose(&self) -> Result<Pose, CoordError> {
        Pose::peek(self.attributes())
    }
}
