//! Impress Core Types and Definitions
//!
//! This crate provides the foundational types used to lay out a document as
//! a sequence of slides in 3D space. It includes:
//!
//! - **Attributes**: Raw per-node attribute values and their coercion rules ([`attribute`] module)
//! - **Nodes**: The document tree handed over by the parser ([`node`] module)
//! - **Coordinates**: Named pose fields and the per-slide coordinate view ([`coord`] module)
//! - **Slides**: Read-only access to the flattened slide list ([`slides`] module)

pub mod attribute;
pub mod coord;
pub mod node;
pub mod slides;

mod error;

pub use error::CoordError;
