#![forbid(unsafe_code)]

//! SVG value types and document tree.
//!
//! - `types`: attribute grammars (lengths, colors, paths, transforms, styles) with parse/write
//!   round-trips and locale-independent number formatting
//! - `dom`: arena document tree, markup loader and entity-compressing writer
//! - `geom`: `euclid` aliases shared by the other svgscribe crates

pub mod dom;
pub mod error;
pub mod geom;
pub mod types;

pub use dom::{AttributeValue, Document, ElementKind, Node, NodeId, WriteOptions, load, write};
pub use error::{Error, FormatError, FormatErrorKind, LoadError, Result, TreeStructureError};
pub use geom::{Matrix, Point, Rect, Size};
pub use types::{
    Angle, AngleUnit, Color, Length, LengthUnit, Number, NumberList, Path, PathSegment, PointList,
    SegmentKind, Style, StyleValue, Transform, TransformList,
};

#[cfg(test)]
mod tests;
