//! Attribute value grammars.
//!
//! Every type parses with `FromStr` (or its inherent `parse`) and writes back with `Display`.

mod color;
mod length;
pub mod number;
mod path;
mod points;
mod style;
mod transform;

pub use color::Color;
pub use length::{Angle, AngleUnit, Length, LengthUnit};
pub use number::{FmtNumber, Number, NumberList, fmt_number};
pub use path::{Path, PathSegment, SegmentKind};
pub use points::PointList;
pub use style::{Style, StyleValue};
pub use transform::{Transform, TransformList};
