#![forbid(unsafe_code)]

//! Enhanced-metafile (EMF) record reader.
//!
//! Only the records a GDI stroke with custom line caps produces are interpreted: paths,
//! polylines, polygons, Béziers, pens, brushes and world transforms. Everything else is skipped.
//! The reader reports recovered shapes through [`MetafileSink`] after the whole stream was read,
//! so clustered [visual points](points::VisualPoint) are drawn at their final centroid.

pub mod error;
pub mod objects;
mod parser;
pub mod points;
pub mod records;
mod writer;

pub use error::{MetafileParseError, Result};
pub use objects::{GdiObject, LogBrush, LogPen};
pub use parser::{
    MetafileShape, MetafileShapes, MetafileSink, ParseOptions, ParseStats, parse, parse_shapes,
};
pub use writer::MetafileWriter;
