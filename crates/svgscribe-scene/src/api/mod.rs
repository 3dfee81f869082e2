//! Drawing-command vocabulary: geometry aliases, pens, brushes, fonts, paths, hints and the
//! [`Graphics`] trait.

mod brush;
mod color;
mod font;
mod graphics;
mod hints;
mod path;
mod pen;

pub use brush::{
    Brush, FillMode, GradientStop, HatchBrush, HatchStyle, LinearGradientBrush, PathGradientBrush,
    TextureBrush, WrapMode,
};
pub use color::Argb;
pub use font::{Font, StringAlignment, StringFormat, TextLayout};
pub use graphics::Graphics;
pub use hints::{
    CompositingMode, CompositingQuality, GraphicsUnit, InterpolationMode, MatrixOrder,
    PixelOffsetMode, RenderHints, SmoothingMode, TextRenderingHint,
};
pub use path::{GraphicsPath, point_type};
pub use pen::{DashStyle, LineCap, LineJoin, Pen};

pub type PointF = svgscribe_core::Point;
pub type SizeF = svgscribe_core::Size;
pub type RectF = svgscribe_core::Rect;

/// Token returned by `save`. Never produced by the scene builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphicsState(pub u32);

/// Token returned by `begin_container`; holds the nesting depth it opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphicsContainer(pub usize);

/// Area made of rectangles, as passed to `fill_region`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Region {
    pub rects: Vec<RectF>,
}
