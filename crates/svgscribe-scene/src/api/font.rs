use super::{GraphicsUnit, PointF, RectF};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub unit: GraphicsUnit,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
}

impl Font {
    /// A regular font sized in points.
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            unit: GraphicsUnit::Point,
            bold: false,
            italic: false,
            underline: false,
            strikeout: false,
        }
    }

    pub fn with_unit(mut self, unit: GraphicsUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn strikeout(mut self) -> Self {
        self.strikeout = true;
        self
    }

    /// Em size in user units (96 per inch).
    pub fn size_in_pixels(&self) -> f64 {
        self.size * self.unit.pixels_per_unit()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StringAlignment {
    #[default]
    Near,
    Center,
    Far,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StringFormat {
    /// Horizontal alignment.
    pub alignment: StringAlignment,
    /// Vertical alignment inside a layout rectangle.
    pub line_alignment: StringAlignment,
    /// Disables word wrapping inside a layout rectangle.
    pub no_wrap: bool,
}

impl StringFormat {
    pub fn centered() -> Self {
        Self {
            alignment: StringAlignment::Center,
            line_alignment: StringAlignment::Center,
            no_wrap: false,
        }
    }
}

/// Where `draw_string` places its text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextLayout {
    /// Top-left (or aligned) anchor, no wrapping.
    At(PointF),
    /// Layout rectangle; text wraps and aligns inside it.
    In(RectF),
}

impl From<PointF> for TextLayout {
    fn from(p: PointF) -> Self {
        TextLayout::At(p)
    }
}

impl From<RectF> for TextLayout {
    fn from(r: RectF) -> Self {
        TextLayout::In(r)
    }
}
