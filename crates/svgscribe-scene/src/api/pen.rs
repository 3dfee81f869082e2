use super::Argb;
use serde::{Deserialize, Serialize};

/// Shape drawn at an open end of a stroked line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LineCap {
    #[default]
    Flat,
    Square,
    Round,
    Triangle,
    NoAnchor,
    SquareAnchor,
    RoundAnchor,
    DiamondAnchor,
    ArrowAnchor,
    Custom,
}

impl LineCap {
    /// Caps with a direct `stroke-linecap` counterpart.
    pub fn is_plain(self) -> bool {
        matches!(self, LineCap::Flat | LineCap::Square | LineCap::Round)
    }

    /// The closest plain cap, used when a custom cap cannot be recovered.
    pub fn plain_equivalent(self) -> LineCap {
        match self {
            LineCap::Round | LineCap::RoundAnchor => LineCap::Round,
            LineCap::Square | LineCap::SquareAnchor | LineCap::DiamondAnchor => LineCap::Square,
            _ => LineCap::Flat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LineJoin {
    #[default]
    Miter,
    Bevel,
    Round,
    MiterClipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DashStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
    /// Uses [`Pen::dash_pattern`].
    Custom,
}

impl DashStyle {
    /// Dash and gap lengths in multiples of the pen width.
    pub fn pattern(self) -> &'static [f64] {
        match self {
            DashStyle::Solid | DashStyle::Custom => &[],
            DashStyle::Dash => &[3.0, 1.0],
            DashStyle::Dot => &[1.0, 1.0],
            DashStyle::DashDot => &[3.0, 1.0, 1.0, 1.0],
            DashStyle::DashDotDot => &[3.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Stroke settings for outline commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    pub color: Argb,
    pub width: f64,
    pub start_cap: LineCap,
    pub end_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f64,
    pub dash_style: DashStyle,
    /// Dash/gap lengths relative to the width, used when `dash_style` is `Custom`.
    pub dash_pattern: Vec<f64>,
}

impl Default for Pen {
    fn default() -> Self {
        Self::new(Argb::BLACK, 1.0)
    }
}

impl Pen {
    pub fn new(color: Argb, width: f64) -> Self {
        Self {
            color,
            width,
            start_cap: LineCap::Flat,
            end_cap: LineCap::Flat,
            line_join: LineJoin::Miter,
            miter_limit: 10.0,
            dash_style: DashStyle::Solid,
            dash_pattern: Vec::new(),
        }
    }

    pub fn with_caps(mut self, start: LineCap, end: LineCap) -> Self {
        self.start_cap = start;
        self.end_cap = end;
        self
    }

    pub fn with_line_join(mut self, join: LineJoin) -> Self {
        self.line_join = join;
        self
    }

    pub fn with_dash_style(mut self, style: DashStyle) -> Self {
        self.dash_style = style;
        self
    }

    pub fn with_dash_pattern(mut self, pattern: Vec<f64>) -> Self {
        self.dash_style = DashStyle::Custom;
        self.dash_pattern = pattern;
        self
    }

    pub fn has_custom_cap(&self) -> bool {
        !self.start_cap.is_plain() || !self.end_cap.is_plain()
    }

    /// Dash lengths in user units. Empty for solid pens.
    pub fn dash_array(&self) -> Vec<f64> {
        let unit = if self.width > 0.0 { self.width } else { 1.0 };
        let pattern = match self.dash_style {
            DashStyle::Custom => self.dash_pattern.as_slice(),
            other => other.pattern(),
        };
        pattern.iter().map(|v| v * unit).collect()
    }
}
