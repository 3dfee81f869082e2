use super::{Argb, PointF};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// How a brush repeats outside its defining area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WrapMode {
    #[default]
    Tile,
    TileFlipX,
    TileFlipY,
    TileFlipXY,
    Clamp,
}

impl WrapMode {
    /// `spreadMethod` of a gradient definition.
    pub fn spread_method(self) -> &'static str {
        match self {
            WrapMode::Clamp => "pad",
            WrapMode::Tile => "repeat",
            WrapMode::TileFlipX | WrapMode::TileFlipY | WrapMode::TileFlipXY => "reflect",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FillMode {
    /// Even-odd rule.
    #[default]
    Alternate,
    /// Non-zero winding rule.
    Winding,
}

impl FillMode {
    pub fn fill_rule(self) -> &'static str {
        match self {
            FillMode::Alternate => "evenodd",
            FillMode::Winding => "nonzero",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient line in `0..=1`.
    pub offset: f64,
    pub color: Argb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradientBrush {
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub stops: Vec<GradientStop>,
    pub wrap_mode: WrapMode,
}

impl LinearGradientBrush {
    pub fn new(start: PointF, end: PointF, start_color: Argb, end_color: Argb) -> Self {
        Self {
            start: (start.x, start.y),
            end: (end.x, end.y),
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: start_color,
                },
                GradientStop {
                    offset: 1.0,
                    color: end_color,
                },
            ],
            wrap_mode: WrapMode::Tile,
        }
    }

    pub fn with_wrap_mode(mut self, wrap_mode: WrapMode) -> Self {
        self.wrap_mode = wrap_mode;
        self
    }

    /// Replaces the two end colors with an explicit blend.
    pub fn with_stops(mut self, stops: Vec<GradientStop>) -> Self {
        self.stops = stops;
        self
    }
}

/// The 53 fixed 8x8 hatch patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HatchStyle {
    Horizontal,
    Vertical,
    ForwardDiagonal,
    BackwardDiagonal,
    Cross,
    DiagonalCross,
    Percent05,
    Percent10,
    Percent20,
    Percent25,
    Percent30,
    Percent40,
    Percent50,
    Percent60,
    Percent70,
    Percent75,
    Percent80,
    Percent90,
    LightDownwardDiagonal,
    LightUpwardDiagonal,
    DarkDownwardDiagonal,
    DarkUpwardDiagonal,
    WideDownwardDiagonal,
    WideUpwardDiagonal,
    LightVertical,
    LightHorizontal,
    NarrowVertical,
    NarrowHorizontal,
    DarkVertical,
    DarkHorizontal,
    DashedDownwardDiagonal,
    DashedUpwardDiagonal,
    DashedHorizontal,
    DashedVertical,
    SmallConfetti,
    LargeConfetti,
    ZigZag,
    Wave,
    DiagonalBrick,
    HorizontalBrick,
    Weave,
    Plaid,
    Divot,
    DottedGrid,
    DottedDiamond,
    Shingle,
    Trellis,
    Sphere,
    SmallGrid,
    SmallCheckerBoard,
    LargeCheckerBoard,
    OutlinedDiamond,
    SolidDiamond,
}

impl HatchStyle {
    pub const ALL: [HatchStyle; 53] = [
        HatchStyle::Horizontal,
        HatchStyle::Vertical,
        HatchStyle::ForwardDiagonal,
        HatchStyle::BackwardDiagonal,
        HatchStyle::Cross,
        HatchStyle::DiagonalCross,
        HatchStyle::Percent05,
        HatchStyle::Percent10,
        HatchStyle::Percent20,
        HatchStyle::Percent25,
        HatchStyle::Percent30,
        HatchStyle::Percent40,
        HatchStyle::Percent50,
        HatchStyle::Percent60,
        HatchStyle::Percent70,
        HatchStyle::Percent75,
        HatchStyle::Percent80,
        HatchStyle::Percent90,
        HatchStyle::LightDownwardDiagonal,
        HatchStyle::LightUpwardDiagonal,
        HatchStyle::DarkDownwardDiagonal,
        HatchStyle::DarkUpwardDiagonal,
        HatchStyle::WideDownwardDiagonal,
        HatchStyle::WideUpwardDiagonal,
        HatchStyle::LightVertical,
        HatchStyle::LightHorizontal,
        HatchStyle::NarrowVertical,
        HatchStyle::NarrowHorizontal,
        HatchStyle::DarkVertical,
        HatchStyle::DarkHorizontal,
        HatchStyle::DashedDownwardDiagonal,
        HatchStyle::DashedUpwardDiagonal,
        HatchStyle::DashedHorizontal,
        HatchStyle::DashedVertical,
        HatchStyle::SmallConfetti,
        HatchStyle::LargeConfetti,
        HatchStyle::ZigZag,
        HatchStyle::Wave,
        HatchStyle::DiagonalBrick,
        HatchStyle::HorizontalBrick,
        HatchStyle::Weave,
        HatchStyle::Plaid,
        HatchStyle::Divot,
        HatchStyle::DottedGrid,
        HatchStyle::DottedDiamond,
        HatchStyle::Shingle,
        HatchStyle::Trellis,
        HatchStyle::Sphere,
        HatchStyle::SmallGrid,
        HatchStyle::SmallCheckerBoard,
        HatchStyle::LargeCheckerBoard,
        HatchStyle::OutlinedDiamond,
        HatchStyle::SolidDiamond,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HatchBrush {
    pub style: HatchStyle,
    pub fore: Argb,
    pub back: Argb,
}

impl HatchBrush {
    pub fn new(style: HatchStyle, fore: Argb, back: Argb) -> Self {
        Self { style, fore, back }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureBrush {
    pub image: RgbaImage,
    pub wrap_mode: WrapMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathGradientBrush {
    pub points: Vec<PointF>,
    pub center_color: Argb,
    pub surround_colors: Vec<Argb>,
}

/// Fill settings for area commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Brush {
    Solid(Argb),
    LinearGradient(LinearGradientBrush),
    Hatch(HatchBrush),
    /// Has no SVG mapping; filled with the fallback color.
    Texture(TextureBrush),
    /// Has no SVG mapping; filled with the fallback color.
    PathGradient(PathGradientBrush),
}

impl Brush {
    pub fn solid(color: Argb) -> Self {
        Brush::Solid(color)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Brush::Solid(_) => "solid",
            Brush::LinearGradient(_) => "linear-gradient",
            Brush::Hatch(_) => "hatch",
            Brush::Texture(_) => "texture",
            Brush::PathGradient(_) => "path-gradient",
        }
    }
}

impl From<Argb> for Brush {
    fn from(color: Argb) -> Self {
        Brush::Solid(color)
    }
}

impl From<LinearGradientBrush> for Brush {
    fn from(b: LinearGradientBrush) -> Self {
        Brush::LinearGradient(b)
    }
}

impl From<HatchBrush> for Brush {
    fn from(b: HatchBrush) -> Self {
        Brush::Hatch(b)
    }
}
