use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatrixOrder {
    /// The new transform applies before the existing one.
    #[default]
    Prepend,
    /// The new transform applies after the existing one.
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SmoothingMode {
    #[default]
    Default,
    HighSpeed,
    HighQuality,
    None,
    AntiAlias,
}

impl SmoothingMode {
    /// `shape-rendering` value, if the mode asks for one.
    pub fn shape_rendering(self) -> Option<&'static str> {
        match self {
            SmoothingMode::Default => None,
            SmoothingMode::None | SmoothingMode::HighSpeed => Some("crispEdges"),
            SmoothingMode::AntiAlias | SmoothingMode::HighQuality => Some("geometricPrecision"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextRenderingHint {
    #[default]
    SystemDefault,
    SingleBitPerPixelGridFit,
    SingleBitPerPixel,
    AntiAliasGridFit,
    AntiAlias,
    ClearTypeGridFit,
}

impl TextRenderingHint {
    /// `text-rendering` value, if the hint asks for one.
    pub fn text_rendering(self) -> Option<&'static str> {
        match self {
            TextRenderingHint::SystemDefault => None,
            TextRenderingHint::SingleBitPerPixelGridFit | TextRenderingHint::SingleBitPerPixel => {
                Some("optimizeSpeed")
            }
            TextRenderingHint::AntiAliasGridFit
            | TextRenderingHint::AntiAlias
            | TextRenderingHint::ClearTypeGridFit => Some("optimizeLegibility"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompositingMode {
    #[default]
    SourceOver,
    SourceCopy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompositingQuality {
    #[default]
    Default,
    HighSpeed,
    HighQuality,
    GammaCorrected,
    AssumeLinear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InterpolationMode {
    #[default]
    Default,
    Low,
    High,
    Bilinear,
    Bicubic,
    NearestNeighbor,
    HighQualityBilinear,
    HighQualityBicubic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PixelOffsetMode {
    #[default]
    Default,
    HighSpeed,
    HighQuality,
    None,
    Half,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GraphicsUnit {
    World,
    #[default]
    Display,
    Pixel,
    Point,
    Inch,
    Document,
    Millimeter,
}

impl GraphicsUnit {
    /// User units per one of this unit at 96 dpi.
    pub fn pixels_per_unit(self) -> f64 {
        match self {
            GraphicsUnit::World | GraphicsUnit::Display | GraphicsUnit::Pixel => 1.0,
            GraphicsUnit::Point => 96.0 / 72.0,
            GraphicsUnit::Inch => 96.0,
            GraphicsUnit::Document => 96.0 / 300.0,
            GraphicsUnit::Millimeter => 96.0 / 25.4,
        }
    }
}

/// Rendering hints. They are stored as given; only smoothing and text rendering reach the
/// output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderHints {
    pub smoothing: SmoothingMode,
    pub text_rendering: TextRenderingHint,
    pub compositing_mode: CompositingMode,
    pub compositing_quality: CompositingQuality,
    pub interpolation: InterpolationMode,
    pub pixel_offset: PixelOffsetMode,
    pub text_contrast: u32,
    pub page_unit: GraphicsUnit,
    pub page_scale: f64,
    pub rendering_origin: (i32, i32),
}

impl Default for RenderHints {
    fn default() -> Self {
        Self {
            smoothing: SmoothingMode::Default,
            text_rendering: TextRenderingHint::SystemDefault,
            compositing_mode: CompositingMode::SourceOver,
            compositing_quality: CompositingQuality::Default,
            interpolation: InterpolationMode::Default,
            pixel_offset: PixelOffsetMode::Default,
            text_contrast: 4,
            page_unit: GraphicsUnit::Display,
            page_scale: 1.0,
            rendering_origin: (0, 0),
        }
    }
}
