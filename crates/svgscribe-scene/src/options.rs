use crate::api::Argb;
use crate::metafile::StrokeRenderer;
use crate::paint::FALLBACK_FILL;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use std::sync::Arc;

#[derive(Clone)]
pub struct SceneOptions {
    /// Measures text for `draw_string` placement and `measure_string`.
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    /// Draws strokes with custom caps into a metafile. Without one, custom caps are drawn as
    /// their nearest plain cap.
    pub stroke_renderer: Option<Arc<dyn StrokeRenderer + Send + Sync>>,
    /// Fill for texture and path-gradient brushes.
    pub fallback_fill: Argb,
    /// Space reserved around a stroke for its caps, in pen widths.
    pub cap_margin_factor: f64,
    /// Prepended to every generated definition id (gradients, patterns, clip paths).
    pub id_prefix: String,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            stroke_renderer: None,
            fallback_fill: FALLBACK_FILL,
            cap_margin_factor: 4.0,
            id_prefix: String::new(),
        }
    }
}

impl SceneOptions {
    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        self.text_measurer = measurer;
        self
    }

    pub fn with_stroke_renderer(mut self, renderer: Arc<dyn StrokeRenderer + Send + Sync>) -> Self {
        self.stroke_renderer = Some(renderer);
        self
    }

    pub fn with_fallback_fill(mut self, color: Argb) -> Self {
        self.fallback_fill = color;
        self
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }
}
