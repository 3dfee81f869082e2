#![forbid(unsafe_code)]

//! `svgscribe` records immediate-mode drawing commands as an SVG document.
//!
//! The value types and document tree come from `svgscribe-core` and are re-exported at the crate
//! root. Drawing lives in [`scene`], and the metafile reader used for custom line caps in [`emf`].

pub use svgscribe_core::*;

pub mod emf {
    pub use svgscribe_emf::*;
}

pub mod scene {
    pub use svgscribe_scene::api::*;
    pub use svgscribe_scene::{
        DeterministicTextMeasurer, Graphics, MatrixStack, SceneBuilder, SceneError, SceneOptions,
        StrokeRenderError, StrokeRenderer, TextMeasurer, TextMetrics, TextStyle,
        UnsupportedOperationError,
    };

    use svgscribe_core::{Document, WriteOptions};

    #[derive(Debug, thiserror::Error)]
    pub enum ScribeError {
        #[error(transparent)]
        Core(#[from] svgscribe_core::Error),
        #[error(transparent)]
        Load(#[from] svgscribe_core::LoadError),
        #[error(transparent)]
        Metafile(#[from] svgscribe_emf::MetafileParseError),
        #[error(transparent)]
        Scene(#[from] SceneError),
    }

    pub type Result<T> = std::result::Result<T, ScribeError>;

    /// Builds a scene with `draw` and serializes it.
    ///
    /// `size` sets the root `width`/`height` and a matching `viewBox` before drawing starts.
    pub fn render_svg(
        scene_options: SceneOptions,
        size: Option<(f64, f64)>,
        write_options: &WriteOptions,
        draw: impl FnOnce(&mut SceneBuilder) -> std::result::Result<(), SceneError>,
    ) -> Result<String> {
        let mut builder = SceneBuilder::new(scene_options)?;
        if let Some((width, height)) = size {
            builder.set_size(width, height)?;
        }
        draw(&mut builder)?;
        let svg = builder.to_svg(write_options);
        tracing::debug!(bytes = svg.len(), "scene written");
        Ok(svg)
    }

    /// Loads written markup back into an editable [`Document`].
    pub fn load_svg(markup: &str) -> Result<Document> {
        Ok(svgscribe_core::load(markup)?)
    }

    /// Bundles scene and writer options for repeated rendering.
    #[derive(Clone, Default)]
    pub struct SceneRenderer {
        pub scene: SceneOptions,
        pub write: WriteOptions,
        pub size: Option<(f64, f64)>,
    }

    impl SceneRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_size(mut self, width: f64, height: f64) -> Self {
            self.size = Some((width, height));
            self
        }

        pub fn with_write_options(mut self, write: WriteOptions) -> Self {
            self.write = write;
            self
        }

        pub fn with_scene_options(mut self, scene: SceneOptions) -> Self {
            self.scene = scene;
            self
        }

        pub fn render_svg(
            &self,
            draw: impl FnOnce(&mut SceneBuilder) -> std::result::Result<(), SceneError>,
        ) -> Result<String> {
            render_svg(self.scene.clone(), self.size, &self.write, draw)
        }

        /// Renders and immediately reloads the markup, for callers that post-process the tree.
        pub fn render_document(
            &self,
            draw: impl FnOnce(&mut SceneBuilder) -> std::result::Result<(), SceneError>,
        ) -> Result<Document> {
            load_svg(&self.render_svg(draw)?)
        }
    }
}
