#![forbid(unsafe_code)]

//! Records immediate-mode drawing commands as an SVG scene.
//!
//! [`SceneBuilder`] implements the [`Graphics`] command surface on top of an
//! `svgscribe_core::Document`. A [`MatrixStack`] models the single current transform under nested
//! containers; custom line caps go through a [`StrokeRenderer`] and the metafile reader in
//! `svgscribe_emf`.

pub mod api;
pub mod bitmap;
mod builder;
pub mod error;
pub mod geometry;
pub mod hatch;
pub mod matrix_stack;
pub mod metafile;
mod options;
pub mod paint;
pub mod text;

pub use api::Graphics;
pub use builder::SceneBuilder;
pub use error::{Result, SceneError, StrokeRenderError, UnsupportedOperationError};
pub use matrix_stack::MatrixStack;
pub use metafile::StrokeRenderer;
pub use options::SceneOptions;
pub use text::{DeterministicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
