//! Custom line caps recovered through a metafile round-trip.
//!
//! SVG cannot draw arrow, diamond or anchor caps directly. A [`StrokeRenderer`] draws the single
//! stroke with the real cap into an enhanced metafile; the recorded polylines and fills are then
//! read back with `svgscribe_emf` and emitted as ordinary shapes.

use crate::api::{Pen, PointF, SizeF};
use crate::error::{Result, StrokeRenderError};
use svgscribe_core::geom::{Vector, bounding_box, vector};
use svgscribe_emf::{MetafileShape, MetafileShapes, ParseOptions, parse_shapes};

/// Renders one stroke into an enhanced-metafile buffer.
///
/// `points` are already translated so the stroke with its caps fits in `(0, 0)..size`.
/// Implementations own whatever drawing surface they need and release it before returning.
pub trait StrokeRenderer {
    fn render_stroke_to_metafile(
        &self,
        pen: &Pen,
        points: &[PointF],
        size: SizeF,
    ) -> std::result::Result<Vec<u8>, StrokeRenderError>;
}

/// Shapes recovered for one stroke, in the caller's coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecoveredStroke {
    pub shapes: Vec<MetafileShape>,
}

/// Runs `renderer` on the stroke and reads its output back.
///
/// Returns `None` when the buffer is empty or yields no shapes, so the caller can fall back to a
/// plain stroke.
pub fn recover_stroke(
    renderer: &dyn StrokeRenderer,
    pen: &Pen,
    points: &[PointF],
    cap_margin_factor: f64,
) -> Result<Option<RecoveredStroke>> {
    let Some(bounds) = bounding_box(points) else {
        return Ok(None);
    };
    let margin = pen.width.max(1.0) * cap_margin_factor + 1.0;
    let origin: Vector = vector(bounds.min_x() - margin, bounds.min_y() - margin);
    let local: Vec<PointF> = points.iter().map(|p| *p - origin).collect();
    let size = SizeF::new(bounds.width() + 2.0 * margin, bounds.height() + 2.0 * margin);

    let buf = renderer.render_stroke_to_metafile(pen, &local, size)?;
    if buf.is_empty() {
        tracing::debug!("stroke renderer returned an empty metafile");
        return Ok(None);
    }
    let options = ParseOptions::default().with_line_width(pen.width.max(1.0));
    let MetafileShapes { shapes } = parse_shapes(&buf, &options)?;
    if shapes.is_empty() {
        tracing::debug!(bytes = buf.len(), "metafile held no shapes for the stroke");
        return Ok(None);
    }

    let shapes = shapes
        .into_iter()
        .map(|shape| match shape {
            MetafileShape::Polyline { points, closed } => MetafileShape::Polyline {
                points: points.into_iter().map(|p| p + origin).collect(),
                closed,
            },
            MetafileShape::Fill { points, color } => MetafileShape::Fill {
                points: points.into_iter().map(|p| p + origin).collect(),
                color,
            },
        })
        .collect();
    Ok(Some(RecoveredStroke { shapes }))
}
