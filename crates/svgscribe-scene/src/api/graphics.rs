use super::{
    Argb, Brush, FillMode, Font, GraphicsContainer, GraphicsPath, GraphicsState, MatrixOrder, Pen,
    PointF, RectF, Region, RenderHints, SizeF, StringFormat, TextLayout,
};
use crate::error::Result;
use image::RgbaImage;
use svgscribe_core::Matrix;

/// The immediate-mode drawing surface.
///
/// Angles are in degrees, clockwise on the y-down canvas. Commands that a static document cannot
/// express return [`crate::SceneError::Unsupported`].
pub trait Graphics {
    // State
    fn clear(&mut self, color: Argb) -> Result<()>;
    fn flush(&mut self);
    fn save(&mut self) -> Result<GraphicsState>;
    fn restore(&mut self, state: GraphicsState) -> Result<()>;
    fn begin_container(&mut self) -> Result<GraphicsContainer>;
    fn end_container(&mut self, container: GraphicsContainer) -> Result<()>;
    fn hints(&self) -> &RenderHints;
    fn hints_mut(&mut self) -> &mut RenderHints;

    // Transform
    fn translate_transform(&mut self, dx: f64, dy: f64, order: MatrixOrder);
    fn scale_transform(&mut self, sx: f64, sy: f64, order: MatrixOrder);
    fn rotate_transform(&mut self, degrees: f64, order: MatrixOrder);
    fn multiply_transform(&mut self, matrix: &Matrix, order: MatrixOrder);
    fn set_transform(&mut self, matrix: Matrix);
    fn transform(&self) -> Matrix;
    fn reset_transform(&mut self);
    /// Maps points through the full current transform, container transforms included.
    fn transform_points(&self, points: &mut [PointF]);

    // Clip
    fn set_clip(&mut self, rect: RectF) -> Result<()>;
    fn intersect_clip(&mut self, rect: RectF) -> Result<()>;
    fn exclude_clip(&mut self, rect: RectF) -> Result<()>;
    fn reset_clip(&mut self);
    fn translate_clip(&mut self, dx: f64, dy: f64) -> Result<()>;
    fn clip_bounds(&self) -> Option<RectF>;
    fn is_clip_empty(&self) -> bool;
    fn is_visible_point(&self, point: PointF) -> Result<bool>;
    fn is_visible_rect(&self, rect: RectF) -> Result<bool>;

    // Lines and curves
    fn draw_line(&mut self, pen: &Pen, p1: PointF, p2: PointF) -> Result<()>;
    fn draw_lines(&mut self, pen: &Pen, points: &[PointF]) -> Result<()>;
    fn draw_arc(&mut self, pen: &Pen, rect: RectF, start: f64, sweep: f64) -> Result<()>;
    fn draw_bezier(
        &mut self,
        pen: &Pen,
        p1: PointF,
        c1: PointF,
        c2: PointF,
        p2: PointF,
    ) -> Result<()>;
    fn draw_beziers(&mut self, pen: &Pen, points: &[PointF]) -> Result<()>;
    /// Cardinal spline through `points`, drawing `segments` segments from `offset`.
    fn draw_curve(
        &mut self,
        pen: &Pen,
        points: &[PointF],
        offset: usize,
        segments: usize,
        tension: f64,
    ) -> Result<()>;
    fn draw_closed_curve(&mut self, pen: &Pen, points: &[PointF], tension: f64) -> Result<()>;
    fn draw_path(&mut self, pen: &Pen, path: &GraphicsPath) -> Result<()>;

    // Shapes
    fn draw_rectangle(&mut self, pen: &Pen, rect: RectF) -> Result<()>;
    fn draw_rectangles(&mut self, pen: &Pen, rects: &[RectF]) -> Result<()> {
        for r in rects {
            self.draw_rectangle(pen, *r)?;
        }
        Ok(())
    }
    fn fill_rectangle(&mut self, brush: &Brush, rect: RectF) -> Result<()>;
    fn fill_rectangles(&mut self, brush: &Brush, rects: &[RectF]) -> Result<()> {
        for r in rects {
            self.fill_rectangle(brush, *r)?;
        }
        Ok(())
    }
    fn draw_ellipse(&mut self, pen: &Pen, rect: RectF) -> Result<()>;
    fn fill_ellipse(&mut self, brush: &Brush, rect: RectF) -> Result<()>;
    fn draw_pie(&mut self, pen: &Pen, rect: RectF, start: f64, sweep: f64) -> Result<()>;
    fn fill_pie(&mut self, brush: &Brush, rect: RectF, start: f64, sweep: f64) -> Result<()>;
    fn draw_polygon(&mut self, pen: &Pen, points: &[PointF]) -> Result<()>;
    fn fill_polygon(
        &mut self,
        brush: &Brush,
        points: &[PointF],
        fill_mode: FillMode,
    ) -> Result<()>;
    fn fill_closed_curve(
        &mut self,
        brush: &Brush,
        points: &[PointF],
        fill_mode: FillMode,
        tension: f64,
    ) -> Result<()>;
    fn fill_path(&mut self, brush: &Brush, path: &GraphicsPath) -> Result<()>;
    fn fill_region(&mut self, brush: &Brush, region: &Region) -> Result<()>;

    // Text
    fn draw_string(
        &mut self,
        text: &str,
        font: &Font,
        brush: &Brush,
        layout: TextLayout,
        format: &StringFormat,
    ) -> Result<()>;
    /// Size of `text` laid out like `draw_string`; wraps when `layout_width` is given.
    fn measure_string(
        &self,
        text: &str,
        font: &Font,
        layout_width: Option<f64>,
        format: &StringFormat,
    ) -> SizeF;
    fn measure_character_ranges(
        &self,
        text: &str,
        font: &Font,
        layout: RectF,
        format: &StringFormat,
    ) -> Result<Vec<RectF>>;

    // Images
    /// Draws at one user unit per pixel.
    fn draw_image(&mut self, image: &RgbaImage, at: PointF) -> Result<()>;
    fn draw_image_rect(&mut self, image: &RgbaImage, dest: RectF) -> Result<()>;
    /// Draws the `src` pixel rectangle scaled into `dest`.
    fn draw_image_src_rect(&mut self, image: &RgbaImage, dest: RectF, src: RectF) -> Result<()>;
    fn draw_image_unscaled(&mut self, image: &RgbaImage, at: PointF) -> Result<()>;
    fn draw_image_unscaled_and_clipped(&mut self, image: &RgbaImage, rect: RectF) -> Result<()>;
    /// `dest` is upper-left, upper-right, lower-left; the image maps onto the parallelogram.
    fn draw_image_points(&mut self, image: &RgbaImage, dest: [PointF; 3]) -> Result<()>;
    fn draw_icon(&mut self, icon: &RgbaImage, rect: RectF) -> Result<()>;
    fn draw_icon_unstretched(&mut self, icon: &RgbaImage, rect: RectF) -> Result<()>;

    // Device
    fn dpi_x(&self) -> Result<f64>;
    fn dpi_y(&self) -> Result<f64>;
    fn get_hdc(&mut self) -> Result<usize>;
    fn release_hdc(&mut self, hdc: usize) -> Result<()>;
    fn add_metafile_comment(&mut self, data: &[u8]) -> Result<()>;
    fn get_nearest_color(&self, color: Argb) -> Argb;
}
