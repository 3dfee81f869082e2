use crate::api::{
    Argb, Brush, FillMode, Font, Graphics, GraphicsContainer, GraphicsPath, GraphicsState,
    MatrixOrder, Pen, PointF, RectF, Region, RenderHints, SizeF, StringAlignment, StringFormat,
    TextLayout,
};
use crate::bitmap::{PixelRect, pixel_runs};
use crate::error::{Result, unsupported};
use crate::geometry::{arc_to_path, bezier_path, ellipse_bounds, spline_to_bezier};
use crate::matrix_stack::MatrixStack;
use crate::metafile::{RecoveredStroke, recover_stroke};
use crate::options::SceneOptions;
use crate::paint::{
    gradient_key, hatch_key, pen_style, set_color, write_hatch_pattern, write_linear_gradient,
};
use crate::text::{TextStyle, wrap_lines};
use image::RgbaImage;
use rustc_hash::FxHashMap;
use svgscribe_core::geom::{matrix, vector};
use svgscribe_core::types::FmtNumber;
use svgscribe_core::{
    AttributeValue, Document, ElementKind, Length, Matrix, NodeId, Path, PointList, Style,
    TransformList, WriteOptions,
};
use svgscribe_emf::MetafileShape;

#[derive(Debug, Clone, Copy)]
struct Clip {
    rect: RectF,
    matrix: Matrix,
    group: NodeId,
}

/// One open container: its group and the clip group opened inside it, if any.
#[derive(Debug, Clone, Copy)]
struct Frame {
    group: NodeId,
    clip: Option<Clip>,
}

impl Frame {
    fn target(&self) -> NodeId {
        self.clip.map_or(self.group, |c| c.group)
    }
}

type Attrs = Vec<(&'static str, AttributeValue)>;

/// Records drawing commands as an SVG document.
///
/// The document is `<svg>` holding `<defs>` (gradients, patterns, clip paths) and the top `<g>`
/// that drawing starts in. Each shape carries the full current transform, so groups only mirror
/// containers and clips.
pub struct SceneBuilder {
    doc: Document,
    root: NodeId,
    defs: NodeId,
    frames: Vec<Frame>,
    stack: MatrixStack,
    hints: RenderHints,
    options: SceneOptions,
    paint_defs: FxHashMap<String, String>,
}

impl SceneBuilder {
    pub fn new(options: SceneOptions) -> Result<Self> {
        let mut doc = Document::new();
        let root = doc.create_element(ElementKind::Svg);
        doc.set_root(root)?;
        let defs = doc.create_element(ElementKind::Defs);
        doc.append_child(root, defs)?;
        let top = doc.create_element(ElementKind::G);
        doc.append_child(root, top)?;
        Ok(Self {
            doc,
            root,
            defs,
            frames: vec![Frame {
                group: top,
                clip: None,
            }],
            stack: MatrixStack::new(),
            hints: RenderHints::default(),
            options,
            paint_defs: FxHashMap::default(),
        })
    }

    /// Sets the root `width`, `height` and a matching `viewBox`.
    pub fn set_size(&mut self, width: f64, height: f64) -> Result<()> {
        self.doc.set_attr(self.root, "width", Length::px(width))?;
        self.doc.set_attr(self.root, "height", Length::px(height))?;
        self.doc.set_attr(
            self.root,
            "viewBox",
            format!("0 0 {} {}", FmtNumber(width), FmtNumber(height)),
        )?;
        Ok(())
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn defs(&self) -> NodeId {
        self.defs
    }

    /// The node new shapes are appended to.
    pub fn current_group(&self) -> NodeId {
        self.frame().target()
    }

    pub fn matrix_stack(&self) -> &MatrixStack {
        &self.stack
    }

    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    pub fn finish(self) -> Document {
        self.doc
    }

    pub fn to_svg(&self, options: &WriteOptions) -> String {
        self.doc.to_svg(options)
    }

    fn frame(&self) -> Frame {
        // `frames` is never empty: the document-level frame is never popped.
        self.frames.last().copied().unwrap_or(Frame {
            group: self.root,
            clip: None,
        })
    }

    fn set_frame_clip(&mut self, clip: Option<Clip>) {
        if let Some(frame) = self.frames.last_mut() {
            frame.clip = clip;
        }
    }

    fn next_def_id(&mut self) -> String {
        format!("{}{}", self.options.id_prefix, self.doc.next_id())
    }

    /// Creates `kind` with `attrs` and the current transform, appended to the current group.
    fn shape(&mut self, kind: ElementKind, attrs: Attrs, style: Style) -> Result<NodeId> {
        self.placed_shape(kind, attrs, style, Matrix::identity())
    }

    /// Like [`Self::shape`], with `local` applied before the current transform.
    fn placed_shape(
        &mut self,
        kind: ElementKind,
        attrs: Attrs,
        mut style: Style,
        local: Matrix,
    ) -> Result<NodeId> {
        let node = self.doc.create_element(kind);
        for (name, value) in attrs {
            self.doc.set_attr(node, name, value)?;
        }
        let m = local.then(&self.stack.result());
        if m != Matrix::identity() {
            self.doc.set_attr(node, "transform", TransformList::from(m))?;
        }
        if let Some(v) = self.hints.smoothing.shape_rendering() {
            style.set("shape-rendering", v);
        }
        if !style.is_empty() {
            self.doc.set_style(node, style)?;
        }
        let parent = self.current_group();
        self.doc.append_child(parent, node)?;
        Ok(node)
    }

    /// Returns `url(#id)` of the definition for `key`, building it on first use.
    fn paint_url(
        &mut self,
        key: String,
        build: impl FnOnce(&mut Document, NodeId, &str) -> Result<NodeId>,
    ) -> Result<String> {
        if let Some(id) = self.paint_defs.get(&key) {
            return Ok(format!("url(#{id})"));
        }
        let id = self.next_def_id();
        build(&mut self.doc, self.defs, &id)?;
        let url = format!("url(#{id})");
        self.paint_defs.insert(key, id);
        Ok(url)
    }

    fn brush_style(&mut self, brush: &Brush, fill_mode: Option<FillMode>) -> Result<Style> {
        let mut style = Style::new();
        match brush {
            Brush::Solid(color) => set_color(&mut style, "fill", "fill-opacity", *color),
            Brush::LinearGradient(g) => {
                let url = self.paint_url(gradient_key(g), |doc, defs, id| {
                    write_linear_gradient(doc, defs, id, g)
                })?;
                style.set("fill", url);
            }
            Brush::Hatch(h) => {
                let url = self.paint_url(hatch_key(h), |doc, defs, id| {
                    write_hatch_pattern(doc, defs, id, h)
                })?;
                style.set("fill", url);
            }
            Brush::Texture(_) | Brush::PathGradient(_) => {
                tracing::debug!(
                    brush = brush.kind_name(),
                    "brush has no SVG paint, using the fallback fill"
                );
                set_color(&mut style, "fill", "fill-opacity", self.options.fallback_fill);
            }
        }
        if let Some(mode) = fill_mode {
            style.set("fill-rule", mode.fill_rule());
        }
        Ok(style)
    }

    fn open_clip(&mut self, rect: RectF, m: Matrix, parent: NodeId) -> Result<Clip> {
        let id = self.next_def_id();
        let clip_path = self.doc.create_element_with_id(ElementKind::ClipPath, id.as_str());
        let r = self.doc.create_element(ElementKind::Rect);
        for (name, v) in rect_attrs(&rect) {
            self.doc.set_attr(r, name, v)?;
        }
        if m != Matrix::identity() {
            self.doc.set_attr(r, "transform", TransformList::from(m))?;
        }
        self.doc.append_child(clip_path, r)?;
        self.doc.append_child(self.defs, clip_path)?;

        let group = self.doc.create_element(ElementKind::G);
        self.doc.set_attr(group, "clip-path", format!("url(#{id})"))?;
        self.doc.append_child(parent, group)?;
        Ok(Clip {
            rect,
            matrix: m,
            group,
        })
    }

    fn apply_transform(&mut self, t: Matrix, order: MatrixOrder) {
        match order {
            MatrixOrder::Prepend => self.stack.update_top(|m| t.then(&m)),
            MatrixOrder::Append => self.stack.update_top(|m| m.then(&t)),
        }
    }

    fn stroke_polyline(&mut self, pen: &Pen, points: &[PointF]) -> Result<()> {
        if points.len() < 2 {
            return Ok(());
        }
        if pen.has_custom_cap() {
            match self.options.stroke_renderer.clone() {
                Some(renderer) => {
                    let recovered = recover_stroke(
                        renderer.as_ref(),
                        pen,
                        points,
                        self.options.cap_margin_factor,
                    )?;
                    if let Some(recovered) = recovered {
                        return self.emit_recovered(pen, recovered);
                    }
                }
                None => tracing::debug!("no stroke renderer, drawing custom caps as plain caps"),
            }
        }

        if let [p1, p2] = points {
            let attrs: Attrs = vec![
                ("x1", p1.x.into()),
                ("y1", p1.y.into()),
                ("x2", p2.x.into()),
                ("y2", p2.y.into()),
            ];
            self.shape(ElementKind::Line, attrs, pen_style(pen))?;
        } else {
            let attrs: Attrs = vec![("points", PointList::from(points.to_vec()).into())];
            self.shape(ElementKind::Polyline, attrs, pen_style(pen))?;
        }
        Ok(())
    }

    fn emit_recovered(&mut self, pen: &Pen, recovered: RecoveredStroke) -> Result<()> {
        for shape in recovered.shapes {
            match shape {
                MetafileShape::Polyline { points, closed } => {
                    let kind = if closed {
                        ElementKind::Polygon
                    } else {
                        ElementKind::Polyline
                    };
                    let attrs: Attrs = vec![("points", PointList::from(points).into())];
                    self.shape(kind, attrs, pen_style(pen))?;
                }
                MetafileShape::Fill { points, color } => {
                    let mut style = Style::new();
                    set_color(&mut style, "fill", "fill-opacity", Argb::from(color));
                    style.set("stroke", "none");
                    let attrs: Attrs = vec![("points", PointList::from(points).into())];
                    self.shape(ElementKind::Polygon, attrs, style)?;
                }
            }
        }
        Ok(())
    }

    fn path_shape(&mut self, path: Path, style: Style) -> Result<()> {
        if path.is_empty() {
            return Ok(());
        }
        self.shape(ElementKind::Path, vec![("d", path.into())], style)?;
        Ok(())
    }

    fn text_style(font: &Font) -> TextStyle {
        TextStyle {
            font_family: Some(font.family.clone()),
            font_size: font.size_in_pixels(),
            font_weight: font.bold.then(|| "bold".to_string()),
            italic: font.italic,
        }
    }

    /// Draws the `src` pixels of `image` as runs at `origin`, `scale` user units per pixel.
    fn emit_bitmap(
        &mut self,
        image: &RgbaImage,
        src: Option<PixelRect>,
        origin: PointF,
        scale: (f64, f64),
        local: Matrix,
    ) -> Result<()> {
        let runs = pixel_runs(image, src);
        let group = self.placed_shape(ElementKind::G, Vec::new(), Style::new(), local)?;
        let (sx, sy) = scale;
        for run in &runs {
            let node = self.doc.create_element(ElementKind::Rect);
            let r = RectF::new(
                PointF::new(origin.x + f64::from(run.x) * sx, origin.y + f64::from(run.y) * sy),
                SizeF::new(f64::from(run.len) * sx, sy),
            );
            for (name, v) in rect_attrs(&r) {
                self.doc.set_attr(node, name, v)?;
            }
            let [r, g, b, a] = run.color.0;
            let mut style = Style::new();
            set_color(&mut style, "fill", "fill-opacity", Argb::new(a, r, g, b));
            self.doc.set_style(node, style)?;
            self.doc.append_child(group, node)?;
        }
        tracing::trace!(runs = runs.len(), "bitmap decomposed");
        Ok(())
    }
}

fn rect_attrs(r: &RectF) -> Attrs {
    vec![
        ("x", r.min_x().into()),
        ("y", r.min_y().into()),
        ("width", r.width().into()),
        ("height", r.height().into()),
    ]
}

fn ellipse_attrs(r: &RectF) -> Attrs {
    let (c, rx, ry) = ellipse_bounds(r);
    vec![
        ("cx", c.x.into()),
        ("cy", c.y.into()),
        ("rx", rx.into()),
        ("ry", ry.into()),
    ]
}

fn points_attr(points: &[PointF]) -> Attrs {
    vec![("points", PointList::from(points.to_vec()).into())]
}

/// Pixel count for a user-space extent; negative and non-finite values are empty.
fn to_px(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

impl Graphics for SceneBuilder {
    fn clear(&mut self, color: Argb) -> Result<()> {
        let node = self.doc.create_element(ElementKind::Rect);
        self.doc.set_attr(node, "x", 0.0)?;
        self.doc.set_attr(node, "y", 0.0)?;
        self.doc.set_attr(node, "width", Length::percent(100.0))?;
        self.doc.set_attr(node, "height", Length::percent(100.0))?;
        let mut style = Style::new();
        set_color(&mut style, "fill", "fill-opacity", color);
        self.doc.set_style(node, style)?;
        let parent = self.current_group();
        self.doc.append_child(parent, node)?;
        Ok(())
    }

    fn flush(&mut self) {}

    fn save(&mut self) -> Result<GraphicsState> {
        unsupported("save")
    }

    fn restore(&mut self, _state: GraphicsState) -> Result<()> {
        unsupported("restore")
    }

    fn begin_container(&mut self) -> Result<GraphicsContainer> {
        let parent = self.current_group();
        let group = self.doc.create_element(ElementKind::G);
        self.doc.append_child(parent, group)?;
        self.stack.push_identity();
        self.frames.push(Frame { group, clip: None });
        Ok(GraphicsContainer(self.frames.len() - 1))
    }

    fn end_container(&mut self, container: GraphicsContainer) -> Result<()> {
        // Closing a container also closes the ones opened inside it.
        let keep = container.0.max(1);
        while self.frames.len() > keep {
            self.frames.pop();
            self.stack.pop();
        }
        Ok(())
    }

    fn hints(&self) -> &RenderHints {
        &self.hints
    }

    fn hints_mut(&mut self) -> &mut RenderHints {
        &mut self.hints
    }

    fn translate_transform(&mut self, dx: f64, dy: f64, order: MatrixOrder) {
        self.apply_transform(Matrix::translation(dx, dy), order);
    }

    fn scale_transform(&mut self, sx: f64, sy: f64, order: MatrixOrder) {
        self.apply_transform(Matrix::scale(sx, sy), order);
    }

    fn rotate_transform(&mut self, degrees: f64, order: MatrixOrder) {
        self.apply_transform(Matrix::rotation(euclid::Angle::degrees(degrees)), order);
    }

    fn multiply_transform(&mut self, m: &Matrix, order: MatrixOrder) {
        self.apply_transform(*m, order);
    }

    fn set_transform(&mut self, m: Matrix) {
        self.stack.set_top(m);
    }

    fn transform(&self) -> Matrix {
        self.stack.top()
    }

    fn reset_transform(&mut self) {
        self.stack.reset_current();
    }

    fn transform_points(&self, points: &mut [PointF]) {
        let m = self.stack.result();
        for p in points {
            *p = m.transform_point(*p);
        }
    }

    fn set_clip(&mut self, rect: RectF) -> Result<()> {
        let parent = self.frame().group;
        let clip = self.open_clip(rect, self.stack.result(), parent)?;
        self.set_frame_clip(Some(clip));
        Ok(())
    }

    fn intersect_clip(&mut self, rect: RectF) -> Result<()> {
        let Some(outer) = self.frame().clip else {
            return self.set_clip(rect);
        };
        let current = self.stack.result();
        // Bring the outer rect into the current user space before intersecting.
        let outer_rect = current
            .inverse()
            .map(|inv| outer.matrix.then(&inv).outer_transformed_rect(&outer.rect));
        let mut clip = self.open_clip(rect, current, outer.group)?;
        clip.rect = outer_rect
            .and_then(|o| o.intersection(&rect))
            .unwrap_or_else(RectF::zero);
        self.set_frame_clip(Some(clip));
        Ok(())
    }

    fn exclude_clip(&mut self, _rect: RectF) -> Result<()> {
        unsupported("exclude_clip")
    }

    fn reset_clip(&mut self) {
        self.set_frame_clip(None);
    }

    fn translate_clip(&mut self, dx: f64, dy: f64) -> Result<()> {
        let frame = self.frame();
        let Some(clip) = frame.clip else {
            return Ok(());
        };
        let moved = clip.rect.translate(vector(dx, dy));
        let clip = self.open_clip(moved, clip.matrix, frame.group)?;
        self.set_frame_clip(Some(clip));
        Ok(())
    }

    fn clip_bounds(&self) -> Option<RectF> {
        self.frame().clip.map(|c| c.rect)
    }

    fn is_clip_empty(&self) -> bool {
        self.frame().clip.is_some_and(|c| c.rect.is_empty())
    }

    fn is_visible_point(&self, _point: PointF) -> Result<bool> {
        unsupported("is_visible_point")
    }

    fn is_visible_rect(&self, _rect: RectF) -> Result<bool> {
        unsupported("is_visible_rect")
    }

    fn draw_line(&mut self, pen: &Pen, p1: PointF, p2: PointF) -> Result<()> {
        self.stroke_polyline(pen, &[p1, p2])
    }

    fn draw_lines(&mut self, pen: &Pen, points: &[PointF]) -> Result<()> {
        self.stroke_polyline(pen, points)
    }

    fn draw_arc(&mut self, pen: &Pen, rect: RectF, start: f64, sweep: f64) -> Result<()> {
        let path = arc_to_path(
            rect.min_x(),
            rect.min_y(),
            rect.width(),
            rect.height(),
            start,
            sweep,
            false,
        );
        self.path_shape(path, pen_style(pen))
    }

    fn draw_bezier(
        &mut self,
        pen: &Pen,
        p1: PointF,
        c1: PointF,
        c2: PointF,
        p2: PointF,
    ) -> Result<()> {
        self.path_shape(bezier_path(&[p1, c1, c2, p2]), pen_style(pen))
    }

    fn draw_beziers(&mut self, pen: &Pen, points: &[PointF]) -> Result<()> {
        self.path_shape(bezier_path(points), pen_style(pen))
    }

    fn draw_curve(
        &mut self,
        pen: &Pen,
        points: &[PointF],
        offset: usize,
        segments: usize,
        tension: f64,
    ) -> Result<()> {
        if points.len() < 2 {
            return Ok(());
        }
        let controls = spline_to_bezier(points, offset, segments, false, tension);
        self.path_shape(bezier_path(&controls), pen_style(pen))
    }

    fn draw_closed_curve(&mut self, pen: &Pen, points: &[PointF], tension: f64) -> Result<()> {
        if points.len() < 2 {
            return Ok(());
        }
        let mut path = bezier_path(&spline_to_bezier(points, 0, 0, true, tension));
        path.close();
        self.path_shape(path, pen_style(pen))
    }

    fn draw_path(&mut self, pen: &Pen, path: &GraphicsPath) -> Result<()> {
        self.path_shape(path.to_path(), pen_style(pen))
    }

    fn draw_rectangle(&mut self, pen: &Pen, rect: RectF) -> Result<()> {
        self.shape(ElementKind::Rect, rect_attrs(&rect), pen_style(pen))?;
        Ok(())
    }

    fn fill_rectangle(&mut self, brush: &Brush, rect: RectF) -> Result<()> {
        let style = self.brush_style(brush, None)?;
        self.shape(ElementKind::Rect, rect_attrs(&rect), style)?;
        Ok(())
    }

    fn draw_ellipse(&mut self, pen: &Pen, rect: RectF) -> Result<()> {
        self.shape(ElementKind::Ellipse, ellipse_attrs(&rect), pen_style(pen))?;
        Ok(())
    }

    fn fill_ellipse(&mut self, brush: &Brush, rect: RectF) -> Result<()> {
        let style = self.brush_style(brush, None)?;
        self.shape(ElementKind::Ellipse, ellipse_attrs(&rect), style)?;
        Ok(())
    }

    fn draw_pie(&mut self, pen: &Pen, rect: RectF, start: f64, sweep: f64) -> Result<()> {
        let path = arc_to_path(
            rect.min_x(),
            rect.min_y(),
            rect.width(),
            rect.height(),
            start,
            sweep,
            true,
        );
        self.path_shape(path, pen_style(pen))
    }

    fn fill_pie(&mut self, brush: &Brush, rect: RectF, start: f64, sweep: f64) -> Result<()> {
        let style = self.brush_style(brush, None)?;
        let path = arc_to_path(
            rect.min_x(),
            rect.min_y(),
            rect.width(),
            rect.height(),
            start,
            sweep,
            true,
        );
        self.path_shape(path, style)
    }

    fn draw_polygon(&mut self, pen: &Pen, points: &[PointF]) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }
        self.shape(ElementKind::Polygon, points_attr(points), pen_style(pen))?;
        Ok(())
    }

    fn fill_polygon(
        &mut self,
        brush: &Brush,
        points: &[PointF],
        fill_mode: FillMode,
    ) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }
        let style = self.brush_style(brush, Some(fill_mode))?;
        self.shape(ElementKind::Polygon, points_attr(points), style)?;
        Ok(())
    }

    fn fill_closed_curve(
        &mut self,
        brush: &Brush,
        points: &[PointF],
        fill_mode: FillMode,
        tension: f64,
    ) -> Result<()> {
        if points.len() < 2 {
            return Ok(());
        }
        let style = self.brush_style(brush, Some(fill_mode))?;
        let mut path = bezier_path(&spline_to_bezier(points, 0, 0, true, tension));
        path.close();
        self.path_shape(path, style)
    }

    fn fill_path(&mut self, brush: &Brush, path: &GraphicsPath) -> Result<()> {
        let style = self.brush_style(brush, Some(path.fill_mode))?;
        self.path_shape(path.to_path(), style)
    }

    fn fill_region(&mut self, _brush: &Brush, _region: &Region) -> Result<()> {
        unsupported("fill_region")
    }

    fn draw_string(
        &mut self,
        text: &str,
        font: &Font,
        brush: &Brush,
        layout: TextLayout,
        format: &StringFormat,
    ) -> Result<()> {
        let measurer = self.options.text_measurer.clone();
        let ts = Self::text_style(font);

        let (x, top, wrap_width, box_height) = match layout {
            TextLayout::At(p) => (p.x, p.y, None, None),
            TextLayout::In(r) => {
                let x = match format.alignment {
                    StringAlignment::Near => r.min_x(),
                    StringAlignment::Center => r.min_x() + r.width() / 2.0,
                    StringAlignment::Far => r.max_x(),
                };
                let wrap = (!format.no_wrap).then_some(r.width());
                (x, r.min_y(), wrap, Some(r.height()))
            }
        };
        let lines = wrap_lines(measurer.as_ref(), text, &ts, wrap_width);
        let line_height = measurer.measure("", &ts).height;
        let total = line_height * lines.len() as f64;
        let top = match (box_height, format.line_alignment) {
            (Some(h), StringAlignment::Center) => top + (h - total) / 2.0,
            (Some(h), StringAlignment::Far) => top + h - total,
            _ => top,
        };
        let baseline = top + measurer.ascent(&ts);

        let mut style = self.brush_style(brush, None)?;
        style.set("font-family", font.family.as_str());
        style.set("font-size", Length::px(ts.font_size));
        if font.bold {
            style.set("font-weight", "bold");
        }
        if font.italic {
            style.set("font-style", "italic");
        }
        let decoration = match (font.underline, font.strikeout) {
            (true, true) => "underline line-through",
            (true, false) => "underline",
            (false, true) => "line-through",
            (false, false) => "",
        };
        style.set("text-decoration", decoration);
        match format.alignment {
            StringAlignment::Near => {}
            StringAlignment::Center => {
                style.set("text-anchor", "middle");
            }
            StringAlignment::Far => {
                style.set("text-anchor", "end");
            }
        }
        if let Some(v) = self.hints.text_rendering.text_rendering() {
            style.set("text-rendering", v);
        }

        let attrs: Attrs = vec![
            ("x", x.into()),
            ("y", baseline.into()),
            ("xml:space", "preserve".into()),
        ];
        let node = self.shape(ElementKind::Text, attrs, style)?;
        if let [line] = lines.as_slice() {
            self.doc.set_text(node, line.as_str())?;
            return Ok(());
        }
        for (i, line) in lines.iter().enumerate() {
            let span = self.doc.create_element(ElementKind::Tspan);
            self.doc.set_attr(span, "x", x)?;
            self.doc.set_attr(span, "y", baseline + line_height * i as f64)?;
            self.doc.set_text(span, line.as_str())?;
            self.doc.append_child(node, span)?;
        }
        Ok(())
    }

    fn measure_string(
        &self,
        text: &str,
        font: &Font,
        layout_width: Option<f64>,
        format: &StringFormat,
    ) -> SizeF {
        let ts = Self::text_style(font);
        let wrap = layout_width.filter(|_| !format.no_wrap);
        let lines = wrap_lines(self.options.text_measurer.as_ref(), text, &ts, wrap);
        let metrics = self.options.text_measurer.measure(&lines.join("\n"), &ts);
        SizeF::new(metrics.width, metrics.height)
    }

    fn measure_character_ranges(
        &self,
        _text: &str,
        _font: &Font,
        _layout: RectF,
        _format: &StringFormat,
    ) -> Result<Vec<RectF>> {
        unsupported("measure_character_ranges")
    }

    fn draw_image(&mut self, image: &RgbaImage, at: PointF) -> Result<()> {
        self.emit_bitmap(image, None, at, (1.0, 1.0), Matrix::identity())
    }

    fn draw_image_rect(&mut self, image: &RgbaImage, dest: RectF) -> Result<()> {
        let (w, h) = image.dimensions();
        if w == 0 || h == 0 {
            return Ok(());
        }
        let scale = (dest.width() / f64::from(w), dest.height() / f64::from(h));
        self.emit_bitmap(image, None, dest.origin, scale, Matrix::identity())
    }

    fn draw_image_src_rect(&mut self, image: &RgbaImage, dest: RectF, src: RectF) -> Result<()> {
        let src_px = (
            to_px(src.min_x()),
            to_px(src.min_y()),
            to_px(src.width()),
            to_px(src.height()),
        );
        if src_px.2 == 0 || src_px.3 == 0 {
            return Ok(());
        }
        let scale = (
            dest.width() / f64::from(src_px.2),
            dest.height() / f64::from(src_px.3),
        );
        self.emit_bitmap(image, Some(src_px), dest.origin, scale, Matrix::identity())
    }

    fn draw_image_unscaled(&mut self, image: &RgbaImage, at: PointF) -> Result<()> {
        self.draw_image(image, at)
    }

    fn draw_image_unscaled_and_clipped(&mut self, image: &RgbaImage, rect: RectF) -> Result<()> {
        let src = (0, 0, to_px(rect.width()), to_px(rect.height()));
        self.emit_bitmap(image, Some(src), rect.origin, (1.0, 1.0), Matrix::identity())
    }

    fn draw_image_points(&mut self, image: &RgbaImage, dest: [PointF; 3]) -> Result<()> {
        let (w, h) = image.dimensions();
        if w == 0 || h == 0 {
            return Ok(());
        }
        let [ul, ur, ll] = dest;
        let (w, h) = (f64::from(w), f64::from(h));
        let placement = matrix(
            (ur.x - ul.x) / w,
            (ur.y - ul.y) / w,
            (ll.x - ul.x) / h,
            (ll.y - ul.y) / h,
            ul.x,
            ul.y,
        );
        self.emit_bitmap(image, None, PointF::origin(), (1.0, 1.0), placement)
    }

    fn draw_icon(&mut self, icon: &RgbaImage, rect: RectF) -> Result<()> {
        self.draw_image_rect(icon, rect)
    }

    fn draw_icon_unstretched(&mut self, icon: &RgbaImage, rect: RectF) -> Result<()> {
        self.draw_image_unscaled_and_clipped(icon, rect)
    }

    fn dpi_x(&self) -> Result<f64> {
        unsupported("dpi_x")
    }

    fn dpi_y(&self) -> Result<f64> {
        unsupported("dpi_y")
    }

    fn get_hdc(&mut self) -> Result<usize> {
        unsupported("get_hdc")
    }

    fn release_hdc(&mut self, _hdc: usize) -> Result<()> {
        unsupported("release_hdc")
    }

    fn add_metafile_comment(&mut self, _data: &[u8]) -> Result<()> {
        unsupported("add_metafile_comment")
    }

    fn get_nearest_color(&self, color: Argb) -> Argb {
        color
    }
}
