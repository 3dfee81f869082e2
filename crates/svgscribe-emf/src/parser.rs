use crate::error::{MetafileParseError, Result};
use crate::objects::{GdiObject, LogBrush, LogPen, color_from_colorref, stock};
use crate::points::VisualPoints;
use crate::records::*;
use byteorder::{LittleEndian, ReadBytesExt};
use rustc_hash::FxHashMap;
use std::io::Cursor;
use svgscribe_core::Color;
use svgscribe_core::geom::{Matrix, Point, point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseOptions {
    /// Width of the stroke that was rendered. Runs starting within twice this distance of the
    /// previous run's end are merged into one polyline.
    pub line_width: f64,
    /// Points closer than this collapse into one visual point.
    pub point_epsilon: f64,
    /// Line segments per flattened cubic Bézier.
    pub bezier_steps: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            point_epsilon: 1.0,
            bezier_steps: 8,
        }
    }
}

impl ParseOptions {
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_point_epsilon(mut self, point_epsilon: f64) -> Self {
        self.point_epsilon = point_epsilon;
        self
    }
}

/// Receives the shapes recovered from a metafile, in drawing order.
pub trait MetafileSink {
    fn draw_polyline(&mut self, points: &[Point], closed: bool);
    fn fill_polygon(&mut self, points: &[Point], color: &Color);
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetafileShape {
    Polyline { points: Vec<Point>, closed: bool },
    Fill { points: Vec<Point>, color: Color },
}

/// Collects everything a parse reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetafileShapes {
    pub shapes: Vec<MetafileShape>,
}

impl MetafileShapes {
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn polylines(&self) -> impl Iterator<Item = (&[Point], bool)> {
        self.shapes.iter().filter_map(|s| match s {
            MetafileShape::Polyline { points, closed } => Some((points.as_slice(), *closed)),
            MetafileShape::Fill { .. } => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = (&[Point], &Color)> {
        self.shapes.iter().filter_map(|s| match s {
            MetafileShape::Fill { points, color } => Some((points.as_slice(), color)),
            MetafileShape::Polyline { .. } => None,
        })
    }
}

impl MetafileSink for MetafileShapes {
    fn draw_polyline(&mut self, points: &[Point], closed: bool) {
        self.shapes.push(MetafileShape::Polyline {
            points: points.to_vec(),
            closed,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: &Color) {
        self.shapes.push(MetafileShape::Fill {
            points: points.to_vec(),
            color: color.clone(),
        });
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub records: usize,
    pub skipped: usize,
    pub shapes: usize,
}

/// Parses `data` and collects the recovered shapes.
pub fn parse_shapes(data: &[u8], options: &ParseOptions) -> Result<MetafileShapes> {
    let mut shapes = MetafileShapes::default();
    parse(data, options, &mut shapes)?;
    Ok(shapes)
}

/// Parses `data`, reporting shapes to `sink` once every record has been read.
pub fn parse<S: MetafileSink + ?Sized>(
    data: &[u8],
    options: &ParseOptions,
    sink: &mut S,
) -> Result<ParseStats> {
    let mut state = ParseState::new(options);
    let mut offset = 0usize;
    let mut stats = ParseStats::default();

    while offset < data.len() {
        let available = data.len() - offset;
        if available < 8 {
            return Err(MetafileParseError::Truncated {
                offset,
                needed: 8,
                available,
            });
        }
        let mut head = Cursor::new(&data[offset..offset + 8]);
        let record_type = head.read_u32::<LittleEndian>()?;
        let size = head.read_u32::<LittleEndian>()?;

        if offset == 0 && record_type != EMR_HEADER {
            return Err(MetafileParseError::MissingHeader);
        }
        if size < 8 {
            return Err(MetafileParseError::RecordTooSmall { offset, size });
        }
        let size_bytes = size as usize;
        if size_bytes > available {
            return Err(MetafileParseError::Truncated {
                offset,
                needed: size_bytes,
                available,
            });
        }

        let mut record = Record {
            record_type,
            offset,
            cursor: Cursor::new(&data[offset + 8..offset + size_bytes]),
        };
        stats.records += 1;
        if record_type == EMR_EOF {
            break;
        }
        if !state.apply(&mut record)? {
            stats.skipped += 1;
            tracing::trace!(record_type, offset, size, "skipping metafile record");
        }
        offset += size_bytes;
    }

    if stats.records == 0 {
        return Err(MetafileParseError::MissingHeader);
    }

    state.flush_run();
    stats.shapes = state.emit(sink);
    tracing::debug!(
        records = stats.records,
        skipped = stats.skipped,
        shapes = stats.shapes,
        visual_points = state.points.len(),
        "metafile parsed"
    );
    Ok(stats)
}

struct Record<'a> {
    record_type: u32,
    offset: usize,
    cursor: Cursor<&'a [u8]>,
}

impl Record<'_> {
    fn overrun(&self) -> MetafileParseError {
        MetafileParseError::FieldOverrun {
            record_type: self.record_type,
            offset: self.offset,
        }
    }

    fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len();
        len.saturating_sub(self.cursor.position() as usize)
    }

    fn u32(&mut self) -> Result<u32> {
        self.cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| self.overrun())
    }

    fn i32(&mut self) -> Result<i32> {
        self.cursor
            .read_i32::<LittleEndian>()
            .map_err(|_| self.overrun())
    }

    fn i16(&mut self) -> Result<i16> {
        self.cursor
            .read_i16::<LittleEndian>()
            .map_err(|_| self.overrun())
    }

    fn f32(&mut self) -> Result<f32> {
        self.cursor
            .read_f32::<LittleEndian>()
            .map_err(|_| self.overrun())
    }

    fn skip(&mut self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(self.overrun());
        }
        self.cursor.set_position(self.cursor.position() + n as u64);
        Ok(())
    }

    fn xform(&mut self) -> Result<Matrix> {
        let mut v = [0f64; 6];
        for slot in &mut v {
            *slot = f64::from(self.f32()?);
        }
        Ok(Matrix::new(v[0], v[1], v[2], v[3], v[4], v[5]))
    }

    /// `RECTL bounds; DWORD count; POINT(S) points[count]`.
    fn point_array(&mut self, small: bool) -> Result<Vec<Point>> {
        self.skip(16)?;
        let count = self.u32()? as usize;
        let each = if small { 4 } else { 8 };
        if count.checked_mul(each).is_none_or(|n| n > self.remaining()) {
            return Err(self.overrun());
        }
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            let (x, y) = if small {
                (f64::from(self.i16()?), f64::from(self.i16()?))
            } else {
                (f64::from(self.i32()?), f64::from(self.i32()?))
            };
            out.push(point(x, y));
        }
        Ok(out)
    }
}

enum Pending {
    Stroke { points: Vec<usize>, closed: bool },
    Fill { points: Vec<usize>, color: Color },
}

#[derive(Default)]
struct Figure {
    points: Vec<usize>,
    closed: bool,
}

struct ParseState<'o> {
    options: &'o ParseOptions,
    world: Matrix,
    position: Point,
    objects: FxHashMap<u32, GdiObject>,
    pen: LogPen,
    brush: LogBrush,
    points: VisualPoints,
    run: Vec<usize>,
    pending: Vec<Pending>,
    in_path: bool,
    figures: Vec<Figure>,
}

impl<'o> ParseState<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            world: Matrix::identity(),
            position: point(0.0, 0.0),
            objects: FxHashMap::default(),
            pen: LogPen::default(),
            brush: LogBrush::default(),
            points: VisualPoints::new(options.point_epsilon),
            run: Vec::new(),
            pending: Vec::new(),
            in_path: false,
            figures: Vec::new(),
        }
    }

    /// Returns `false` for record types this reader does not interpret.
    fn apply(&mut self, r: &mut Record<'_>) -> Result<bool> {
        match r.record_type {
            EMR_HEADER => {}
            EMR_MOVETOEX => {
                let p = point(f64::from(r.i32()?), f64::from(r.i32()?));
                self.move_to(p);
            }
            EMR_LINETO => {
                let p = point(f64::from(r.i32()?), f64::from(r.i32()?));
                self.line_to(&[p]);
            }
            EMR_POLYLINE | EMR_POLYLINE16 => {
                let pts = r.point_array(r.record_type == EMR_POLYLINE16)?;
                self.polyline(&pts);
            }
            EMR_POLYLINETO | EMR_POLYLINETO16 => {
                let pts = r.point_array(r.record_type == EMR_POLYLINETO16)?;
                self.line_to(&pts);
            }
            EMR_POLYBEZIER | EMR_POLYBEZIER16 => {
                let pts = r.point_array(r.record_type == EMR_POLYBEZIER16)?;
                if let Some((first, rest)) = pts.split_first() {
                    let flat = self.flatten(*first, rest);
                    self.polyline(&flat);
                }
            }
            EMR_POLYBEZIERTO | EMR_POLYBEZIERTO16 => {
                let pts = r.point_array(r.record_type == EMR_POLYBEZIERTO16)?;
                let flat = self.flatten_from_position(&pts);
                self.line_to(&flat);
            }
            EMR_POLYGON | EMR_POLYGON16 => {
                let pts = r.point_array(r.record_type == EMR_POLYGON16)?;
                self.polygon(&pts);
            }
            EMR_SETWORLDTRANSFORM => {
                self.world = r.xform()?;
            }
            EMR_MODIFYWORLDTRANSFORM => {
                let xform = r.xform()?;
                match r.u32()? {
                    MWT_IDENTITY => self.world = Matrix::identity(),
                    MWT_LEFTMULTIPLY => self.world = xform.then(&self.world),
                    MWT_RIGHTMULTIPLY => self.world = self.world.then(&xform),
                    MWT_SET => self.world = xform,
                    mode => tracing::trace!(mode, "unknown world transform mode"),
                }
            }
            EMR_CREATEPEN => {
                let handle = r.u32()?;
                let style = r.u32()?;
                let width = r.i32()?;
                let _width_y = r.i32()?;
                let color = color_from_colorref(r.u32()?);
                self.objects.insert(
                    handle,
                    GdiObject::Pen(LogPen {
                        style,
                        width: f64::from(width),
                        color,
                    }),
                );
            }
            EMR_EXTCREATEPEN => {
                let handle = r.u32()?;
                // Device-independent bitmap offsets and sizes.
                r.skip(16)?;
                let style = r.u32()?;
                let width = r.u32()?;
                let _brush_style = r.u32()?;
                let color = color_from_colorref(r.u32()?);
                self.objects.insert(
                    handle,
                    GdiObject::Pen(LogPen {
                        style,
                        width: f64::from(width),
                        color,
                    }),
                );
            }
            EMR_CREATEBRUSHINDIRECT => {
                let handle = r.u32()?;
                let style = r.u32()?;
                let color = color_from_colorref(r.u32()?);
                let hatch = r.u32()?;
                self.objects
                    .insert(handle, GdiObject::Brush(LogBrush { style, color, hatch }));
            }
            EMR_SELECTOBJECT => {
                let handle = r.u32()?;
                let object = if handle & STOCK_OBJECT_FLAG != 0 {
                    stock(handle)
                } else {
                    self.objects.get(&handle).cloned()
                };
                match object {
                    Some(GdiObject::Pen(pen)) => self.pen = pen,
                    Some(GdiObject::Brush(brush)) => self.brush = brush,
                    None => tracing::trace!(handle, "selecting unknown object"),
                }
            }
            EMR_DELETEOBJECT => {
                let handle = r.u32()?;
                self.objects.remove(&handle);
            }
            EMR_BEGINPATH => {
                self.flush_run();
                self.in_path = true;
                self.figures.clear();
            }
            EMR_ENDPATH => {
                self.in_path = false;
            }
            EMR_CLOSEFIGURE => {
                if let Some(fig) = self.figures.last_mut() {
                    fig.closed = true;
                }
            }
            EMR_STROKEPATH => self.finish_path(true, false),
            EMR_FILLPATH => self.finish_path(false, true),
            EMR_STROKEANDFILLPATH => self.finish_path(true, true),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn device(&self, p: Point) -> Point {
        self.world.transform_point(p)
    }

    fn intern(&mut self, p: Point) -> usize {
        let d = self.device(p);
        self.points.intern(d)
    }

    fn move_to(&mut self, p: Point) {
        self.position = p;
        if self.in_path {
            let idx = self.intern(p);
            self.figures.push(Figure {
                points: vec![idx],
                closed: false,
            });
        }
    }

    /// Lines from the current position through `pts` (logical coordinates).
    fn line_to(&mut self, pts: &[Point]) {
        let Some(last) = pts.last().copied() else {
            return;
        };
        let mut run = Vec::with_capacity(pts.len() + 1);
        run.push(self.position);
        run.extend_from_slice(pts);
        self.position = last;
        self.add_connected(&run);
    }

    /// A run that continues the current figure inside a path bracket.
    fn add_connected(&mut self, run: &[Point]) {
        if self.in_path {
            let idx: Vec<usize> = run.iter().map(|p| self.intern(*p)).collect();
            if let Some(fig) = self.figures.last_mut().filter(|f| !f.closed) {
                fig.points.extend(idx.into_iter().skip(1));
            } else {
                self.figures.push(Figure {
                    points: idx,
                    closed: false,
                });
            }
        } else {
            self.stroke_run(run);
        }
    }

    fn polyline(&mut self, pts: &[Point]) {
        if pts.is_empty() {
            return;
        }
        if self.in_path {
            let idx = pts.iter().map(|p| self.intern(*p)).collect();
            self.figures.push(Figure {
                points: idx,
                closed: false,
            });
        } else {
            self.stroke_run(pts);
        }
    }

    fn polygon(&mut self, pts: &[Point]) {
        if pts.is_empty() {
            return;
        }
        let idx: Vec<usize> = pts.iter().map(|p| self.intern(*p)).collect();
        if self.in_path {
            self.figures.push(Figure {
                points: idx,
                closed: true,
            });
            return;
        }
        self.flush_run();
        self.push_fill(idx.clone());
        if !self.pen.is_null() {
            self.pending.push(Pending::Stroke {
                points: idx,
                closed: true,
            });
        }
    }

    fn push_fill(&mut self, points: Vec<usize>) {
        if self.brush.is_hollow() || points.len() < 3 {
            return;
        }
        self.pending.push(Pending::Fill {
            points,
            color: self.brush.color.clone(),
        });
    }

    /// Adds a stroked run, merging it into the buffered polyline when it starts close to its end.
    fn stroke_run(&mut self, run: &[Point]) {
        let idx: Vec<usize> = run.iter().map(|p| self.intern(*p)).collect();
        let Some(&first) = idx.first() else {
            return;
        };

        let joins = match (self.run.last(), self.points.anchor(first)) {
            (Some(&last), Some(start)) => self
                .points
                .anchor(last)
                .is_some_and(|end| (end - start).length() <= 2.0 * self.options.line_width),
            _ => false,
        };
        if !joins {
            self.flush_run();
        }
        for i in idx {
            if self.run.last() != Some(&i) {
                self.run.push(i);
            }
        }
    }

    fn flush_run(&mut self) {
        if self.run.is_empty() {
            return;
        }
        let points = std::mem::take(&mut self.run);
        self.pending.push(Pending::Stroke {
            points,
            closed: false,
        });
    }

    fn finish_path(&mut self, stroke: bool, fill: bool) {
        self.in_path = false;
        let figures = std::mem::take(&mut self.figures);
        for fig in figures {
            if fill {
                self.push_fill(fig.points.clone());
            }
            if stroke && !self.pen.is_null() {
                self.pending.push(Pending::Stroke {
                    points: fig.points,
                    closed: fig.closed,
                });
            }
        }
    }

    /// Flattens cubic segments `start, [c1, c2, end]*` into line points (logical coordinates),
    /// including `start`.
    fn flatten(&self, start: Point, rest: &[Point]) -> Vec<Point> {
        let steps = self.options.bezier_steps.max(1);
        let mut out = vec![start];
        let mut p0 = start;
        for seg in rest.chunks_exact(3) {
            let (c1, c2, p3) = (seg[0], seg[1], seg[2]);
            for i in 1..=steps {
                let t = i as f64 / steps as f64;
                let u = 1.0 - t;
                let x = u * u * u * p0.x + 3.0 * u * u * t * c1.x + 3.0 * u * t * t * c2.x + t * t * t * p3.x;
                let y = u * u * u * p0.y + 3.0 * u * u * t * c1.y + 3.0 * u * t * t * c2.y + t * t * t * p3.y;
                out.push(point(x, y));
            }
            p0 = p3;
        }
        out
    }

    /// Flattens `POLYBEZIERTO` control points, which start at the current position.
    fn flatten_from_position(&self, pts: &[Point]) -> Vec<Point> {
        let mut flat = self.flatten(self.position, pts);
        flat.remove(0);
        flat
    }

    fn emit<S: MetafileSink + ?Sized>(&self, sink: &mut S) -> usize {
        let mut count = 0;
        for shape in &self.pending {
            match shape {
                Pending::Stroke { points, closed } => {
                    let pts = self.points.resolve(points);
                    if pts.len() < 2 {
                        continue;
                    }
                    sink.draw_polyline(&pts, *closed);
                }
                Pending::Fill { points, color } => {
                    let pts = self.points.resolve(points);
                    sink.fill_polygon(&pts, color);
                }
            }
            count += 1;
        }
        count
    }
}
