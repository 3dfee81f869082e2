use super::{FillMode, PointF, RectF};
use svgscribe_core::Path;
use svgscribe_core::geom::point;

/// Point type codes, as stored in [`GraphicsPath::types`].
pub mod point_type {
    pub const START: u8 = 0x00;
    pub const LINE: u8 = 0x01;
    pub const BEZIER: u8 = 0x03;
    pub const TYPE_MASK: u8 = 0x07;
    pub const CLOSE_SUBPATH: u8 = 0x80;
}

/// Control-point offset of a quarter-ellipse cubic.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// A sequence of figures made of lines and cubic Béziers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphicsPath {
    pub points: Vec<PointF>,
    pub types: Vec<u8>,
    pub fill_mode: FillMode,
    open_figure: bool,
}

impl GraphicsPath {
    pub fn new(fill_mode: FillMode) -> Self {
        Self {
            fill_mode,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// The next added point begins a new figure without closing the current one.
    pub fn start_figure(&mut self) -> &mut Self {
        self.open_figure = false;
        self
    }

    pub fn close_figure(&mut self) -> &mut Self {
        if let Some(last) = self.types.last_mut() {
            *last |= point_type::CLOSE_SUBPATH;
        }
        self.open_figure = false;
        self
    }

    /// Appends `points` to the current figure; the first one connects to the figure with a line
    /// unless it repeats the last point.
    fn append(&mut self, points: &[PointF], kind: u8) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        if !self.open_figure {
            self.points.push(*first);
            self.types.push(point_type::START);
        } else if self.points.last() != Some(first) {
            self.points.push(*first);
            self.types.push(point_type::LINE);
        }
        for p in rest {
            self.points.push(*p);
            self.types.push(kind);
        }
        self.open_figure = true;
    }

    pub fn add_line(&mut self, p1: PointF, p2: PointF) -> &mut Self {
        self.append(&[p1, p2], point_type::LINE);
        self
    }

    pub fn add_lines(&mut self, points: &[PointF]) -> &mut Self {
        self.append(points, point_type::LINE);
        self
    }

    pub fn add_bezier(&mut self, p1: PointF, c1: PointF, c2: PointF, p2: PointF) -> &mut Self {
        self.append(&[p1, c1, c2, p2], point_type::BEZIER);
        self
    }

    /// `points` is `[anchor, control, control, anchor, ...]`.
    pub fn add_beziers(&mut self, points: &[PointF]) -> &mut Self {
        self.append(points, point_type::BEZIER);
        self
    }

    pub fn add_polygon(&mut self, points: &[PointF]) -> &mut Self {
        self.start_figure();
        self.append(points, point_type::LINE);
        self.close_figure()
    }

    pub fn add_rectangle(&mut self, r: RectF) -> &mut Self {
        let (x0, y0, x1, y1) = (r.min_x(), r.min_y(), r.max_x(), r.max_y());
        self.add_polygon(&[point(x0, y0), point(x1, y0), point(x1, y1), point(x0, y1)])
    }

    pub fn add_ellipse(&mut self, r: RectF) -> &mut Self {
        let (rx, ry) = (r.width() / 2.0, r.height() / 2.0);
        let (cx, cy) = (r.min_x() + rx, r.min_y() + ry);
        let (kx, ky) = (rx * KAPPA, ry * KAPPA);
        let pts = [
            point(cx + rx, cy),
            point(cx + rx, cy + ky),
            point(cx + kx, cy + ry),
            point(cx, cy + ry),
            point(cx - kx, cy + ry),
            point(cx - rx, cy + ky),
            point(cx - rx, cy),
            point(cx - rx, cy - ky),
            point(cx - kx, cy - ry),
            point(cx, cy - ry),
            point(cx + kx, cy - ry),
            point(cx + rx, cy - ky),
            point(cx + rx, cy),
        ];
        self.start_figure();
        self.append(&pts, point_type::BEZIER);
        self.close_figure()
    }

    /// Converts to SVG path data. Bézier runs consume three points per segment.
    pub fn to_path(&self) -> Path {
        let mut path = Path::new();
        let mut i = 0;
        while i < self.points.len() {
            let ty = self.types.get(i).copied().unwrap_or(point_type::LINE);
            let p = self.points[i];
            let mut closes = ty & point_type::CLOSE_SUBPATH != 0;
            match ty & point_type::TYPE_MASK {
                point_type::START => {
                    path.move_to(p.x, p.y);
                    i += 1;
                }
                point_type::BEZIER if i + 2 < self.points.len() => {
                    let (c1, c2, end) = (p, self.points[i + 1], self.points[i + 2]);
                    path.cubic_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
                    closes = self.types[i..i + 3]
                        .iter()
                        .any(|t| t & point_type::CLOSE_SUBPATH != 0);
                    i += 3;
                }
                _ => {
                    path.line_to(p.x, p.y);
                    i += 1;
                }
            }
            if closes {
                path.close();
            }
        }
        path
    }
}
