//! Arc and cardinal-spline conversions to SVG path form.

use svgscribe_core::geom::{Point, Vector, point, rect};
use svgscribe_core::{Path, Rect};

pub use svgscribe_core::geom::bounding_box;

/// Center and radii of the ellipse inscribed in `rect`.
pub fn ellipse_bounds(rect: &Rect) -> (Point, f64, f64) {
    let (rx, ry) = (rect.width() / 2.0, rect.height() / 2.0);
    (point(rect.min_x() + rx, rect.min_y() + ry), rx, ry)
}

/// Point on the ellipse along the ray at `theta` radians from its center.
fn ellipse_point(center: Point, rx: f64, ry: f64, theta: f64) -> Point {
    let (sin, cos) = theta.sin_cos();
    let denom = ((ry * cos).powi(2) + (rx * sin).powi(2)).sqrt();
    let r = if denom == 0.0 { 0.0 } else { rx * ry / denom };
    point(center.x + r * cos, center.y + r * sin)
}

/// Elliptical arc of the ellipse inscribed in `(x, y, w, h)`, from `start_deg` over `sweep_deg`.
///
/// Angles are measured along the true polar angle, so the end points lie exactly on non-circular
/// ellipses. A sweep of a full turn or more is split into two half arcs. With `as_pie` the wedge is
/// closed through the center.
pub fn arc_to_path(
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    start_deg: f64,
    sweep_deg: f64,
    as_pie: bool,
) -> Path {
    let (center, rx, ry) = ellipse_bounds(&rect(x, y, w, h));
    let start = start_deg.to_radians();
    let sweep = sweep_deg.to_radians();
    let clockwise = sweep_deg > 0.0;

    let from = ellipse_point(center, rx, ry, start);
    let mut path = Path::new();
    path.move_to(from.x, from.y);

    if sweep_deg.abs() >= 360.0 {
        let mid = ellipse_point(center, rx, ry, start + sweep / 2.0);
        let to = ellipse_point(center, rx, ry, start + sweep);
        path.arc_to(rx, ry, 0.0, false, clockwise, mid.x, mid.y);
        path.arc_to(rx, ry, 0.0, false, clockwise, to.x, to.y);
    } else {
        let to = ellipse_point(center, rx, ry, start + sweep);
        path.arc_to(rx, ry, 0.0, sweep_deg.abs() > 180.0, clockwise, to.x, to.y);
    }

    if as_pie {
        path.line_to(center.x, center.y);
        path.line_to(from.x, from.y);
        path.close();
    }
    path
}

/// Control offset for a vertex whose neighbors differ by `d`.
fn control_offset(d: Vector, tension: f64) -> Vector {
    let len = d.length();
    if len == 0.0 || tension == 0.0 {
        return Vector::zero();
    }
    d / (len / (10.0 * tension * tension)).sqrt()
}

/// Converts a cardinal spline through `points` into a flat cubic control list
/// `[anchor, control, control, anchor, ...]`.
///
/// Open curves emit `count` segments starting at segment `start`; vertices outside that window
/// still shape the tangents. End vertices take their tangent from the single adjacent vertex.
/// Closed curves ignore the window, wrap neighbors around and end on a copy of the first vertex.
pub fn spline_to_bezier(
    points: &[Point],
    start: usize,
    count: usize,
    closed: bool,
    tension: f64,
) -> Vec<Point> {
    let n = points.len();
    if n < 2 {
        return points.to_vec();
    }

    let offsets: Vec<Vector> = (0..n)
        .map(|i| {
            let (prev, next) = if closed {
                (points[(i + n - 1) % n], points[(i + 1) % n])
            } else {
                (points[i.saturating_sub(1)], points[(i + 1).min(n - 1)])
            };
            control_offset(next - prev, tension)
        })
        .collect();

    let segments: Vec<usize> = if closed {
        (0..n).collect()
    } else {
        let end = start.saturating_add(count).min(n - 1);
        (start.min(end)..end).collect()
    };

    let mut out = Vec::with_capacity(segments.len() * 3 + 1);
    for (k, &i) in segments.iter().enumerate() {
        let j = (i + 1) % n;
        if k == 0 {
            out.push(points[i]);
        }
        out.push(points[i] + offsets[i]);
        out.push(points[j] - offsets[j]);
        out.push(points[j]);
    }
    out
}

/// `M p0 C c1 c2 p1 C ...` from a flat control list; trailing points that do not complete a
/// segment are ignored.
pub fn bezier_path(points: &[Point]) -> Path {
    let mut path = Path::new();
    let Some((first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(first.x, first.y);
    for seg in rest.chunks_exact(3) {
        path.cubic_to(seg[0].x, seg[0].y, seg[1].x, seg[1].y, seg[2].x, seg[2].y);
    }
    path
}
