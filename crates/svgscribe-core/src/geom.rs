pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;
pub type Rect = euclid::Rect<f64, Unit>;
/// Affine matrix in SVG `matrix(a b c d e f)` order: `m11=a, m12=b, m21=c, m22=d, m31=e, m32=f`.
pub type Matrix = euclid::Transform2D<f64, Unit, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    euclid::rect(x, y, width, height)
}

pub fn matrix(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Matrix {
    Matrix::new(a, b, c, d, e, f)
}

/// Smallest rectangle containing every point, or `None` for an empty slice.
pub fn bounding_box(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(rect(min_x, min_y, max_x - min_x, max_y - min_y))
}
