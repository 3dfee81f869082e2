use super::number::FmtNumber;
use crate::error::FormatError;
use crate::geom::{Matrix, Point};
use std::str::FromStr;

/// One affine transform. Every parsed function is folded into its matrix immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform(pub Matrix);

impl Default for Transform {
    fn default() -> Self {
        Transform(Matrix::identity())
    }
}

impl Transform {
    pub fn from_matrix(m: Matrix) -> Self {
        Transform(m)
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Transform(Matrix::translation(tx, ty))
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Transform(Matrix::scale(sx, sy))
    }

    /// Rotation by `degrees`, clockwise on a y-down canvas.
    pub fn rotate(degrees: f64) -> Self {
        Transform(Matrix::rotation(euclid::Angle::degrees(degrees)))
    }

    pub fn rotate_about(degrees: f64, cx: f64, cy: f64) -> Self {
        let m = Matrix::translation(-cx, -cy)
            .then(&Matrix::rotation(euclid::Angle::degrees(degrees)))
            .then(&Matrix::translation(cx, cy));
        Transform(m)
    }

    pub fn skew_x(degrees: f64) -> Self {
        Transform(Matrix::new(1.0, 0.0, degrees.to_radians().tan(), 1.0, 0.0, 0.0))
    }

    pub fn skew_y(degrees: f64) -> Self {
        Transform(Matrix::new(1.0, degrees.to_radians().tan(), 0.0, 1.0, 0.0, 0.0))
    }

    pub fn matrix(&self) -> Matrix {
        self.0
    }

    pub fn is_identity(&self) -> bool {
        self.0 == Matrix::identity()
    }

    pub fn apply(&self, p: Point) -> Point {
        self.0.transform_point(p)
    }
}

impl From<Matrix> for Transform {
    fn from(m: Matrix) -> Self {
        Transform(m)
    }
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = &self.0;
        write!(
            f,
            "matrix({},{},{},{},{},{})",
            FmtNumber(m.m11),
            FmtNumber(m.m12),
            FmtNumber(m.m21),
            FmtNumber(m.m22),
            FmtNumber(m.m31),
            FmtNumber(m.m32)
        )
    }
}

/// The value of a `transform` attribute.
///
/// Items apply right to left to a point, so the leftmost transform is the outermost one, as in
/// `transform="translate(10) scale(2)"` which scales first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformList(pub Vec<Transform>);

impl TransformList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(t: Transform) -> Self {
        TransformList(vec![t])
    }

    pub fn push(&mut self, t: Transform) {
        self.0.push(t);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn to_matrix(&self) -> Matrix {
        self.0
            .iter()
            .rev()
            .fold(Matrix::identity(), |acc, t| acc.then(&t.0))
    }

    /// Parses a `transform` attribute. `rotate(a cx cy)` arrives as the three transforms it
    /// stands for.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        svgtypes::TransformListParser::from(text)
            .map(|token| {
                token
                    .map(Transform::from)
                    .map_err(|_| FormatError::transform(text))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(TransformList)
    }
}

impl From<svgtypes::TransformListToken> for Transform {
    fn from(token: svgtypes::TransformListToken) -> Self {
        use svgtypes::TransformListToken as T;
        match token {
            T::Matrix { a, b, c, d, e, f } => Transform(Matrix::new(a, b, c, d, e, f)),
            T::Translate { tx, ty } => Transform::translate(tx, ty),
            T::Scale { sx, sy } => Transform::scale(sx, sy),
            T::Rotate { angle } => Transform::rotate(angle),
            T::SkewX { angle } => Transform::skew_x(angle),
            T::SkewY { angle } => Transform::skew_y(angle),
        }
    }
}

impl FromStr for TransformList {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for TransformList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, t) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            t.fmt(f)?;
        }
        Ok(())
    }
}

impl From<Transform> for TransformList {
    fn from(t: Transform) -> Self {
        TransformList::single(t)
    }
}

impl From<Matrix> for TransformList {
    fn from(m: Matrix) -> Self {
        TransformList::single(Transform(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatErrorKind;
    use crate::geom::point;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn every_function_folds_into_a_matrix() {
        let list = TransformList::parse("translate(10) scale(2,3) rotate(90) skewX(45)").unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(list.0[0].to_string(), "matrix(1,0,0,1,10,0)");
        assert_eq!(list.0[1].to_string(), "matrix(2,0,0,3,0,0)");
        assert_eq!(list.0[2].to_string(), "matrix(0,1,-1,0,0,0)");
        assert_eq!(list.0[3].to_string(), "matrix(1,0,1,1,0,0)");
    }

    #[test]
    fn leftmost_transform_is_outermost() {
        let list = TransformList::parse("translate(10,0) scale(2)").unwrap();
        let p = list.to_matrix().transform_point(point(1.0, 1.0));
        assert!(close(p, point(12.0, 2.0)));
    }

    #[test]
    fn rotate_about_center_keeps_center_fixed() {
        let list = TransformList::parse("rotate(90, 5 5)").unwrap();
        assert_eq!(list.len(), 3);
        let m = list.to_matrix();
        let expected = Transform::rotate_about(90.0, 5.0, 5.0).matrix();
        assert!(close(m.transform_point(point(0.0, 0.0)), expected.transform_point(point(0.0, 0.0))));
        assert!(close(m.transform_point(point(5.0, 5.0)), point(5.0, 5.0)));
        assert!(close(m.transform_point(point(10.0, 5.0)), point(5.0, 10.0)));
    }

    #[test]
    fn serializes_space_separated_matrices() {
        let list = TransformList::parse(" matrix(1 0 0 1 3 4),translate(1,2)").unwrap();
        assert_eq!(list.to_string(), "matrix(1,0,0,1,3,4) matrix(1,0,0,1,1,2)");
        assert_eq!(TransformList::parse(&list.to_string()).unwrap(), list);
    }

    #[test]
    fn rejects_bad_lists() {
        for bad in ["translate", "rotate(1,2)", "spin(3)", "scale(1,2", "matrix(1,2,3)"] {
            let err = TransformList::parse(bad).unwrap_err();
            assert_eq!(err.kind, FormatErrorKind::InvalidTransform, "{bad:?}");
        }
        assert!(TransformList::parse("").unwrap().is_empty());
    }
}
