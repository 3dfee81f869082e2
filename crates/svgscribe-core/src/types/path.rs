use super::number::FmtNumber;
use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    MoveTo,
    ClosePath,
    LineTo,
    HLineTo,
    VLineTo,
    CurveTo,
    SmoothCurveTo,
    QuadTo,
    SmoothQuadTo,
    ArcTo,
}

impl SegmentKind {
    /// Number of operands one segment of this kind carries.
    pub const fn operand_count(self) -> usize {
        match self {
            SegmentKind::MoveTo => 2,
            SegmentKind::ClosePath => 0,
            SegmentKind::LineTo => 2,
            SegmentKind::HLineTo => 1,
            SegmentKind::VLineTo => 1,
            SegmentKind::CurveTo => 6,
            SegmentKind::SmoothCurveTo => 4,
            SegmentKind::QuadTo => 4,
            SegmentKind::SmoothQuadTo => 2,
            SegmentKind::ArcTo => 7,
        }
    }

    fn letter(self, absolute: bool) -> char {
        let upper = match self {
            SegmentKind::MoveTo => 'M',
            SegmentKind::ClosePath => 'Z',
            SegmentKind::LineTo => 'L',
            SegmentKind::HLineTo => 'H',
            SegmentKind::VLineTo => 'V',
            SegmentKind::CurveTo => 'C',
            SegmentKind::SmoothCurveTo => 'S',
            SegmentKind::QuadTo => 'Q',
            SegmentKind::SmoothQuadTo => 'T',
            SegmentKind::ArcTo => 'A',
        };
        if absolute {
            upper
        } else {
            upper.to_ascii_lowercase()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub kind: SegmentKind,
    pub absolute: bool,
    pub data: Vec<f64>,
}

impl PathSegment {
    /// Builds a segment, checking the operand count for `kind`.
    pub fn new(kind: SegmentKind, absolute: bool, data: Vec<f64>) -> Option<Self> {
        (data.len() == kind.operand_count()).then_some(Self {
            kind,
            absolute,
            data,
        })
    }
}

impl From<svgtypes::PathSegment> for PathSegment {
    fn from(seg: svgtypes::PathSegment) -> Self {
        use svgtypes::PathSegment as S;
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        let (kind, absolute, data) = match seg {
            S::MoveTo { abs, x, y } => (SegmentKind::MoveTo, abs, vec![x, y]),
            S::LineTo { abs, x, y } => (SegmentKind::LineTo, abs, vec![x, y]),
            S::HorizontalLineTo { abs, x } => (SegmentKind::HLineTo, abs, vec![x]),
            S::VerticalLineTo { abs, y } => (SegmentKind::VLineTo, abs, vec![y]),
            S::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => (SegmentKind::CurveTo, abs, vec![x1, y1, x2, y2, x, y]),
            S::SmoothCurveTo { abs, x2, y2, x, y } => {
                (SegmentKind::SmoothCurveTo, abs, vec![x2, y2, x, y])
            }
            S::Quadratic { abs, x1, y1, x, y } => (SegmentKind::QuadTo, abs, vec![x1, y1, x, y]),
            S::SmoothQuadratic { abs, x, y } => (SegmentKind::SmoothQuadTo, abs, vec![x, y]),
            S::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => (
                SegmentKind::ArcTo,
                abs,
                vec![rx, ry, x_axis_rotation, flag(large_arc), flag(sweep), x, y],
            ),
            // Closepath has no relative form worth keeping.
            S::ClosePath { .. } => (SegmentKind::ClosePath, true, Vec::new()),
        };
        Self {
            kind,
            absolute,
            data,
        }
    }
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let absolute = self.absolute || self.kind == SegmentKind::ClosePath;
        write!(f, "{}", self.kind.letter(absolute))?;
        for v in &self.data {
            write!(f, " {}", FmtNumber(*v))?;
        }
        Ok(())
    }
}

/// SVG path data (`d` attribute).
///
/// Bare coordinate groups repeat the previous command, except after a moveto where they are read
/// as linetos of the same absoluteness: `M 0 0 10 10` is a moveto followed by a lineto.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Self, FormatError> {
        svgtypes::PathParser::from(text)
            .map(|seg| seg.map(PathSegment::from).map_err(|_| FormatError::path(text)))
            .collect()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    fn push_abs(&mut self, kind: SegmentKind, data: Vec<f64>) -> &mut Self {
        self.segments.push(PathSegment {
            kind,
            absolute: true,
            data,
        });
        self
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push_abs(SegmentKind::MoveTo, vec![x, y])
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push_abs(SegmentKind::LineTo, vec![x, y])
    }

    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> &mut Self {
        self.push_abs(SegmentKind::CurveTo, vec![x1, y1, x2, y2, x, y])
    }

    #[allow(clippy::too_many_arguments)]
    pub fn arc_to(
        &mut self,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> &mut Self {
        let large = if large_arc { 1.0 } else { 0.0 };
        let sweep = if sweep { 1.0 } else { 0.0 };
        self.push_abs(
            SegmentKind::ArcTo,
            vec![rx, ry, x_axis_rotation, large, sweep, x, y],
        )
    }

    pub fn close(&mut self) -> &mut Self {
        self.push_abs(SegmentKind::ClosePath, Vec::new())
    }
}

impl FromStr for Path {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            seg.fmt(f)?;
        }
        Ok(())
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatErrorKind;

    fn kinds(p: &Path) -> Vec<SegmentKind> {
        p.segments().iter().map(|s| s.kind).collect()
    }

    #[test]
    fn trailing_pair_after_lineto_is_another_lineto() {
        let p = Path::parse("M 5,5 L 1.1 -6, 1,3 z").unwrap();
        assert_eq!(p.len(), 4);
        assert_eq!(
            kinds(&p),
            vec![
                SegmentKind::MoveTo,
                SegmentKind::LineTo,
                SegmentKind::LineTo,
                SegmentKind::ClosePath
            ]
        );
        assert_eq!(p.segments()[2].data, vec![1.0, 3.0]);

        let longer = Path::parse("M 5,5 L 1.1 -6, 1,3 9,10 z").unwrap();
        assert_eq!(longer.len(), 5);
        assert_eq!(longer.segments()[3].data, vec![9.0, 10.0]);
    }

    #[test]
    fn bare_pairs_after_moveto_become_linetos() {
        let p = Path::parse("m1 2 3 4 5 6").unwrap();
        assert_eq!(
            kinds(&p),
            vec![SegmentKind::MoveTo, SegmentKind::LineTo, SegmentKind::LineTo]
        );
        assert!(p.segments().iter().all(|s| !s.absolute));
    }

    #[test]
    fn arc_flags_may_be_packed() {
        let p = Path::parse("M0 0a25,25 -30 0,1 50,-25A1 1 0 1050 60").unwrap();
        assert_eq!(p.segments()[1].data, vec![25.0, 25.0, -30.0, 0.0, 1.0, 50.0, -25.0]);
        assert_eq!(p.segments()[2].data, vec![1.0, 1.0, 0.0, 1.0, 0.0, 50.0, 60.0]);
    }

    #[test]
    fn compact_numbers_split_on_sign_and_dot() {
        let p = Path::parse("M-1-2L.5.5").unwrap();
        assert_eq!(p.segments()[0].data, vec![-1.0, -2.0]);
        assert_eq!(p.segments()[1].data, vec![0.5, 0.5]);
    }

    #[test]
    fn serializes_normalized() {
        let a = Path::parse("M 5,5 L 1.1 -6, 1,3 z").unwrap();
        let b = Path::parse("M5 5L1.10-6.0 1 3Z").unwrap();
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(a.to_string(), "M 5 5 L 1.1 -6 L 1 3 Z");
        assert_eq!(a, b);
        assert_eq!(Path::parse("M 0 0 L 1 1 z").unwrap().to_string(), "M 0 0 L 1 1 Z");
    }

    #[test]
    fn rejects_malformed_data() {
        for bad in ["L 1 2", "M 1", "M 1 2 X 3", "M 0 0 A 1 1 0 2 0 3 3", "10 10"] {
            let err = Path::parse(bad).unwrap_err();
            assert_eq!(err.kind, FormatErrorKind::InvalidPath, "{bad:?}");
        }
        assert!(Path::parse("").unwrap().is_empty());
    }

    #[test]
    fn builder_matches_parser() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .arc_to(5.0, 5.0, 0.0, false, true, 10.0, 10.0)
            .close();
        assert_eq!(p, Path::parse(&p.to_string()).unwrap());
    }
}
