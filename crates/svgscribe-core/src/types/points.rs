use super::number::{FmtNumber, parse_numbers};
use crate::error::FormatError;
use crate::geom::{Point, point};
use std::str::FromStr;

/// The `points` attribute of `<polyline>` and `<polygon>`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointList(pub Vec<Point>);

impl PointList {
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let nums = parse_numbers(text)?;
        if nums.len() % 2 != 0 {
            return Err(FormatError::number_list(text));
        }
        Ok(PointList(
            nums.chunks_exact(2).map(|c| point(c[0], c[1])).collect(),
        ))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for PointList {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for PointList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{},{}", FmtNumber(p.x), FmtNumber(p.y))?;
        }
        Ok(())
    }
}

impl From<Vec<Point>> for PointList {
    fn from(v: Vec<Point>) -> Self {
        PointList(v)
    }
}

impl FromIterator<Point> for PointList {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        PointList(iter.into_iter().collect())
    }
}
