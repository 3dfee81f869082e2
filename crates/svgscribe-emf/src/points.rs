use std::cell::OnceCell;
use svgscribe_core::geom::{Point, point};

/// A cluster of near-identical device coordinates.
///
/// GDI rounds every vertex to integers, so one logical corner of a cap outline is often recorded
/// as several points a pixel apart. Members are collected during the parse and the cluster is
/// drawn at their centroid.
#[derive(Debug, Clone)]
pub struct VisualPoint {
    members: Vec<Point>,
    centroid: OnceCell<Point>,
}

impl VisualPoint {
    fn new(p: Point) -> Self {
        Self {
            members: vec![p],
            centroid: OnceCell::new(),
        }
    }

    /// First point seen for this cluster; new points are matched against it.
    pub fn anchor(&self) -> Point {
        self.members[0]
    }

    pub fn members(&self) -> &[Point] {
        &self.members
    }

    /// Mean of all members. Computed on first call, so call it only once the parse is done.
    pub fn position(&self) -> Point {
        *self.centroid.get_or_init(|| {
            let n = self.members.len() as f64;
            let (sx, sy) = self
                .members
                .iter()
                .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
            point(sx / n, sy / n)
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct VisualPoints {
    epsilon: f64,
    clusters: Vec<VisualPoint>,
}

impl VisualPoints {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            clusters: Vec::new(),
        }
    }

    /// Returns the index of the cluster `p` joins, creating one when none is within epsilon.
    pub fn intern(&mut self, p: Point) -> usize {
        let eps = self.epsilon;
        if let Some(i) = self
            .clusters
            .iter()
            .position(|c| (c.anchor() - p).length() <= eps)
        {
            let cluster = &mut self.clusters[i];
            cluster.members.push(p);
            cluster.centroid = OnceCell::new();
            return i;
        }
        self.clusters.push(VisualPoint::new(p));
        self.clusters.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&VisualPoint> {
        self.clusters.get(index)
    }

    pub fn anchor(&self, index: usize) -> Option<Point> {
        self.get(index).map(VisualPoint::anchor)
    }

    pub fn resolve(&self, indices: &[usize]) -> Vec<Point> {
        indices
            .iter()
            .filter_map(|i| self.get(*i).map(VisualPoint::position))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
