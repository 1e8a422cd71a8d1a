use crate::index::IndexedPoint;
use geoscan_types::geo::Point;
use geoscan_types::rect::Rect;

/// A group of density-connected points and their bounding rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    rect: Rect,
    points: Vec<IndexedPoint>,
}

impl Cluster {
    /// Build a cluster whose rect is the min/max extent of `points`.
    ///
    /// Returns `None` for an empty member list.
    pub fn from_points(points: Vec<IndexedPoint>) -> Option<Self> {
        let rect = Rect::bounding(points.iter().map(IndexedPoint::point))?;
        Some(Self { rect, points })
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn points(&self) -> &[IndexedPoint] {
        &self.points
    }

    /// Number of distinct member coordinates.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Aggregate member count, summing multiplicities.
    pub fn weight(&self) -> usize {
        self.points.iter().map(IndexedPoint::cnt).sum()
    }

    /// Mean member coordinate, weighted by multiplicity.
    pub fn centroid(&self) -> Point {
        let weight = self.weight() as f64;
        let (sx, sy) = self.points.iter().fold((0.0, 0.0), |(sx, sy), p| {
            let cnt = p.cnt() as f64;
            (sx + p.x() * cnt, sy + p.y() * cnt)
        });
        Point::new(sx / weight, sy / weight)
    }

    /// True when some member of `self` is within `epsilon` of some member of `other`.
    pub fn touches(&self, other: &Cluster, epsilon: f64) -> bool {
        self.points
            .iter()
            .any(|p| other.points.iter().any(|q| p.distance(q) <= epsilon))
    }

    /// Take over `other`'s members and grow the bounds to cover them.
    pub fn absorb(&mut self, other: Cluster) {
        self.rect = self.rect.merge(&other.rect);
        self.points.extend(other.points);
    }
}
