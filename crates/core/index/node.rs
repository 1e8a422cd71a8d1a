//! BSP tree nodes and centroid-routed insertion.

use crate::index::query::Query;
use geoscan_types::geo::Point;
use geoscan_types::rect::Rect;
use smallvec::SmallVec;

/// Subdivision stops at this depth; deeper leaves keep extra coordinates
/// side by side. Only reachable for coordinates closer than the split
/// resolution of `f64`, for zero-area regions, or for points lying outside
/// the index bounds on the same side.
pub const MAX_DEPTH: usize = 256;

/// A stored coordinate and the number of input points that mapped onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedPoint {
    point: Point,
    cnt: usize,
}

impl IndexedPoint {
    pub fn new(point: Point) -> Self {
        Self { point, cnt: 1 }
    }

    /// A coordinate standing for `cnt` coincident input points.
    ///
    /// # Panics
    ///
    /// Panics if `cnt` is zero.
    pub fn with_count(point: Point, cnt: usize) -> Self {
        assert!(cnt > 0, "Multiplicity must be at least one");
        Self { point, cnt }
    }

    pub fn point(&self) -> &Point {
        &self.point
    }

    pub fn x(&self) -> f64 {
        self.point.x()
    }

    pub fn y(&self) -> f64 {
        self.point.y()
    }

    /// Number of input points collapsed onto this coordinate.
    pub fn cnt(&self) -> usize {
        self.cnt
    }

    pub fn distance(&self, other: &IndexedPoint) -> f64 {
        self.point.distance(&other.point)
    }

    /// Hashable identity (coordinate bits plus multiplicity).
    pub fn key(&self) -> PointKey {
        PointKey {
            x: self.point.x().to_bits(),
            y: self.point.y().to_bits(),
            cnt: self.cnt,
        }
    }
}

/// Identity of a stored point, usable in hash sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey {
    x: u64,
    y: u64,
    cnt: usize,
}

/// Tight bounds of the coordinates stored under a node, kept as exact corners.
///
/// The corners are the stored coordinates themselves, never the result of
/// arithmetic, so every stored point satisfies `min <= p <= max` exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Extent {
    pub fn of(point: &Point) -> Self {
        Self {
            min_x: point.x(),
            min_y: point.y(),
            max_x: point.x(),
            max_y: point.y(),
        }
    }

    pub fn include(&mut self, point: &Point) {
        self.min_x = self.min_x.min(point.x());
        self.min_y = self.min_y.min(point.y());
        self.max_x = self.max_x.max(point.x());
        self.max_y = self.max_y.max(point.y());
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn contains_point(&self, point: &Point) -> bool {
        self.min_x <= point.x()
            && point.x() <= self.max_x
            && self.min_y <= point.y()
            && point.y() <= self.max_y
    }

    /// Whether some point inside the extent could pass `rect.contains_point`.
    ///
    /// Compares against the same edges `Rect::contains_point` uses, so a
    /// subtree is only ruled out when none of its points can match.
    pub fn intersects(&self, rect: &Rect) -> bool {
        self.min_x <= rect.max_x()
            && self.max_x >= rect.min_x()
            && self.min_y <= rect.max_y()
            && self.max_y >= rect.min_y()
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Leaf(SmallVec<[IndexedPoint; 1]>),
    Split { left: Box<Node>, right: Box<Node> },
}

/// A node of the spatial index.
///
/// `rect` is the region assigned when the node was created. Points are
/// routed to the child with the nearer region centroid, so `rect` does not
/// necessarily contain every point stored below the node; `extent` does.
#[derive(Debug, Clone)]
pub struct Node {
    rect: Rect,
    size: usize,
    extent: Option<Extent>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn new(rect: Rect) -> Self {
        Self {
            rect,
            size: 0,
            extent: None,
            kind: NodeKind::Leaf(SmallVec::new()),
        }
    }

    /// Region assigned to this node at construction.
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Number of points in this subtree, counting multiplicities.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Tight bounds of the coordinates stored in this subtree.
    pub fn extent(&self) -> Option<&Extent> {
        self.extent.as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn children(&self) -> Option<(&Node, &Node)> {
        match &self.kind {
            NodeKind::Split { left, right } => Some((left, right)),
            NodeKind::Leaf(_) => None,
        }
    }

    /// Points held directly by this node; empty for internal nodes.
    pub fn points(&self) -> &[IndexedPoint] {
        match &self.kind {
            NodeKind::Leaf(points) => points,
            NodeKind::Split { .. } => &[],
        }
    }

    /// Every stored point in this subtree inside `rect` (closed interval).
    pub fn query(&self, rect: Rect) -> Query<'_> {
        Query::new(self, Some(rect))
    }

    /// Every stored point in this subtree, each exactly once.
    pub fn iter(&self) -> Query<'_> {
        Query::new(self, None)
    }

    /// Insert `point`, returning true when it is a new distinct coordinate.
    pub(crate) fn insert(&mut self, point: Point, depth: usize) -> bool {
        self.size += 1;
        self.extend_extent(&point);

        match &mut self.kind {
            NodeKind::Split { left, right } => {
                if routes_left(left, right, &point) {
                    left.insert(point, depth + 1)
                } else {
                    right.insert(point, depth + 1)
                }
            }
            NodeKind::Leaf(points) => {
                if let Some(existing) = points.iter_mut().find(|p| p.point.coincides(&point)) {
                    existing.cnt += 1;
                    return false;
                }
                if points.is_empty() || depth >= MAX_DEPTH {
                    if !points.is_empty() {
                        log::warn!(
                            "BSP leaf at depth {} cannot split further; storing ({}, {}) alongside {} point(s)",
                            depth,
                            point.x(),
                            point.y(),
                            points.len()
                        );
                    }
                    points.push(IndexedPoint::new(point));
                    return true;
                }
                let existing = std::mem::take(points);
                self.subdivide(existing, point, depth);
                true
            }
        }
    }

    /// Split this leaf in two, relocating its stored points and inserting `point`.
    fn subdivide(&mut self, existing: SmallVec<[IndexedPoint; 1]>, point: Point, depth: usize) {
        let (left_rect, right_rect) = split(&self.rect);
        let mut left = Box::new(Node::new(left_rect));
        let mut right = Box::new(Node::new(right_rect));

        for stored in existing {
            if routes_left(&left, &right, &stored.point) {
                left.place(stored);
            } else {
                right.place(stored);
            }
        }

        if routes_left(&left, &right, &point) {
            left.insert(point, depth + 1);
        } else {
            right.insert(point, depth + 1);
        }

        self.kind = NodeKind::Split { left, right };
    }

    /// Move an already-counted point into this (fresh) leaf.
    fn place(&mut self, stored: IndexedPoint) {
        self.size += stored.cnt;
        self.extend_extent(&stored.point);
        if let NodeKind::Leaf(points) = &mut self.kind {
            points.push(stored);
        }
    }

    fn extend_extent(&mut self, point: &Point) {
        self.extent
            .get_or_insert_with(|| Extent::of(point))
            .include(point);
    }
}

/// Ties go to the left child.
fn routes_left(left: &Node, right: &Node, point: &Point) -> bool {
    point.distance(&left.rect.centroid()) <= point.distance(&right.rect.centroid())
}

/// Halve a region: side by side when it is at least as wide as tall,
/// stacked otherwise.
fn split(rect: &Rect) -> (Rect, Rect) {
    if rect.w / rect.h >= 1.0 {
        let half = rect.w / 2.0;
        (
            Rect::new(rect.x, rect.y, half, rect.h),
            Rect::new(rect.x + half, rect.y, half, rect.h),
        )
    } else {
        let half = rect.h / 2.0;
        (
            Rect::new(rect.x, rect.y, rect.w, half),
            Rect::new(rect.x, rect.y + half, rect.w, half),
        )
    }
}
