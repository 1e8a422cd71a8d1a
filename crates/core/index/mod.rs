//! Binary space-partitioning index over 2D points.
//!
//! Leaves hold at most one distinct coordinate together with a multiplicity
//! count, so exact duplicates never grow the tree. Points descend towards the
//! child whose region centroid is nearer, which balances the tree by data
//! density instead of by static geometry.
//!
//! The index is built once, single-threaded, and is read-only afterwards;
//! `&SpatialIndex` can be shared freely across worker threads.
//!
//! ```rust
//! use geoscan::index::SpatialIndex;
//! use geoscan::{Point, Rect};
//!
//! let points = [Point::new(5.0, 5.0), Point::new(5.0, 5.0), Point::new(6.0, 6.0)];
//! let index = SpatialIndex::from_points(Rect::new(0.0, 0.0, 10.0, 10.0), &points);
//!
//! assert_eq!(index.size(), 3);
//! assert_eq!(index.distinct_len(), 2);
//! ```

pub mod node;
pub mod query;

pub use node::{Extent, IndexedPoint, MAX_DEPTH, Node, PointKey};
pub use query::Query;

use geoscan_types::geo::Point;
use geoscan_types::rect::Rect;

/// BSP tree of points with duplicate aggregation.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    root: Node,
    distinct: usize,
}

impl SpatialIndex {
    /// Empty index over `rect`, typically the padded bounds of the input.
    pub fn new(rect: Rect) -> Self {
        Self {
            root: Node::new(rect),
            distinct: 0,
        }
    }

    /// Build an index by inserting every point in order.
    pub fn from_points(rect: Rect, points: &[Point]) -> Self {
        let mut index = Self::new(rect);
        for point in points {
            index.insert(*point);
        }
        log::debug!(
            "Built BSP index: {} points, {} distinct coordinates, depth {}",
            index.size(),
            index.distinct_len(),
            index.depth()
        );
        index
    }

    pub fn insert(&mut self, point: Point) {
        if self.root.insert(point, 0) {
            self.distinct += 1;
        }
    }

    /// Stored points inside `rect` (closed interval), in no particular order.
    pub fn query(&self, rect: Rect) -> Query<'_> {
        self.root.query(rect)
    }

    /// Every stored point exactly once.
    pub fn iter(&self) -> Query<'_> {
        self.root.iter()
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Region the index was created over.
    pub fn bounds(&self) -> &Rect {
        self.root.rect()
    }

    /// Number of inserted points, counting duplicates.
    pub fn size(&self) -> usize {
        self.root.size()
    }

    /// Number of distinct stored coordinates.
    pub fn distinct_len(&self) -> usize {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        self.root.size() == 0
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Some((left, right)) = node.children() {
                stack.push((left, depth + 1));
                stack.push((right, depth + 1));
            }
        }
        deepest
    }
}
