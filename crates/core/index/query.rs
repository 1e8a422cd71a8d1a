use crate::index::node::{IndexedPoint, Node, NodeKind};
use geoscan_types::rect::Rect;

/// Lazy range query over a subtree.
///
/// Each call to [`Node::query`] starts a fresh single-pass traversal.
/// Subtrees are skipped only when their stored-point `extent` misses the
/// query rectangle; node regions are never used for pruning because
/// centroid routing can store points outside them.
#[derive(Debug)]
pub struct Query<'a> {
    rect: Option<Rect>,
    stack: Vec<&'a Node>,
    leaf: std::slice::Iter<'a, IndexedPoint>,
}

impl<'a> Query<'a> {
    pub(crate) fn new(root: &'a Node, rect: Option<Rect>) -> Self {
        let mut query = Self {
            rect,
            stack: Vec::new(),
            leaf: [].iter(),
        };
        query.push(root);
        query
    }

    fn push(&mut self, node: &'a Node) {
        let reachable = match (node.extent(), &self.rect) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(extent), Some(rect)) => extent.intersects(rect),
        };
        if reachable {
            self.stack.push(node);
        }
    }
}

impl Iterator for Query<'_> {
    type Item = IndexedPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let rect = self.rect;
        loop {
            if let Some(found) = self
                .leaf
                .by_ref()
                .find(|p| rect.is_none_or(|r| r.contains_point(p.point())))
            {
                return Some(*found);
            }

            let node = self.stack.pop()?;
            match &node.kind {
                NodeKind::Split { left, right } => {
                    self.push(right);
                    self.push(left);
                }
                NodeKind::Leaf(points) => self.leaf = points.iter(),
            }
        }
    }
}
