//! Reconciliation of clusters split across job boundaries.
//!
//! Two clusters are joined when one of them, padded by `epsilon`, overlaps
//! the other's bounding rect and some pair of their points lies within
//! `epsilon`. Joining repeats until no pair of clusters qualifies, so the
//! result is the set of connected components of that relation.
//!
//! Candidate neighbors come from an R*-tree over cluster bounding boxes
//! instead of a scan over every other cluster; the merge outcome is the same.

use crate::compute::cluster::Cluster;
use geoscan_types::rect::Rect;
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, RTree};

type ClusterEntry = GeomWithData<Rectangle<[f64; 2]>, usize>;

fn entry(id: usize, rect: &Rect) -> ClusterEntry {
    GeomWithData::new(
        Rectangle::from_corners([rect.min_x(), rect.min_y()], [rect.max_x(), rect.max_y()]),
        id,
    )
}

fn envelope(rect: &Rect) -> AABB<[f64; 2]> {
    AABB::from_corners([rect.min_x(), rect.min_y()], [rect.max_x(), rect.max_y()])
}

/// Join clusters that are density-connected across their boundaries.
///
/// Clusters are visited in input order; each one keeps absorbing touching
/// neighbors (lowest position first) until none is left, then the scan moves
/// on. The output keeps the surviving clusters in their original order.
pub fn merge_clusters(clusters: Vec<Cluster>, epsilon: f64) -> Vec<Cluster> {
    let before = clusters.len();
    let mut tree = RTree::bulk_load(
        clusters
            .iter()
            .enumerate()
            .map(|(id, c)| entry(id, c.rect()))
            .collect(),
    );
    let mut slots: Vec<Option<Cluster>> = clusters.into_iter().map(Some).collect();

    for id in 0..slots.len() {
        loop {
            let Some(current) = slots[id].as_ref() else {
                break;
            };

            let search = envelope(&current.rect().reach(epsilon));
            let mut candidates: Vec<usize> = tree
                .locate_in_envelope_intersecting(&search)
                .map(|e| e.data)
                .filter(|&other| other != id)
                .collect();
            candidates.sort_unstable();

            let neighbor = candidates.into_iter().find(|&other| {
                slots[other]
                    .as_ref()
                    .is_some_and(|c| current.touches(c, epsilon))
            });
            let Some(other) = neighbor else {
                break;
            };

            let Some(absorbed) = slots[other].take() else {
                break;
            };
            tree.remove(&entry(other, absorbed.rect()));
            if let Some(current) = slots[id].as_mut() {
                tree.remove(&entry(id, current.rect()));
                current.absorb(absorbed);
                tree.insert(entry(id, current.rect()));
            }
        }
    }

    let merged: Vec<Cluster> = slots.into_iter().flatten().collect();
    log::debug!(
        "Merged {} clusters into {} ({} joins)",
        before,
        merged.len(),
        before - merged.len()
    );
    merged
}

/// Drop clusters whose aggregate point count is below `min_pts`.
pub fn retain_min_points(mut clusters: Vec<Cluster>, min_pts: usize) -> Vec<Cluster> {
    clusters.retain(|c| c.weight() >= min_pts);
    clusters
}
