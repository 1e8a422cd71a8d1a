//! Parallel density-based clustering (DBSCAN) of large 2D point sets.
//!
//! ## Pipeline
//! - **Index**: a BSP tree with duplicate-coordinate aggregation, built once
//! - **Discovery**: the tree is cut into independent jobs; a worker pool
//!   expands DBSCAN clusters inside each job concurrently
//! - **Merge**: clusters split by job boundaries are joined back together
//! - **Filter**: clusters with fewer than `min_pts` points are dropped
//!
//! ```rust
//! use geoscan::{Config, Point, Rect, Scanner};
//!
//! let points = vec![Point::new(5.0, 5.0), Point::new(5.0, 5.0), Point::new(5.0002, 5.0)];
//! let config = Config::default().with_min_pts(3);
//!
//! let outcome = Scanner::new(config)?.run(Rect::padded_bounds(&points, 1.0), &points)?;
//! assert_eq!(outcome.clusters.len(), 1);
//! assert_eq!(outcome.clusters[0].len(), 2);
//! # Ok::<(), geoscan::ScanError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod index;
pub mod scanner;

pub use builder::ScanBuilder;
pub use config::Config;
pub use error::{Result, ScanError};
pub use scanner::{ScanOutcome, ScanStats, Scanner};

pub use compute::{Cluster, DiscoveryStats};
pub use index::{IndexedPoint, SpatialIndex};

pub use geoscan_types::geo::Point;
pub use geoscan_types::rect::Rect;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::compute::{merge_clusters, retain_min_points};
    pub use crate::{Cluster, IndexedPoint, SpatialIndex};
    pub use crate::{Config, Result, ScanBuilder, ScanError, Scanner};
    pub use crate::{Point, Rect};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_covers_pipeline() {
        let points = vec![Point::new(1.0, 1.0); 3];
        let scanner: Scanner = ScanBuilder::new().min_pts(3).workers(1).build().unwrap();
        let outcome = scanner
            .run(Rect::padded_bounds(&points, 1.0), &points)
            .unwrap();
        let clusters: Vec<Cluster> = retain_min_points(merge_clusters(outcome.clusters, 0.1), 3);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].weight(), 3);
    }
}
