//! End-to-end clustering pipeline.
//!
//! `Scanner` runs the four phases in order: index build, parallel discovery,
//! merge reconciliation, and `min_pts` filtering. Each phase finishes before
//! the next one starts.

use crate::compute::{Cluster, discover, merge_clusters, retain_min_points};
use crate::config::Config;
use crate::error::{Result, ScanError};
use crate::index::SpatialIndex;
use geoscan_types::geo::Point;
use geoscan_types::rect::Rect;
use std::time::{Duration, Instant};

/// Counters and timings from one scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanStats {
    pub input_points: usize,
    pub distinct_points: usize,
    pub jobs: usize,
    pub workers: usize,
    pub raw_clusters: usize,
    pub merged_clusters: usize,
    pub retained_clusters: usize,
    pub build_time: Duration,
    pub discovery_time: Duration,
    pub merge_time: Duration,
}

impl ScanStats {
    pub fn total_time(&self) -> Duration {
        self.build_time + self.discovery_time + self.merge_time
    }

    /// Clusters dropped for falling below `min_pts`.
    pub fn dropped_clusters(&self) -> usize {
        self.merged_clusters - self.retained_clusters
    }
}

/// Clusters kept after filtering, largest first, plus run statistics.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub clusters: Vec<Cluster>,
    pub stats: ScanStats,
}

/// Density-based clusterer over a fixed point set.
///
/// # Example
///
/// ```rust
/// use geoscan::{Point, Rect, Scanner};
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0001, 0.0),
///     Point::new(0.0001, 0.0001),
///     Point::new(10.0, 10.0),
/// ];
/// let scanner = Scanner::builder().epsilon(0.001).min_pts(2).build()?;
/// let outcome = scanner.run(Rect::padded_bounds(&points, 1.0), &points)?;
///
/// assert_eq!(outcome.clusters.len(), 1);
/// assert_eq!(outcome.clusters[0].weight(), 3);
/// # Ok::<(), geoscan::ScanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Scanner {
    config: Config,
}

impl Scanner {
    /// Create a scanner, rejecting invalid configuration.
    pub fn new(config: Config) -> Result<Self> {
        config.validate().map_err(ScanError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn builder() -> crate::builder::ScanBuilder {
        crate::builder::ScanBuilder::new()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Index `points` over `bounds` and cluster them.
    pub fn run(&self, bounds: Rect, points: &[Point]) -> Result<ScanOutcome> {
        let started = Instant::now();
        let index = SpatialIndex::from_points(bounds, points);
        let build_time = started.elapsed();
        log::info!(
            "Indexed {} points ({} distinct) in {:?}",
            index.size(),
            index.distinct_len(),
            build_time
        );

        let mut outcome = self.run_index(&index)?;
        outcome.stats.build_time = build_time;
        Ok(outcome)
    }

    /// Cluster the points of an already built index.
    pub fn run_index(&self, index: &SpatialIndex) -> Result<ScanOutcome> {
        let mut stats = ScanStats {
            input_points: index.size(),
            distinct_points: index.distinct_len(),
            ..ScanStats::default()
        };

        let started = Instant::now();
        let mut raw = Vec::new();
        let discovery = discover(index, &self.config, |cluster| raw.push(cluster))?;
        stats.discovery_time = started.elapsed();
        stats.jobs = discovery.jobs;
        stats.workers = discovery.workers;
        stats.raw_clusters = raw.len();
        log::info!(
            "Found {} unmerged clusters in {} jobs on {} workers ({:?})",
            stats.raw_clusters,
            stats.jobs,
            stats.workers,
            stats.discovery_time
        );

        let started = Instant::now();
        let merged = merge_clusters(raw, self.config.epsilon);
        stats.merged_clusters = merged.len();
        let mut clusters = retain_min_points(merged, self.config.min_pts);
        clusters.sort_by(|a, b| b.weight().cmp(&a.weight()));
        stats.merge_time = started.elapsed();
        stats.retained_clusters = clusters.len();
        log::info!(
            "Merged into {} clusters, kept {} with at least {} points ({:?})",
            stats.merged_clusters,
            stats.retained_clusters,
            self.config.min_pts,
            stats.merge_time
        );

        Ok(ScanOutcome { clusters, stats })
    }
}
