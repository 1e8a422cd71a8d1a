//! Cluster discovery and reconciliation.
//!
//! This module holds the clustering algorithms that run over a built index:
//! - Parallel per-job DBSCAN expansion (`discovery`)
//! - Cross-job cluster merging and size filtering (`merge`)

pub mod cluster;
pub mod discovery;
pub mod merge;

pub use cluster::Cluster;
pub use discovery::{
    DiscoveryStats, discover, discover_clusters, expand_job, partition_jobs,
};
pub use merge::{merge_clusters, retain_min_points};
