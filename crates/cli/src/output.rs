//! CSV output of clustering results.
//!
//! Both files number clusters from 0 in descending weight order, so the ids in
//! `clusters.csv` and `points.csv` line up.

use anyhow::{Context, Result};
use geoscan::Cluster;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const CLUSTERS_HEADER: &str = "ClusterId,Latitude,Longitude,Size";
pub const POINTS_HEADER: &str = "ClusterId,Latitude,Longitude,Count";

/// Clusters ordered by descending weight. Ties keep their input order.
pub fn ranked(clusters: &[Cluster]) -> Vec<&Cluster> {
    let mut ranked: Vec<&Cluster> = clusters.iter().collect();
    ranked.sort_by(|a, b| b.weight().cmp(&a.weight()));
    ranked
}

/// One summary row per cluster: weighted centroid and total weight.
pub fn write_clusters<W: Write>(out: W, clusters: &[Cluster]) -> Result<()> {
    let mut out = BufWriter::new(out);
    writeln!(out, "{CLUSTERS_HEADER}")?;
    for (id, cluster) in ranked(clusters).into_iter().enumerate() {
        let centroid = cluster.centroid();
        writeln!(
            out,
            "{},{:.6},{:.6},{}",
            id,
            centroid.lat(),
            centroid.lon(),
            cluster.weight()
        )?;
    }
    out.flush()?;
    Ok(())
}

/// One row per distinct member coordinate with its multiplicity.
pub fn write_points<W: Write>(out: W, clusters: &[Cluster]) -> Result<()> {
    let mut out = BufWriter::new(out);
    writeln!(out, "{POINTS_HEADER}")?;
    for (id, cluster) in ranked(clusters).into_iter().enumerate() {
        for point in cluster.points() {
            writeln!(
                out,
                "{},{:.6},{:.6},{}",
                id,
                point.point().lat(),
                point.point().lon(),
                point.cnt()
            )?;
        }
    }
    out.flush()?;
    Ok(())
}

pub fn write_clusters_file(path: impl AsRef<Path>, clusters: &[Cluster]) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_clusters(file, clusters).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn write_points_file(path: impl AsRef<Path>, clusters: &[Cluster]) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_points(file, clusters).with_context(|| format!("Failed to write {}", path.display()))
}
