//! Parallel cluster discovery over a built spatial index.
//!
//! A producer thread walks the index breadth-first and cuts it into disjoint
//! subtrees ("jobs") of at most `max_job_size` points where the tree allows
//! it. A fixed pool of workers pulls jobs from a bounded channel and runs a
//! DBSCAN core expansion restricted to each job, pushing the resulting
//! clusters into a second bounded channel drained by the caller.
//!
//! Clusters that straddle job boundaries come out split; the merge
//! reconciler joins them afterwards.

use crate::compute::cluster::Cluster;
use crate::config::Config;
use crate::error::{Result, ScanError};
use crate::index::{IndexedPoint, Node, PointKey, SpatialIndex};
use crossbeam_channel::{Receiver, Sender, bounded};
use geoscan_types::rect::Rect;
use rustc_hash::FxHashSet;
use std::any::Any;
use std::collections::VecDeque;
use std::thread;

/// Counters from one discovery run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoveryStats {
    pub jobs: usize,
    pub clusters: usize,
    pub workers: usize,
}

/// Split the tree under `root` into jobs, in breadth-first order.
///
/// Every stored point belongs to exactly one job. A job exceeds
/// `max_job_size` only when it is a leaf that cannot be split further.
pub fn partition_jobs(root: &Node, max_job_size: usize) -> Vec<&Node> {
    let mut jobs = Vec::new();
    for_each_job(root, max_job_size, |job| {
        jobs.push(job);
        true
    });
    jobs
}

/// Walk the tree breadth-first, handing each job to `emit` until it returns false.
fn for_each_job<'a>(root: &'a Node, max_job_size: usize, mut emit: impl FnMut(&'a Node) -> bool) {
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        if node.size() > max_job_size
            && let Some((left, right)) = node.children()
        {
            queue.push_back(left);
            queue.push_back(right);
            continue;
        }
        if node.size() > 0 && !emit(node) {
            return;
        }
    }
}

/// DBSCAN core expansion over a single job subtree.
///
/// Neighborhoods are found with a square pre-filter of half-width `epsilon`
/// (widened by a few ULPs, see [`Rect::reach`]) and confirmed with an
/// inclusive Euclidean check. The visited set is local
/// to this call. No minimum-size filtering happens here.
pub fn expand_job(job: &Node, epsilon: f64) -> Vec<Cluster> {
    let mut visited: FxHashSet<PointKey> = FxHashSet::default();
    let mut pending: VecDeque<IndexedPoint> = VecDeque::new();
    let mut clusters = Vec::new();

    for seed in job.iter() {
        if !visited.insert(seed.key()) {
            continue;
        }
        pending.push_back(seed);

        let mut members = Vec::new();
        while let Some(current) = pending.pop_front() {
            for neighbor in job.query(Rect::around(current.point(), 0.0).reach(epsilon)) {
                if neighbor.distance(&current) <= epsilon && visited.insert(neighbor.key()) {
                    pending.push_back(neighbor);
                }
            }
            members.push(current);
        }

        clusters.extend(Cluster::from_points(members));
    }

    clusters
}

/// Run discovery on the worker pool, handing every unmerged cluster to `sink`
/// on the calling thread as soon as it arrives.
///
/// Returns once the producer and all workers have finished and the cluster
/// stream is drained. Cluster order is unspecified.
pub fn discover<F>(index: &SpatialIndex, config: &Config, mut sink: F) -> Result<DiscoveryStats>
where
    F: FnMut(Cluster),
{
    let epsilon = config.epsilon;
    let max_job_size = config.max_job_size.max(1);
    let workers = config.worker_count().max(1);

    thread::scope(|scope| -> Result<DiscoveryStats> {
        let (job_tx, job_rx) = bounded::<&Node>(max_job_size);
        let (cluster_tx, cluster_rx) = bounded::<Cluster>(max_job_size);

        let producer = thread::Builder::new()
            .name("geoscan-jobs".to_string())
            .spawn_scoped(scope, move || {
                let mut jobs = 0;
                for_each_job(index.root(), max_job_size, |job| {
                    jobs += 1;
                    job_tx.send(job).is_ok()
                });
                jobs
            })?;

        let mut handles = Vec::with_capacity(workers);
        for id in 0..workers {
            let jobs = job_rx.clone();
            let out = cluster_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("geoscan-worker-{id}"))
                .spawn_scoped(scope, move || run_worker(jobs, out, epsilon))?;
            handles.push(handle);
        }
        drop(job_rx);
        drop(cluster_tx);

        let mut clusters = 0;
        for cluster in cluster_rx.iter() {
            clusters += 1;
            sink(cluster);
        }

        let produced = producer.join();
        let finished: Vec<_> = handles.into_iter().map(|h| h.join()).collect();
        let jobs = produced.map_err(panic_error)?;
        for worker in finished {
            worker.map_err(panic_error)?;
        }

        log::debug!(
            "Discovery finished: {} jobs, {} unmerged clusters, {} workers",
            jobs,
            clusters,
            workers
        );

        Ok(DiscoveryStats {
            jobs,
            clusters,
            workers,
        })
    })
}

/// Run discovery and collect the unmerged clusters.
pub fn discover_clusters(index: &SpatialIndex, config: &Config) -> Result<Vec<Cluster>> {
    let mut clusters = Vec::new();
    discover(index, config, |cluster| clusters.push(cluster))?;
    Ok(clusters)
}

fn run_worker(jobs: Receiver<&Node>, out: Sender<Cluster>, epsilon: f64) -> usize {
    let mut processed = 0;
    for job in jobs.iter() {
        processed += 1;
        for cluster in expand_job(job, epsilon) {
            if out.send(cluster).is_err() {
                return processed;
            }
        }
    }
    log::trace!(
        "{} processed {} jobs",
        thread::current().name().unwrap_or("worker"),
        processed
    );
    processed
}

fn panic_error(payload: Box<dyn Any + Send>) -> ScanError {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    ScanError::WorkerPanicked(message)
}
