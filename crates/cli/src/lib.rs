//! Geoscan command-line support
//!
//! CSV ingestion, CSV output, and configuration loading for the `geoscan`
//! binary.
//!
//! # Example
//!
//! ```ignore
//! use geoscan_cli::{input, output};
//!
//! let dataset = input::read_points("data.csv", input::Columns::default())?;
//! let outcome = scanner.run(dataset.bounds, &dataset.points)?;
//! output::write_clusters_file("clusters.csv", &outcome.clusters)?;
//! ```

pub mod input;
pub mod output;

use anyhow::{Context, Result};
use geoscan::Config;
use std::path::Path;

/// Parameter overrides given on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub epsilon: Option<f64>,
    pub min_pts: Option<usize>,
    pub max_job_size: Option<usize>,
    pub workers: Option<usize>,
}

impl Overrides {
    /// Apply every set override on top of `config`. Validation is left to the scanner.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if let Some(min_pts) = self.min_pts {
            config.min_pts = min_pts;
        }
        if let Some(max_job_size) = self.max_job_size {
            config.max_job_size = max_job_size;
        }
        if let Some(workers) = self.workers {
            config.workers = Some(workers);
        }
        config
    }
}

/// Load a configuration file, TOML when the extension is `.toml` and JSON otherwise.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let config = if is_toml {
        Config::from_toml(&text).map_err(geoscan::ScanError::from)
    } else {
        Config::from_json(&text).map_err(geoscan::ScanError::from)
    };
    config.with_context(|| format!("Invalid config {}", path.display()))
}
