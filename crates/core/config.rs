//! Clustering parameters.
//!
//! `Config` is plain data handed to the scanner. It can be built in code with
//! the `with_*` setters or loaded from JSON (and TOML with the `toml` feature).
use serde::de::Error;
use std::num::NonZeroUsize;

/// DBSCAN and worker-pool settings.
///
/// # Example
///
/// ```rust
/// use geoscan::Config;
///
/// let config = Config::from_json(r#"{ "epsilon": 0.001, "min_pts": 2 }"#).unwrap();
/// assert_eq!(config.min_pts, 2);
/// assert_eq!(config.max_job_size, 1_000);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Neighborhood radius, in coordinate units
    #[serde(default = "Config::default_epsilon")]
    pub epsilon: f64,

    /// Minimum aggregate point count for a cluster to be kept
    #[serde(default = "Config::default_min_pts")]
    pub min_pts: usize,

    /// Subtrees larger than this are split into several jobs when possible
    #[serde(default = "Config::default_max_job_size")]
    pub max_job_size: usize,

    /// Number of worker threads (None means available hardware parallelism)
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Config {
    const fn default_epsilon() -> f64 {
        0.0003
    }

    const fn default_min_pts() -> usize {
        5
    }

    const fn default_max_job_size() -> usize {
        1_000
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    pub fn with_max_job_size(mut self, max_job_size: usize) -> Self {
        assert!(max_job_size > 0, "Max job size must be greater than zero");
        self.max_job_size = max_job_size;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        assert!(workers > 0, "Worker count must be greater than zero");
        self.workers = Some(workers);
        self
    }

    /// Resolved worker count, falling back to the hardware parallelism.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.epsilon.is_finite() {
            return Err("Epsilon must be finite (not NaN or infinity)".to_string());
        }
        if self.epsilon < 0.0 {
            return Err("Epsilon must not be negative".to_string());
        }
        if self.max_job_size == 0 {
            return Err("Max job size must be greater than zero".to_string());
        }
        if self.workers == Some(0) {
            return Err("Worker count must be greater than zero".to_string());
        }

        if let Some(workers) = self.workers
            && workers > 1_024
        {
            log::warn!(
                "Worker count of {} is far above typical core counts; threads will mostly wait",
                workers
            );
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epsilon: Self::default_epsilon(),
            min_pts: Self::default_min_pts(),
            max_job_size: Self::default_max_job_size(),
            workers: None,
        }
    }
}
