//! Scanner builder for flexible configuration
//!
//! Starts from `Config::default()` and lets callers override individual
//! clustering parameters before validation.

use crate::config::Config;
use crate::error::Result;
use crate::scanner::Scanner;

/// Builder for a [`Scanner`].
#[derive(Debug, Clone, Default)]
pub struct ScanBuilder {
    config: Config,
}

impl ScanBuilder {
    /// Create a new builder with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Neighborhood radius.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.config.epsilon = epsilon;
        self
    }

    /// Minimum aggregate point count for a cluster to be kept.
    pub fn min_pts(mut self, min_pts: usize) -> Self {
        self.config.min_pts = min_pts;
        self
    }

    /// Job-splitting threshold.
    pub fn max_job_size(mut self, max_job_size: usize) -> Self {
        self.config.max_job_size = max_job_size;
        self
    }

    /// Number of worker threads.
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = Some(workers);
        self
    }

    /// Validate the configuration and build the scanner.
    pub fn build(self) -> Result<Scanner> {
        Scanner::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;

    #[test]
    fn test_builder_default() {
        let scanner = ScanBuilder::new().build().unwrap();
        assert_eq!(scanner.config(), &Config::default());
    }

    #[test]
    fn test_builder_overrides() {
        let scanner = ScanBuilder::new()
            .epsilon(0.01)
            .min_pts(3)
            .max_job_size(50)
            .workers(2)
            .build()
            .unwrap();
        assert_eq!(scanner.config().epsilon, 0.01);
        assert_eq!(scanner.config().min_pts, 3);
        assert_eq!(scanner.config().max_job_size, 50);
        assert_eq!(scanner.config().worker_count(), 2);
    }

    #[test]
    fn test_builder_validates() {
        let err = ScanBuilder::new().workers(0).build().unwrap_err();
        assert!(matches!(err, ScanError::InvalidConfig(_)));
        assert!(ScanBuilder::new().max_job_size(0).build().is_err());
    }
}
