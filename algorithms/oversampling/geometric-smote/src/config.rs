#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{Result, SmoteError};
use crate::mode::SamplingMode;

/// Hyper-parameters of the Geometric SMOTE oversampler.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", default)
)]
pub struct GeometricSmoteConfig {
    /// Partition(s) the neighborhood radii are measured against.
    pub mode: SamplingMode,
    /// Same-class neighbors per point in `minority` and `regular` mode.
    pub k_neighbors: usize,
    /// Seed of the generator; `None` draws a fresh one on every resample.
    pub seed: Option<u64>,
    /// Run the draws of each batch on the rayon thread pool.
    pub parallel: bool,
}

impl Default for GeometricSmoteConfig {
    fn default() -> Self {
        Self {
            mode: SamplingMode::Regular,
            k_neighbors: 5,
            seed: None,
            parallel: false,
        }
    }
}

impl GeometricSmoteConfig {
    pub fn new(mode: SamplingMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Parses the mode by name (`minority`, `majority` or `regular`).
    pub fn from_mode_name(name: &str) -> Result<Self> {
        Ok(Self::new(name.parse()?))
    }

    pub fn with_mode(mut self, mode: SamplingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_k_neighbors(mut self, k: usize) -> Self {
        self.k_neighbors = k;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks the configuration before any data is touched.
    pub fn validate(&self) -> Result<()> {
        if self.k_neighbors == 0 {
            return Err(SmoteError::InvalidNeighbors);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeometricSmoteConfig::default();
        assert_eq!(config.mode, SamplingMode::Regular);
        assert_eq!(config.k_neighbors, 5);
        assert_eq!(config.seed, None);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GeometricSmoteConfig::new(SamplingMode::Minority)
            .with_k_neighbors(3)
            .with_seed(42)
            .with_parallel(true);
        assert_eq!(config.mode, SamplingMode::Minority);
        assert_eq!(config.k_neighbors, 3);
        assert_eq!(config.seed, Some(42));
        assert!(config.parallel);
    }

    #[test]
    fn test_from_mode_name() {
        let config = GeometricSmoteConfig::from_mode_name("majority").unwrap();
        assert_eq!(config.mode, SamplingMode::Majority);
        assert_eq!(
            GeometricSmoteConfig::from_mode_name("cone"),
            Err(SmoteError::UnknownMode("cone".to_string()))
        );
    }

    #[test]
    fn test_zero_neighbors_invalid() {
        let config = GeometricSmoteConfig::default().with_k_neighbors(0);
        assert_eq!(config.validate(), Err(SmoteError::InvalidNeighbors));
    }
}
