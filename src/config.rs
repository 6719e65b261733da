//! Configuration of a cosine tree run.

use crate::types::{CosineTreeError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CosineTreeConfig {
    /// Maximum number of leaves, and hence basis vectors.
    pub target_rank: usize,
    /// Relative tolerance on the squared Frobenius error, in (0, 1].
    /// The run stops once the residual drops to
    /// `error_tolerance * ||A||_F^2`.
    pub error_tolerance: f64,
    /// Seed for the center sampling. `None` draws a seed from the OS.
    pub random_seed: Option<u64>,
}

impl Default for CosineTreeConfig {
    fn default() -> Self {
        Self {
            target_rank: 50,
            error_tolerance: 1E-2,
            random_seed: None,
        }
    }
}

impl CosineTreeConfig {
    pub fn new(target_rank: usize, error_tolerance: f64) -> Self {
        Self {
            target_rank,
            error_tolerance,
            random_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_target_rank(mut self, target_rank: usize) -> Self {
        self.target_rank = target_rank;
        self
    }

    pub fn with_error_tolerance(mut self, error_tolerance: f64) -> Self {
        self.error_tolerance = error_tolerance;
        self
    }

    /// Reject a non-positive rank or a tolerance outside (0, 1].
    pub fn validate(&self) -> Result<()> {
        if self.target_rank == 0 {
            return Err(CosineTreeError::InvalidRank(self.target_rank));
        }

        if !(self.error_tolerance > 0.0 && self.error_tolerance <= 1.0) {
            return Err(CosineTreeError::InvalidTolerance(self.error_tolerance));
        }

        Ok(())
    }

    /// The random source for this run.
    pub fn make_rng(&self) -> ChaCha8Rng {
        match self.random_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_validate() {
        assert_eq!(CosineTreeConfig::new(3, 0.5).validate(), Ok(()));
        assert_eq!(CosineTreeConfig::new(3, 1.0).validate(), Ok(()));
        assert_eq!(
            CosineTreeConfig::new(0, 0.5).validate(),
            Err(CosineTreeError::InvalidRank(0))
        );
        assert_eq!(
            CosineTreeConfig::new(3, 0.0).validate(),
            Err(CosineTreeError::InvalidTolerance(0.0))
        );
        assert_eq!(
            CosineTreeConfig::new(3, 1.5).validate(),
            Err(CosineTreeError::InvalidTolerance(1.5))
        );
        assert!(CosineTreeConfig::new(3, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = CosineTreeConfig::default().with_seed(99);

        let mut first_rng = config.make_rng();
        let mut second_rng = config.make_rng();

        let first: Vec<u64> = (0..8).map(|_| first_rng.gen()).collect();
        let second: Vec<u64> = (0..8).map(|_| second_rng.gen()).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_builder_methods() {
        let config = CosineTreeConfig::default()
            .with_target_rank(7)
            .with_error_tolerance(0.25)
            .with_seed(1);

        assert_eq!(
            config,
            CosineTreeConfig {
                target_rank: 7,
                error_tolerance: 0.25,
                random_seed: Some(1),
            }
        );
    }
}
