//! Random storage construction.
//!
//! This module provides functions for creating dense buffers with random values.

use rand::Rng;
use rand::distr::StandardUniform;
use rand_distr::StandardNormal;

use crate::scalar::{Scalar, c64};
use crate::storage::Dense;

/// Trait for types that can be randomly sampled from a uniform distribution.
pub trait RandomUniform: Scalar {
    /// Sample a random value from the uniform distribution [0, 1).
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self;
}

impl RandomUniform for f64 {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        rng.sample(StandardUniform)
    }
}

impl RandomUniform for c64 {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        c64::new(rng.sample(StandardUniform), rng.sample(StandardUniform))
    }
}

/// Trait for types that can be randomly sampled from a normal distribution.
pub trait RandomNormal: Scalar {
    /// Sample a random value from the standard normal distribution.
    fn sample_normal<R: Rng>(rng: &mut R) -> Self;
}

impl RandomNormal for f64 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        rng.sample(StandardNormal)
    }
}

impl RandomNormal for c64 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        // Real and imaginary parts are independent N(0, 1/2) so that |z|^2 has mean 1
        let scale = std::f64::consts::FRAC_1_SQRT_2;
        c64::new(
            rng.sample::<f64, _>(StandardNormal) * scale,
            rng.sample::<f64, _>(StandardNormal) * scale,
        )
    }
}

impl<ElT: RandomUniform> Dense<ElT> {
    /// Buffer of `len` uniform random values in [0, 1).
    pub fn random(len: usize) -> Self {
        Self::random_with_rng(len, &mut rand::rng())
    }

    /// Buffer of `len` uniform random values drawn from `rng`.
    ///
    /// # Example
    ///
    /// ```
    /// use ndtensors_dense::Dense;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let d1: Dense<f64> = Dense::random_with_rng(6, &mut rng);
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let d2: Dense<f64> = Dense::random_with_rng(6, &mut rng);
    ///
    /// assert_eq!(d1, d2);
    /// ```
    pub fn random_with_rng<R: Rng>(len: usize, rng: &mut R) -> Self {
        Self::from_vec((0..len).map(|_| ElT::sample_uniform(rng)).collect())
    }
}

impl<ElT: RandomNormal> Dense<ElT> {
    /// Buffer of `len` standard normal random values.
    pub fn randn(len: usize) -> Self {
        Self::randn_with_rng(len, &mut rand::rng())
    }

    /// Buffer of `len` standard normal random values drawn from `rng`.
    pub fn randn_with_rng<R: Rng>(len: usize, rng: &mut R) -> Self {
        Self::from_vec((0..len).map(|_| ElT::sample_normal(rng)).collect())
    }
}
