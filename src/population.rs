//! Immutable synthetic population and subsampling
//!
//! The population is generated once per session from a normal distribution
//! and never mutated afterwards. Subsamples are drawn with replacement, so
//! two draws of the same size are independent and (by design) almost never
//! equal. `Population` is cheap to share read-only across sessions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::info;

use crate::errors::{EngineError, Result};
use crate::stats;

/// Immutable multiset of real-valued measurements
#[derive(Debug, Clone)]
pub struct Population {
    values: Vec<f64>,
    mean: f64,
}

impl Population {
    /// Generate `size` independent draws from N(`mean`, `stddev`).
    ///
    /// Uses the thread-local RNG; see [`Population::generate_seeded`] for a
    /// deterministic variant.
    pub fn generate(mean: f64, stddev: f64, size: usize) -> Result<Self> {
        Self::generate_with(&mut rand::thread_rng(), mean, stddev, size)
    }

    /// Deterministic generation from a fixed seed. Used by tests and benches.
    pub fn generate_seeded(mean: f64, stddev: f64, size: usize, seed: u64) -> Result<Self> {
        Self::generate_with(&mut StdRng::seed_from_u64(seed), mean, stddev, size)
    }

    /// Generate using the caller's RNG.
    pub fn generate_with<R: Rng + ?Sized>(
        rng: &mut R,
        mean: f64,
        stddev: f64,
        size: usize,
    ) -> Result<Self> {
        if size < 1 {
            return Err(EngineError::EmptyPopulation);
        }
        // rand_distr only rejects NaN; negative or zero σ must be caught here
        if !mean.is_finite() || !stddev.is_finite() || stddev <= 0.0 {
            return Err(EngineError::InvalidDistribution { mean, stddev });
        }
        let normal = Normal::new(mean, stddev)
            .map_err(|_| EngineError::InvalidDistribution { mean, stddev })?;

        let values: Vec<f64> = (0..size).map(|_| normal.sample(&mut *rng)).collect();
        let pop_mean = stats::mean(&values);

        info!(
            size,
            mu = mean,
            sigma = stddev,
            realized_mean = pop_mean,
            "population generated"
        );

        Ok(Self { values, mean: pop_mean })
    }

    /// Draw `n` values independently and uniformly at random, with
    /// replacement. The population itself is unchanged.
    pub fn draw(&self, n: usize) -> Result<Vec<f64>> {
        self.draw_with(&mut rand::thread_rng(), n)
    }

    /// Draw using the caller's RNG.
    pub fn draw_with<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Result<Vec<f64>> {
        if n < 1 {
            return Err(EngineError::EmptyDraw);
        }
        Ok((0..n)
            .map(|_| self.values[rng.gen_range(0..self.values.len())])
            .collect())
    }

    /// Exact arithmetic mean of the stored population.
    ///
    /// Rendered as the dashed reference line in the chart.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Number of measurements in the population.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read-only view of the measurements.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_population() -> Population {
        Population::generate_seeded(2.0, 1.0, 1000, 42).unwrap()
    }

    #[test]
    fn generate_produces_requested_size() {
        let pop = seeded_population();
        assert_eq!(pop.len(), 1000);
        assert!(!pop.is_empty());
    }

    #[test]
    fn realized_mean_is_near_mu() {
        // 1000 draws from N(2,1): realized mean within ~4 standard errors
        let pop = seeded_population();
        assert!((pop.mean() - 2.0).abs() < 0.15);
    }

    #[test]
    fn generate_rejects_empty_population() {
        let err = Population::generate_seeded(2.0, 1.0, 0, 1).unwrap_err();
        assert_eq!(err, EngineError::EmptyPopulation);
    }

    #[test]
    fn generate_rejects_bad_stddev() {
        let err = Population::generate_seeded(2.0, -1.0, 10, 1).unwrap_err();
        assert_eq!(err, EngineError::InvalidDistribution { mean: 2.0, stddev: -1.0 });
        assert!(Population::generate_seeded(2.0, 0.0, 10, 1).is_err());
        assert!(Population::generate_seeded(2.0, f64::NAN, 10, 1).is_err());
        assert!(Population::generate_seeded(2.0, f64::INFINITY, 10, 1).is_err());
    }

    #[test]
    fn generate_rejects_non_finite_mean() {
        assert!(Population::generate_seeded(f64::NAN, 1.0, 10, 1).is_err());
        assert!(Population::generate_seeded(f64::INFINITY, 1.0, 10, 1).is_err());
    }

    #[test]
    fn draw_returns_exactly_n_values_from_the_population() {
        let pop = seeded_population();
        let mut rng = StdRng::seed_from_u64(7);
        let sample = pop.draw_with(&mut rng, 50).unwrap();
        assert_eq!(sample.len(), 50);
        for v in &sample {
            assert!(pop.values().contains(v));
        }
    }

    #[test]
    fn draw_rejects_zero() {
        let pop = seeded_population();
        assert_eq!(pop.draw(0).unwrap_err(), EngineError::EmptyDraw);
    }

    #[test]
    fn draws_are_with_replacement() {
        // Drawing more values than a tiny population holds must succeed
        let pop = Population::generate_seeded(0.0, 1.0, 3, 9).unwrap();
        let sample = pop.draw(10).unwrap();
        assert_eq!(sample.len(), 10);
    }

    #[test]
    fn population_is_unchanged_by_draws() {
        let pop = seeded_population();
        let before = pop.values().to_vec();
        let _ = pop.draw(100).unwrap();
        assert_eq!(pop.values(), before.as_slice());
    }
}
