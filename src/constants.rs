//! Documented constants for the sampling engine
//!
//! All tunable parameters in one place with justification for their values.
//! Centralizing constants prevents magic numbers and makes tuning easier.

// =============================================================================
// POPULATION CONSTANTS
// =============================================================================

/// Default population mean (μ = 2)
///
/// Justification:
/// - Comfortably above zero so bars rendered from group means sit in
///   positive territory without axis gymnastics
/// - Two standard deviations away from zero at the default σ, so negative
///   draws are rare but present (keeps the demo honest about tails)
pub const DEFAULT_POPULATION_MEAN: f64 = 2.0;

/// Default population standard deviation (σ = 1)
pub const DEFAULT_POPULATION_STDDEV: f64 = 1.0;

/// Default population size
///
/// Justification:
/// - 1000 draws is large enough that subsamples of ≤100 barely overlap,
///   small enough to regenerate instantly per session
pub const DEFAULT_POPULATION_SIZE: usize = 1000;

// =============================================================================
// GROUP CONSTANTS
// =============================================================================

/// Default number of groups (comparison groups + one reference)
pub const DEFAULT_GROUP_COUNT: usize = 5;

/// Default per-group sample size at initialization
///
/// Justification:
/// - 5 observations is deliberately underpowered: the whole point of the
///   demo is watching significance appear as sliders push sizes up
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Smallest sample size any group may request
///
/// The Bessel-corrected standard deviation divides by n−1, so a sample of
/// one observation has no defined spread. Two is the statistical floor.
pub const MIN_SAMPLE_SIZE: usize = 2;

/// Largest sample size any group may request
///
/// Matches the upper bound of the slider range on the control surface.
/// Keeps every update a small bounded computation.
pub const MAX_SAMPLE_SIZE: usize = 100;

// =============================================================================
// SIGNIFICANCE CONSTANTS
// =============================================================================

/// Significance threshold (α = 0.05)
///
/// A test result is flagged significant when its p-value is strictly below
/// this value. Strict `<`, never `<=`.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_size_bounds_are_ordered() {
        assert!(MIN_SAMPLE_SIZE >= 2);
        assert!(MIN_SAMPLE_SIZE < MAX_SAMPLE_SIZE);
        assert!(DEFAULT_SAMPLE_SIZE >= MIN_SAMPLE_SIZE);
        assert!(DEFAULT_SAMPLE_SIZE <= MAX_SAMPLE_SIZE);
    }

    #[test]
    fn reference_index_fits_default_group_count() {
        assert!(DEFAULT_GROUP_COUNT >= 2);
    }
}
