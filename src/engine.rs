//! Group state and the pure update function
//!
//! [`EngineState`] is an explicit value: every update returns a new state
//! instead of mutating shared globals, so mutation sites are visible at the
//! call site and the state can be tested without any UI attached. The caller
//! (one interactive session) serializes updates; nothing here locks.
//!
//! Update semantics for `set_group_size(i, n)`:
//! - `n` equal to the current size is a no-op (no redundant random draw)
//! - resizing a comparison group recomputes only that group's significance
//! - resizing the reference group recomputes significance for **every**
//!   comparison group, since they are all measured against its sample

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::errors::{EngineError, Result};
use crate::population::Population;
use crate::significance::{self, SignificanceResult};
use crate::stats;

/// One group: requested size, current sample and derived statistics
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Requested sample size; always equals `sample.len()`
    pub size: usize,
    /// Current sample, drawn with replacement from the population
    pub sample: Vec<f64>,
    /// Arithmetic mean of `sample`
    pub mean: f64,
    /// Standard error of the mean (Bessel-corrected stddev / √n)
    pub sem: f64,
}

impl Group {
    fn from_sample(sample: Vec<f64>) -> Self {
        let mean = stats::mean(&sample);
        let sem = stats::sem(&sample);
        Self {
            size: sample.len(),
            sample,
            mean,
            sem,
        }
    }
}

/// Significance of one comparison group against the reference
#[derive(Debug, Clone, PartialEq)]
pub struct GroupComparison {
    /// Index of the comparison group
    pub group_index: usize,
    /// Outcomes of the three tests against the reference sample
    pub result: SignificanceResult,
}

/// Full engine state: population handle, groups and comparison results
///
/// The population is behind an `Arc` so successive states (and, in a
/// multi-session variant, concurrent sessions) share it read-only.
#[derive(Debug, Clone)]
pub struct EngineState {
    population: Arc<Population>,
    config: EngineConfig,
    groups: Vec<Group>,
    comparisons: Vec<GroupComparison>,
}

impl EngineState {
    /// Build the initial state: every group at the configured default size,
    /// one fresh sample each, significance computed for all comparison
    /// groups against the reference.
    pub fn initialize(population: Arc<Population>, config: EngineConfig) -> Result<Self> {
        Self::initialize_with(&mut rand::thread_rng(), population, config)
    }

    /// Deterministic initialization using the caller's RNG.
    pub fn initialize_with<R: Rng + ?Sized>(
        rng: &mut R,
        population: Arc<Population>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;

        let groups: Vec<Group> = (0..config.group_count)
            .map(|_| {
                population
                    .draw_with(&mut *rng, config.default_sample_size)
                    .map(Group::from_sample)
            })
            .collect::<Result<_>>()?;

        let comparisons = Self::compare_all(&groups, config.reference_index)?;

        info!(
            group_count = config.group_count,
            default_sample_size = config.default_sample_size,
            reference_index = config.reference_index,
            "engine initialized"
        );

        Ok(Self {
            population,
            config,
            groups,
            comparisons,
        })
    }

    /// Pure update: returns a new state with group `group_index` resampled
    /// at `new_size` and significance results brought up to date.
    ///
    /// Requesting the current size is a no-op that performs no random draw.
    /// Invalid requests leave the prior state untouched.
    pub fn set_group_size(&self, group_index: usize, new_size: usize) -> Result<Self> {
        self.set_group_size_with(&mut rand::thread_rng(), group_index, new_size)
    }

    /// Deterministic update using the caller's RNG.
    pub fn set_group_size_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        group_index: usize,
        new_size: usize,
    ) -> Result<Self> {
        if group_index >= self.config.group_count {
            let err = EngineError::GroupIndexOutOfRange {
                index: group_index,
                group_count: self.config.group_count,
            };
            warn!(group_index, %err, "update rejected");
            return Err(err);
        }
        if new_size < self.config.min_sample_size || new_size > self.config.max_sample_size {
            let err = EngineError::SampleSizeOutOfRange {
                size: new_size,
                min: self.config.min_sample_size,
                max: self.config.max_sample_size,
            };
            warn!(group_index, new_size, %err, "update rejected");
            return Err(err);
        }

        if self.groups[group_index].size == new_size {
            debug!(group_index, new_size, "size unchanged, skipping resample");
            return Ok(self.clone());
        }

        let mut groups = self.groups.clone();
        groups[group_index] = Group::from_sample(self.population.draw_with(rng, new_size)?);

        let reference = self.config.reference_index;
        let comparisons = if group_index == reference {
            // The reference sample changed: every comparison is stale
            Self::compare_all(&groups, reference)?
        } else {
            let mut comparisons = self.comparisons.clone();
            let result = significance::compute_significance(
                &groups[group_index].sample,
                &groups[reference].sample,
            )?;
            if let Some(entry) = comparisons
                .iter_mut()
                .find(|c| c.group_index == group_index)
            {
                entry.result = result;
            }
            comparisons
        };

        debug!(
            group_index,
            new_size,
            mean = groups[group_index].mean,
            sem = groups[group_index].sem,
            "group resampled"
        );

        Ok(Self {
            population: Arc::clone(&self.population),
            config: self.config,
            groups,
            comparisons,
        })
    }

    fn compare_all(groups: &[Group], reference: usize) -> Result<Vec<GroupComparison>> {
        groups
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != reference)
            .map(|(i, group)| {
                significance::compute_significance(&group.sample, &groups[reference].sample).map(
                    |result| GroupComparison {
                        group_index: i,
                        result,
                    },
                )
            })
            .collect()
    }

    /// All groups, ordered by index.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Significance of every comparison group against the reference.
    pub fn comparisons(&self) -> &[GroupComparison] {
        &self.comparisons
    }

    /// Significance result for one comparison group, if it is one.
    pub fn comparison_for(&self, group_index: usize) -> Option<&SignificanceResult> {
        self.comparisons
            .iter()
            .find(|c| c.group_index == group_index)
            .map(|c| &c.result)
    }

    /// Index of the reference group.
    pub fn reference_index(&self) -> usize {
        self.config.reference_index
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_state() -> (EngineState, StdRng) {
        let mut rng = StdRng::seed_from_u64(42);
        let population =
            Arc::new(Population::generate_with(&mut rng, 2.0, 1.0, 1000).unwrap());
        let state =
            EngineState::initialize_with(&mut rng, population, EngineConfig::default()).unwrap();
        (state, rng)
    }

    #[test]
    fn initialization_draws_every_group_at_default_size() {
        let (state, _) = seeded_state();
        assert_eq!(state.groups().len(), 5);
        for group in state.groups() {
            assert_eq!(group.size, 5);
            assert_eq!(group.sample.len(), 5);
            assert!(group.sem >= 0.0 && group.sem.is_finite());
        }
    }

    #[test]
    fn comparisons_cover_exactly_the_non_reference_groups() {
        let (state, _) = seeded_state();
        let indices: Vec<usize> = state.comparisons().iter().map(|c| c.group_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert!(state.comparison_for(4).is_none());
    }

    #[test]
    fn setting_the_current_size_is_a_no_op() {
        let (state, mut rng) = seeded_state();
        let next = state.set_group_size_with(&mut rng, 2, 5).unwrap();
        assert_eq!(next.groups()[2].sample, state.groups()[2].sample);
        assert_eq!(next.comparisons(), state.comparisons());
    }

    #[test]
    fn resizing_a_comparison_group_touches_only_that_group() {
        let (state, mut rng) = seeded_state();
        let next = state.set_group_size_with(&mut rng, 0, 50).unwrap();

        assert_eq!(next.groups()[0].size, 50);
        assert_eq!(next.groups()[0].sample.len(), 50);
        for i in 1..5 {
            assert_eq!(next.groups()[i], state.groups()[i], "group {i} must be untouched");
        }
        for i in [1, 2, 3] {
            assert_eq!(next.comparison_for(i), state.comparison_for(i));
        }
    }

    #[test]
    fn resizing_the_reference_group_refreshes_all_comparisons() {
        let (state, mut rng) = seeded_state();
        let next = state.set_group_size_with(&mut rng, 4, 60).unwrap();

        assert_eq!(next.groups()[4].size, 60);
        // Comparison samples did not move, but their p-values are all
        // recomputed against the new reference sample
        for i in 0..4 {
            assert_eq!(next.groups()[i], state.groups()[i]);
            assert_ne!(next.comparison_for(i), state.comparison_for(i), "comparison {i}");
        }
    }

    #[test]
    fn out_of_range_group_index_is_rejected() {
        let (state, mut rng) = seeded_state();
        let err = state.set_group_size_with(&mut rng, 5, 10).unwrap_err();
        assert_eq!(err, EngineError::GroupIndexOutOfRange { index: 5, group_count: 5 });
    }

    #[test]
    fn sample_size_outside_slider_range_is_rejected() {
        let (state, mut rng) = seeded_state();
        assert!(state.set_group_size_with(&mut rng, 0, 1).is_err());
        assert!(state.set_group_size_with(&mut rng, 0, 101).is_err());
    }

    #[test]
    fn rejected_updates_leave_prior_state_usable() {
        let (state, mut rng) = seeded_state();
        let _ = state.set_group_size_with(&mut rng, 9, 10);
        // Prior value still consistent and updatable
        let next = state.set_group_size_with(&mut rng, 1, 20).unwrap();
        assert_eq!(next.groups()[1].size, 20);
    }

    #[test]
    fn bad_reference_index_fails_initialization() {
        let mut rng = StdRng::seed_from_u64(3);
        let population = Arc::new(Population::generate_with(&mut rng, 2.0, 1.0, 100).unwrap());
        let config = EngineConfig {
            reference_index: 7,
            ..Default::default()
        };
        let err = EngineState::initialize_with(&mut rng, population, config).unwrap_err();
        assert_eq!(err, EngineError::InvalidReferenceIndex { index: 7, group_count: 5 });
    }
}
