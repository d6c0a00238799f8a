//! Rendering payloads for the (out-of-scope) UI layer
//!
//! The engine hands the embedding layer plain structured data and nothing
//! else: no plot coordinates, no colors, no widget state. Everything here is
//! serde-serializable so the host can ship it over whatever transport it
//! embeds the session in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::EngineState;
use crate::significance::SignificanceResult;

/// Bar + error-bar encoding for one group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupBar {
    /// Group index (0-based)
    pub index: usize,
    /// Sample mean (bar height)
    pub mean: f64,
    /// Standard error of the mean
    pub sem: f64,
    /// Current sample size
    pub sample_size: usize,
    /// Lower end of the error bar (mean − sem)
    pub error_low: f64,
    /// Upper end of the error bar (mean + sem)
    pub error_high: f64,
}

/// Significance markers for one comparison group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignificanceMarker {
    /// Index of the comparison group
    pub index: usize,
    /// Per-test outcomes (flag + raw p-value) against the reference
    pub tests: SignificanceResult,
}

/// Everything the chart needs for one consistent redraw
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderPayload {
    /// When this payload was derived from engine state
    pub computed_at: DateTime<Utc>,
    /// Exact mean of the population (dashed reference line)
    pub population_mean: f64,
    /// Which group the markers are measured against
    pub reference_index: usize,
    /// One bar per group, ordered by index
    pub groups: Vec<GroupBar>,
    /// One marker set per comparison group, ordered by index
    pub markers: Vec<SignificanceMarker>,
}

impl RenderPayload {
    /// Derive a payload from the current engine state.
    pub fn from_state(state: &EngineState) -> Self {
        let groups = state
            .groups()
            .iter()
            .enumerate()
            .map(|(index, group)| GroupBar {
                index,
                mean: group.mean,
                sem: group.sem,
                sample_size: group.size,
                error_low: group.mean - group.sem,
                error_high: group.mean + group.sem,
            })
            .collect();

        let markers = state
            .comparisons()
            .iter()
            .map(|comparison| SignificanceMarker {
                index: comparison.group_index,
                tests: comparison.result,
            })
            .collect();

        Self {
            computed_at: Utc::now(),
            population_mean: state.population().mean(),
            reference_index: state.reference_index(),
            groups,
            markers,
        }
    }
}
