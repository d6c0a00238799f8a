//! Sampling Explorer Library
//!
//! Core engine behind an interactive sampling demo: a fixed synthetic
//! population is resampled into a handful of groups whose sample sizes are
//! driven by an external control surface (sliders), and every group is
//! compared against a designated reference group with three two-sample
//! significance tests.
//!
//! # Layering
//! - [`population`]: immutable population + subsampling (leaf component)
//! - [`engine`]: per-group state and the pure update function
//! - [`significance`]: t-test, Mann-Whitney U, Wilcoxon rank-sum
//! - [`payload`]: plain structured data for whatever renders the chart
//!
//! The rendering/UI layer, HTTP embedding and widget wiring live outside
//! this crate; they receive [`payload::RenderPayload`] values and nothing
//! else.

pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod payload;
pub mod population;
pub mod significance;
pub mod stats;
pub mod tracing_setup;

// Re-export dependencies to ensure tests/benchmarks use the same version
pub use chrono;
pub use rand;
