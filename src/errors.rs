//! Structured error types for the sampling engine
//!
//! Two categories mirror the two failure modes of the system: configuration
//! errors are fatal to the session they were meant to start, request errors
//! reject a single update and leave prior state untouched. Every variant
//! carries a machine-readable code so an embedding layer can map failures
//! without parsing messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured error payload for the embedding boundary
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Coarse error category, matching the recovery semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad initialization parameters; the session cannot start
    Config,
    /// A single update was rejected; prior state is unchanged
    InvalidRequest,
}

/// Engine error types with proper categorization
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    // Configuration errors (fatal at startup)
    EmptyPopulation,
    InvalidDistribution { mean: f64, stddev: f64 },
    InvalidGroupCount(usize),
    InvalidReferenceIndex { index: usize, group_count: usize },
    InvalidDefaultSize { size: usize, min: usize, max: usize },
    InvalidSizeBounds { min: usize, max: usize, floor: usize },

    // Request errors (update rejected, state unchanged)
    GroupIndexOutOfRange { index: usize, group_count: usize },
    SampleSizeOutOfRange { size: usize, min: usize, max: usize },
    EmptyDraw,
    SampleTooSmall { len: usize, min: usize },
}

impl EngineError {
    /// Error category: configuration (fatal) vs invalid request (rejected)
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyPopulation
            | Self::InvalidDistribution { .. }
            | Self::InvalidGroupCount(_)
            | Self::InvalidReferenceIndex { .. }
            | Self::InvalidDefaultSize { .. }
            | Self::InvalidSizeBounds { .. } => ErrorKind::Config,

            Self::GroupIndexOutOfRange { .. }
            | Self::SampleSizeOutOfRange { .. }
            | Self::EmptyDraw
            | Self::SampleTooSmall { .. } => ErrorKind::InvalidRequest,
        }
    }

    /// Get error code for client identification
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyPopulation => "EMPTY_POPULATION",
            Self::InvalidDistribution { .. } => "INVALID_DISTRIBUTION",
            Self::InvalidGroupCount(_) => "INVALID_GROUP_COUNT",
            Self::InvalidReferenceIndex { .. } => "INVALID_REFERENCE_INDEX",
            Self::InvalidDefaultSize { .. } => "INVALID_DEFAULT_SIZE",
            Self::InvalidSizeBounds { .. } => "INVALID_SIZE_BOUNDS",
            Self::GroupIndexOutOfRange { .. } => "GROUP_INDEX_OUT_OF_RANGE",
            Self::SampleSizeOutOfRange { .. } => "SAMPLE_SIZE_OUT_OF_RANGE",
            Self::EmptyDraw => "EMPTY_DRAW",
            Self::SampleTooSmall { .. } => "SAMPLE_TOO_SMALL",
        }
    }

    /// Convert to the structured payload handed across the embedding boundary
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
            details: None,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPopulation => {
                write!(f, "population size must be at least 1")
            }
            Self::InvalidDistribution { mean, stddev } => {
                write!(
                    f,
                    "population distribution N({mean}, {stddev}) is invalid: \
                     stddev must be finite and positive"
                )
            }
            Self::InvalidGroupCount(count) => {
                write!(f, "group count {count} is invalid (need at least 2 groups)")
            }
            Self::InvalidReferenceIndex { index, group_count } => {
                write!(
                    f,
                    "reference index {index} out of range for {group_count} groups"
                )
            }
            Self::InvalidDefaultSize { size, min, max } => {
                write!(f, "default sample size {size} outside allowed range [{min}, {max}]")
            }
            Self::InvalidSizeBounds { min, max, floor } => {
                write!(
                    f,
                    "sample size bounds [{min}, {max}] are invalid \
                     (min must be at least {floor} and not exceed max)"
                )
            }
            Self::GroupIndexOutOfRange { index, group_count } => {
                write!(f, "group index {index} out of range for {group_count} groups")
            }
            Self::SampleSizeOutOfRange { size, min, max } => {
                write!(f, "sample size {size} outside allowed range [{min}, {max}]")
            }
            Self::EmptyDraw => {
                write!(f, "cannot draw fewer than 1 value from the population")
            }
            Self::SampleTooSmall { len, min } => {
                write!(
                    f,
                    "sample of {len} observation(s) too small for significance testing \
                     (need at least {min})"
                )
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, EngineError>;
