//! Error types for swarmpath operations.
//!
//! Configuration problems and invalid map queries are surfaced before any
//! optimization starts. A path that still crosses obstacles is not an error:
//! it is reported through the violation term of the returned cost.

use thiserror::Error;

use crate::planner::GridCoord;

/// Main error type for planning operations.
///
/// # Examples
///
/// ```
/// use swarmpath::error::PlannerError;
///
/// let err = PlannerError::InvalidBounds { lower: 1.0, upper: 0.0 };
/// assert!(err.to_string().contains("lower"));
/// ```
#[derive(Error, Debug)]
pub enum PlannerError {
    /// A hyperparameter is outside its allowed range.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// The cost weight tuple is unusable.
    #[error("Invalid cost weights: {0}")]
    InvalidWeights(String),

    /// Search-space boundary interval is inverted or not finite.
    #[error("Invalid bounds: lower = {lower}, upper = {upper} (lower must not exceed upper)")]
    InvalidBounds {
        /// Lower boundary
        lower: f64,
        /// Upper boundary
        upper: f64,
    },

    /// A start or end pixel lies outside the map.
    #[error("Point ({}, {}) is outside the {rows}x{cols} map", .point.x, .point.y)]
    OutOfBounds {
        /// Offending pixel
        point: GridCoord,
        /// Map rows
        rows: usize,
        /// Map columns
        cols: usize,
    },

    /// Map data could not be interpreted.
    #[error("Map format error: {0}")]
    MapFormat(String),

    /// I/O error while reading maps or configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlannerError {
    /// Create an invalid hyperparameter error.
    #[must_use]
    pub fn hyperparameter(param: &str, value: impl ToString, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, PlannerError>;
