//! Error types for structured error handling.

use thiserror::Error;

/// Interpolation operation errors.
///
/// # Variants
/// - `OutOfBounds`: Query point outside the interpolation domain
/// - `InsufficientData`: Not enough data points for construction
/// - `InvalidInput`: Malformed construction input (e.g. mismatched lengths)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpolationError {
    /// Query point outside the valid domain.
    #[error("Out of bounds: {x} not in [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
