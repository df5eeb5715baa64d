//! Core interpolation trait.

use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolation over sorted data points.
pub trait Interpolator<T: Float> {
    /// Interpolate the value at point `x`.
    ///
    /// # Errors
    ///
    /// Returns [`InterpolationError::OutOfBounds`] if `x` lies outside
    /// [`Interpolator::domain`].
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Return the valid interpolation range as `(x_min, x_max)`.
    fn domain(&self) -> (T, T);
}
