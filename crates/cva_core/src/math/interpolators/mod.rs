//! Interpolation methods for curve construction.
//!
//! All interpolators implement the [`Interpolator`] trait, which defines:
//! - `interpolate(x: T) -> Result<T, InterpolationError>`: Compute interpolated value
//! - `domain() -> (T, T)`: Return valid interpolation range
//!
//! Interpolators are generic over `T: num_traits::Float`.
//!
//! ## Example
//!
//! ```
//! use cva_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let xs = [0.0_f64, 1.0, 2.0];
//! let ys = [1.0_f64, 0.97, 0.94];
//!
//! let interp = LinearInterpolator::new(&xs, &ys).unwrap();
//! let y = interp.interpolate(0.5).unwrap();
//! assert!((y - 0.985).abs() < 1e-12);
//! ```

mod linear;
mod traits;

pub use linear::LinearInterpolator;
pub use traits::Interpolator;
