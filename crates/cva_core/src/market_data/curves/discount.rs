//! Discount factor curve with log-linear interpolation.

use crate::market_data::curves::traits::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::{Interpolator, LinearInterpolator};
use num_traits::Float;

/// A yield curve built from discount factor pillars.
///
/// Stores the pillar log discount factors in a [`LinearInterpolator`], so
/// interpolation is linear in ln P(0, t), which is equivalent to a
/// piecewise-constant forward rate. Pillar points are repriced exactly.
///
/// # Extrapolation
///
/// - Below the first pillar the curve interpolates from the implicit
///   anchor P(0, 0) = 1.
/// - Beyond the last pillar the forward rate of the last segment is
///   carried flat.
///
/// # Example
///
/// ```
/// use cva_core::market_data::curves::{DiscountFactorCurve, YieldCurve};
///
/// let times = [0.0_f64, 1.0, 2.0];
/// let dfs = [1.0_f64, 0.97, 0.93];
///
/// let curve = DiscountFactorCurve::new(&times, &dfs).unwrap();
/// assert!((curve.discount_factor(1.0).unwrap() - 0.97).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct DiscountFactorCurve<T: Float> {
    /// Log discount factors, linearly interpolated over the pillar times
    log_dfs: LinearInterpolator<T>,
}

impl<T: Float> DiscountFactorCurve<T> {
    /// Construct a discount factor curve from pillar points.
    ///
    /// # Arguments
    ///
    /// * `times` - Pillar times in years (strictly increasing, non-negative)
    /// * `dfs` - Corresponding discount factors (strictly positive)
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InsufficientData` - Fewer than 2 pillars or
    ///   mismatched lengths
    /// * `MarketDataError::InvalidMaturity` - Negative or unsorted times
    /// * `MarketDataError::InvalidInput` - Non-positive or non-finite
    ///   discount factors
    pub fn new(times: &[T], dfs: &[T]) -> Result<Self, MarketDataError> {
        if times.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                got: times.len(),
                need: 2,
            });
        }

        if times.len() != dfs.len() {
            return Err(MarketDataError::InsufficientData {
                got: dfs.len(),
                need: times.len(),
            });
        }

        for i in 0..times.len() {
            if times[i] < T::zero() {
                return Err(MarketDataError::InvalidMaturity {
                    t: times[i].to_f64().unwrap_or(0.0),
                });
            }
            if i > 0 && times[i] <= times[i - 1] {
                return Err(MarketDataError::InvalidMaturity {
                    t: times[i].to_f64().unwrap_or(0.0),
                });
            }
        }

        for &df in dfs {
            if !(df > T::zero()) || !df.is_finite() {
                return Err(MarketDataError::InvalidInput(format!(
                    "Discount factor must be positive and finite, got {}",
                    df.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        let logs: Vec<T> = dfs.iter().map(|&df| df.ln()).collect();
        let log_dfs = LinearInterpolator::new(times, &logs)?;

        Ok(Self { log_dfs })
    }

    /// Return the pillar times.
    #[inline]
    pub fn times(&self) -> &[T] {
        self.log_dfs.xs()
    }

    /// Return the number of pillar points.
    #[inline]
    pub fn len(&self) -> usize {
        self.log_dfs.len()
    }

    /// Check if the curve has no pillar points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.log_dfs.is_empty()
    }

    /// Return the pillar domain as `(t_min, t_max)`.
    #[inline]
    pub fn domain(&self) -> (T, T) {
        self.log_dfs.domain()
    }

    /// Interpolate the log discount factor at time t, extrapolating outside
    /// the pillar domain.
    fn log_discount(&self, t: T) -> Result<T, MarketDataError> {
        let (t_min, t_max) = self.log_dfs.domain();
        let ys = self.log_dfs.ys();
        let n = ys.len();

        if t < t_min {
            // Interpolate from the implicit (0, ln 1) anchor.
            return Ok(ys[0] * (t / t_min));
        }

        if t > t_max {
            // Carry the last segment's forward rate flat.
            let xs = self.log_dfs.xs();
            let slope = (ys[n - 1] - ys[n - 2]) / (xs[n - 1] - xs[n - 2]);
            return Ok(ys[n - 1] + slope * (t - t_max));
        }

        Ok(self.log_dfs.interpolate(t)?)
    }
}

impl<T: Float> YieldCurve<T> for DiscountFactorCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        if t == T::zero() {
            return Ok(T::one());
        }
        Ok(self.log_discount(t)?.exp())
    }
}
