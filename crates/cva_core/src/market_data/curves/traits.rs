//! Yield curve trait.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Generic yield curve trait for discount factor calculations.
///
/// # Contract
///
/// - `discount_factor(t)` returns P(0, t), the price today of a unit
///   zero-coupon bond maturing at time t
/// - P(0, 0) = 1
/// - P(0, t) > 0 for all valid t
///
/// # Example
///
/// ```
/// use cva_core::market_data::curves::{FlatCurve, YieldCurve};
///
/// let curve = FlatCurve::new(0.03_f64);
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - (-0.03_f64).exp()).abs() < 1e-12);
/// ```
pub trait YieldCurve<T: Float> {
    /// Return the discount factor P(0, t).
    ///
    /// # Errors
    ///
    /// Returns [`MarketDataError::InvalidMaturity`] if `t < 0`, or
    /// [`MarketDataError::OutOfBounds`] if `t` lies outside the curve
    /// domain and extrapolation is not permitted.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Return the continuously-compounded zero rate for maturity `t`.
    ///
    /// Defined as `-ln(P(0, t)) / t` for `t > 0`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        let df = self.discount_factor(t)?;
        Ok(-df.ln() / t)
    }

    /// Return the continuously-compounded forward rate over `[t1, t2]`.
    ///
    /// Defined as `ln(P(0, t1) / P(0, t2)) / (t2 - t1)` for `t2 > t1`.
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        if t2 <= t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: (t2 - t1).to_f64().unwrap_or(0.0),
            });
        }
        let d1 = self.discount_factor(t1)?;
        let d2 = self.discount_factor(t2)?;
        Ok((d1 / d2).ln() / (t2 - t1))
    }
}
