//! Flat yield curve.

use crate::market_data::curves::traits::YieldCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// A flat yield curve with a constant continuously-compounded zero rate.
///
/// Useful for testing and for markets where only a single reference rate
/// is available.
///
/// # Mathematical Model
///
/// ```text
/// P(0, t) = exp(-r * t)
/// ```
///
/// # Example
///
/// ```
/// use cva_core::market_data::curves::{FlatCurve, YieldCurve};
///
/// let curve = FlatCurve::new(0.03_f64);
/// let df = curve.discount_factor(2.0).unwrap();
/// assert!((df - (-0.06_f64).exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCurve<T: Float> {
    /// The constant zero rate
    rate: T,
}

impl<T: Float> FlatCurve<T> {
    /// Construct a flat curve from a constant zero rate.
    #[inline]
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// Return the constant zero rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }
}

impl<T: Float> YieldCurve<T> for FlatCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok((-self.rate * t).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_curve_discount_factor() {
        let curve = FlatCurve::new(0.03_f64);
        let df = curve.discount_factor(1.0).unwrap();
        assert!((df - (-0.03_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_flat_curve_discount_factor_at_zero() {
        let curve = FlatCurve::new(0.05_f64);
        let df = curve.discount_factor(0.0).unwrap();
        assert!((df - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_flat_curve_rejects_negative_maturity() {
        let curve = FlatCurve::new(0.03_f64);
        assert!(curve.discount_factor(-1.0).is_err());
    }

    #[test]
    fn test_flat_curve_zero_rate_roundtrip() {
        let curve = FlatCurve::new(0.025_f64);
        let r = curve.zero_rate(4.0).unwrap();
        assert!((r - 0.025).abs() < 1e-12);
    }

    #[test]
    fn test_flat_curve_forward_rate_equals_zero_rate() {
        let curve = FlatCurve::new(0.02_f64);
        let f = curve.forward_rate(1.0, 3.0).unwrap();
        assert!((f - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_flat_curve_forward_rate_invalid_interval() {
        let curve = FlatCurve::new(0.02_f64);
        assert!(curve.forward_rate(3.0, 1.0).is_err());
        assert!(curve.forward_rate(2.0, 2.0).is_err());
    }
}
