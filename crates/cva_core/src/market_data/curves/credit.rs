//! Credit curve abstractions for counterparty default risk.
//!
//! This module provides:
//! - [`CreditCurve`]: Generic trait for hazard rate and survival probability calculations
//! - [`HazardRateCurve`]: Piecewise-constant hazard rate term structure
//! - [`FlatHazardRateCurve`]: Constant hazard rate

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Generic credit curve trait for hazard rate and survival probability
/// calculations.
///
/// # Contract
///
/// - `hazard_rate(t)` returns the instantaneous hazard rate λ(t) at time t
/// - `survival_probability(t)` returns P(τ > t) = exp(-∫₀ᵗ λ(s)ds)
/// - `default_probability(t)` returns P(τ ≤ t) = 1 - P(τ > t)
///
/// # Invariants
///
/// - λ(t) ≥ 0 for all t ≥ 0
/// - P(τ > 0) = 1
/// - P(τ > t) is non-increasing in t
pub trait CreditCurve<T: Float> {
    /// Return the instantaneous hazard rate at time `t`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketDataError::InvalidMaturity`] if `t < 0`.
    fn hazard_rate(&self, t: T) -> Result<T, MarketDataError>;

    /// Return the survival probability P(τ > t).
    ///
    /// # Errors
    ///
    /// Returns [`MarketDataError::InvalidMaturity`] if `t < 0`.
    fn survival_probability(&self, t: T) -> Result<T, MarketDataError>;

    /// Return the default probability P(τ ≤ t).
    fn default_probability(&self, t: T) -> Result<T, MarketDataError> {
        Ok(T::one() - self.survival_probability(t)?)
    }

    /// Return the probability of default within `(t1, t2]`, conditional on
    /// nothing: P(t1 < τ ≤ t2) = P(τ > t1) - P(τ > t2).
    ///
    /// # Errors
    ///
    /// Returns [`MarketDataError::InvalidMaturity`] if `t2 < t1` or either
    /// time is negative.
    fn default_probability_between(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        if t2 < t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: (t2 - t1).to_f64().unwrap_or(0.0),
            });
        }
        let s1 = self.survival_probability(t1)?;
        let s2 = self.survival_probability(t2)?;
        Ok(s1 - s2)
    }

    /// Return the unconditional default density λ(t) · P(τ > t).
    fn default_density(&self, t: T) -> Result<T, MarketDataError> {
        Ok(self.hazard_rate(t)? * self.survival_probability(t)?)
    }
}

/// Piecewise-constant hazard rate curve.
///
/// Stores (tenor, hazard_rate) pairs with backward-flat semantics: the rate
/// `hazard_rates[i]` applies over `(tenors[i-1], tenors[i]]`, the first rate
/// extends back to time zero and the last rate is carried flat beyond the
/// final tenor when extrapolation is enabled.
///
/// # Mathematical Model
///
/// ```text
/// P(τ > t) = exp(-∫₀ᵗ λ(s)ds)
/// ```
///
/// With piecewise-constant λ the integral is a sum of segment areas and the
/// survival probability is exact.
///
/// # Example
///
/// ```
/// use cva_core::market_data::curves::{CreditCurve, HazardRateCurve};
///
/// let tenors = [1.0_f64, 3.0, 5.0];
/// let hazard_rates = [0.01, 0.015, 0.02];
///
/// let curve = HazardRateCurve::new(&tenors, &hazard_rates, true).unwrap();
/// let surv = curve.survival_probability(1.0).unwrap();
/// assert!((surv - (-0.01_f64).exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct HazardRateCurve<T: Float> {
    /// Sorted tenor points (years)
    tenors: Vec<T>,
    /// Hazard rate applying up to and including each tenor
    hazard_rates: Vec<T>,
    /// Whether to allow flat extrapolation beyond the last tenor
    allow_extrapolation: bool,
}

impl<T: Float> HazardRateCurve<T> {
    /// Construct a hazard rate curve from pillar points.
    ///
    /// # Arguments
    ///
    /// * `tenors` - Tenor points in years (strictly increasing, non-negative,
    ///   at least 2 points)
    /// * `hazard_rates` - Corresponding hazard rates (non-negative)
    /// * `allow_extrapolation` - Whether to carry the last rate flat beyond
    ///   the final tenor
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InsufficientData` - Fewer than 2 pillar points or
    ///   mismatched lengths
    /// * `MarketDataError::InvalidMaturity` - Negative or unsorted tenors
    /// * `MarketDataError::InvalidInput` - Negative hazard rates
    pub fn new(
        tenors: &[T],
        hazard_rates: &[T],
        allow_extrapolation: bool,
    ) -> Result<Self, MarketDataError> {
        if tenors.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                got: tenors.len(),
                need: 2,
            });
        }

        if tenors.len() != hazard_rates.len() {
            return Err(MarketDataError::InsufficientData {
                got: hazard_rates.len(),
                need: tenors.len(),
            });
        }

        for i in 0..tenors.len() {
            if tenors[i] < T::zero() {
                return Err(MarketDataError::InvalidMaturity {
                    t: tenors[i].to_f64().unwrap_or(0.0),
                });
            }
            if i > 0 && tenors[i] <= tenors[i - 1] {
                return Err(MarketDataError::InvalidMaturity {
                    t: tenors[i].to_f64().unwrap_or(0.0),
                });
            }
        }

        for &h in hazard_rates {
            if h < T::zero() {
                return Err(MarketDataError::InvalidInput(format!(
                    "Hazard rate must be non-negative, got {}",
                    h.to_f64().unwrap_or(0.0)
                )));
            }
        }

        Ok(Self {
            tenors: tenors.to_vec(),
            hazard_rates: hazard_rates.to_vec(),
            allow_extrapolation,
        })
    }

    /// Return the tenor domain as `(t_min, t_max)`.
    #[inline]
    pub fn domain(&self) -> (T, T) {
        (self.tenors[0], self.tenors[self.tenors.len() - 1])
    }

    /// Return the number of pillar points.
    #[inline]
    pub fn len(&self) -> usize {
        self.tenors.len()
    }

    /// Check if the curve has no pillar points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tenors.is_empty()
    }

    /// Return whether extrapolation is allowed.
    #[inline]
    pub fn allow_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    /// Compute the integrated hazard ∫₀ᵗ λ(s)ds.
    ///
    /// With piecewise-constant rates the integral accumulates exact
    /// rectangle areas segment by segment.
    fn integrated_hazard(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Ok(T::zero());
        }

        let n = self.tenors.len();
        let mut integral = T::zero();
        let mut prev = T::zero();

        for i in 0..n {
            let node = self.tenors[i];
            // A zero-time anchor node contributes nothing.
            if node <= prev {
                continue;
            }
            let end = if t < node { t } else { node };
            integral = integral + self.hazard_rates[i] * (end - prev);
            prev = end;
            if prev >= t {
                return Ok(integral);
            }
        }

        // Beyond the last tenor.
        if self.allow_extrapolation {
            Ok(integral + self.hazard_rates[n - 1] * (t - prev))
        } else {
            let (t_min, t_max) = self.domain();
            Err(MarketDataError::OutOfBounds {
                x: t.to_f64().unwrap_or(0.0),
                min: t_min.to_f64().unwrap_or(0.0),
                max: t_max.to_f64().unwrap_or(0.0),
            })
        }
    }
}

impl<T: Float> CreditCurve<T> for HazardRateCurve<T> {
    fn hazard_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }

        // Backward-flat lookup: first tenor at or after t.
        let pos = self.tenors.partition_point(|&ti| ti < t);
        if pos < self.tenors.len() {
            return Ok(self.hazard_rates[pos]);
        }

        if self.allow_extrapolation {
            Ok(self.hazard_rates[self.hazard_rates.len() - 1])
        } else {
            let (t_min, t_max) = self.domain();
            Err(MarketDataError::OutOfBounds {
                x: t.to_f64().unwrap_or(0.0),
                min: t_min.to_f64().unwrap_or(0.0),
                max: t_max.to_f64().unwrap_or(0.0),
            })
        }
    }

    fn survival_probability(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }

        if t == T::zero() {
            return Ok(T::one());
        }

        let integrated = self.integrated_hazard(t)?;
        Ok((-integrated).exp())
    }
}

/// A flat (constant) hazard rate curve.
///
/// Useful for prototyping, testing, and when only a single CDS spread is
/// known.
///
/// # Mathematical Model
///
/// ```text
/// P(τ > t) = exp(-λ * t)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatHazardRateCurve<T: Float> {
    /// The constant hazard rate
    hazard_rate: T,
}

impl<T: Float> FlatHazardRateCurve<T> {
    /// Construct a flat hazard rate curve.
    #[inline]
    pub fn new(hazard_rate: T) -> Self {
        Self { hazard_rate }
    }

    /// Return the constant hazard rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.hazard_rate
    }
}

impl<T: Float> CreditCurve<T> for FlatHazardRateCurve<T> {
    fn hazard_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.hazard_rate)
    }

    fn survival_probability(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok((-self.hazard_rate * t).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    // ========================================
    // FlatHazardRateCurve Tests
    // ========================================

    #[test]
    fn test_flat_curve_survival_probability() {
        let curve = FlatHazardRateCurve::new(0.01_f64);
        let surv = curve.survival_probability(5.0).unwrap();
        assert_relative_eq!(surv, (-0.05_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_flat_curve_survival_at_zero() {
        let curve = FlatHazardRateCurve::new(0.02_f64);
        assert_relative_eq!(curve.survival_probability(0.0).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_curve_rejects_negative_time() {
        let curve = FlatHazardRateCurve::new(0.02_f64);
        assert!(curve.hazard_rate(-1.0).is_err());
        assert!(curve.survival_probability(-1.0).is_err());
    }

    #[test]
    fn test_flat_curve_survival_plus_default() {
        let curve = FlatHazardRateCurve::new(0.015_f64);
        let surv = curve.survival_probability(3.0).unwrap();
        let def = curve.default_probability(3.0).unwrap();
        assert_relative_eq!(surv + def, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_curve_default_density() {
        let curve = FlatHazardRateCurve::new(0.03_f64);
        let density = curve.default_density(2.0).unwrap();
        assert_relative_eq!(density, 0.03 * (-0.06_f64).exp(), epsilon = 1e-12);
    }

    // ========================================
    // HazardRateCurve Construction Tests
    // ========================================

    #[test]
    fn test_hazard_curve_new_valid() {
        let curve = HazardRateCurve::new(&[1.0_f64, 2.0, 5.0], &[0.01, 0.012, 0.015], false).unwrap();
        assert_eq!(curve.domain(), (1.0, 5.0));
        assert_eq!(curve.len(), 3);
        assert!(!curve.is_empty());
    }

    #[test]
    fn test_hazard_curve_new_insufficient_data() {
        let result = HazardRateCurve::new(&[1.0_f64], &[0.01], false);
        assert!(matches!(
            result.unwrap_err(),
            MarketDataError::InsufficientData { got: 1, need: 2 }
        ));
    }

    #[test]
    fn test_hazard_curve_new_unsorted_tenors() {
        let result = HazardRateCurve::new(&[2.0_f64, 1.0, 5.0], &[0.01, 0.012, 0.015], false);
        assert!(result.is_err());
    }

    #[test]
    fn test_hazard_curve_new_negative_hazard_rate() {
        let result = HazardRateCurve::new(&[1.0_f64, 2.0], &[0.01, -0.005], false);
        assert!(result.is_err());
    }

    #[test]
    fn test_hazard_curve_accepts_zero_anchor_tenor() {
        let curve = HazardRateCurve::new(&[0.0_f64, 1.0, 2.0], &[0.0, 0.02, 0.04], true).unwrap();
        assert_relative_eq!(curve.survival_probability(0.0).unwrap(), 1.0, epsilon = 1e-12);
    }

    // ========================================
    // HazardRateCurve Survival Tests
    // ========================================

    #[test]
    fn test_hazard_curve_backward_flat_rate() {
        let curve = HazardRateCurve::new(&[1.0_f64, 3.0], &[0.01, 0.02], true).unwrap();

        // Rates are backward flat over (prev, tenor].
        assert_relative_eq!(curve.hazard_rate(0.5).unwrap(), 0.01, epsilon = 1e-12);
        assert_relative_eq!(curve.hazard_rate(1.0).unwrap(), 0.01, epsilon = 1e-12);
        assert_relative_eq!(curve.hazard_rate(2.0).unwrap(), 0.02, epsilon = 1e-12);
        assert_relative_eq!(curve.hazard_rate(10.0).unwrap(), 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_hazard_curve_survival_exact_piecewise_integral() {
        let curve = HazardRateCurve::new(&[1.0_f64, 3.0], &[0.01, 0.02], true).unwrap();

        // ∫₀² λ = 0.01 * 1 + 0.02 * 1
        let surv = curve.survival_probability(2.0).unwrap();
        assert_relative_eq!(surv, (-0.03_f64).exp(), epsilon = 1e-12);

        // Extrapolated: ∫₀⁵ λ = 0.01 + 0.02 * 2 + 0.02 * 2
        let surv = curve.survival_probability(5.0).unwrap();
        assert_relative_eq!(surv, (-0.09_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_hazard_curve_out_of_bounds_without_extrapolation() {
        let curve = HazardRateCurve::new(&[1.0_f64, 3.0], &[0.01, 0.02], false).unwrap();
        assert!(curve.survival_probability(5.0).is_err());
        assert!(curve.hazard_rate(5.0).is_err());
    }

    #[test]
    fn test_hazard_curve_default_probability_between() {
        let curve = HazardRateCurve::new(&[1.0_f64, 3.0, 5.0], &[0.01, 0.015, 0.02], true).unwrap();

        let s1 = curve.survival_probability(1.0).unwrap();
        let s2 = curve.survival_probability(2.0).unwrap();
        let dpd = curve.default_probability_between(1.0, 2.0).unwrap();

        assert_relative_eq!(dpd, s1 - s2, epsilon = 1e-12);
        assert!(dpd > 0.0);

        // Degenerate interval has zero mass.
        assert_relative_eq!(
            curve.default_probability_between(2.0, 2.0).unwrap(),
            0.0,
            epsilon = 1e-12
        );

        // Reversed interval is rejected.
        assert!(curve.default_probability_between(3.0, 1.0).is_err());
    }

    #[test]
    fn test_hazard_curve_survival_plus_default() {
        let curve = HazardRateCurve::new(&[1.0_f64, 3.0, 5.0], &[0.01, 0.015, 0.02], true).unwrap();

        for t in [1.0_f64, 2.0, 3.0, 4.0, 5.0] {
            let surv = curve.survival_probability(t).unwrap();
            let def = curve.default_probability(t).unwrap();
            assert_relative_eq!(surv + def, 1.0, epsilon = 1e-12);
        }
    }

    // ========================================
    // Property Tests
    // ========================================

    proptest! {
        #[test]
        fn prop_survival_non_increasing(
            t1 in 0.0_f64..20.0,
            dt in 0.0_f64..10.0,
            base in 0.0_f64..0.1,
            slope in 0.0_f64..0.05,
        ) {
            let tenors = [1.0_f64, 3.0, 5.0, 10.0];
            let rates: Vec<f64> = (0..4).map(|i| base + slope * i as f64).collect();
            let curve = HazardRateCurve::new(&tenors, &rates, true).unwrap();

            let s1 = curve.survival_probability(t1).unwrap();
            let s2 = curve.survival_probability(t1 + dt).unwrap();

            prop_assert!(s2 <= s1 + 1e-12);
            prop_assert!(s1 <= 1.0 && s1 > 0.0);
        }

        #[test]
        fn prop_interval_default_mass_non_negative(
            t1 in 0.0_f64..15.0,
            dt in 0.0_f64..5.0,
        ) {
            let curve = HazardRateCurve::new(&[1.0_f64, 5.0, 10.0], &[0.01, 0.02, 0.03], true).unwrap();
            let dpd = curve.default_probability_between(t1, t1 + dt).unwrap();
            prop_assert!(dpd >= -1e-12);
            prop_assert!(dpd <= 1.0);
        }
    }
}
