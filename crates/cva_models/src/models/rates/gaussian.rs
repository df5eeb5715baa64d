//! Single-factor Gaussian short-rate model.
//!
//! The short rate is decomposed as r(t) = f(0, t) + x(t), where f(0, t) is
//! the instantaneous forward rate of the initial curve and the state
//! variable x follows
//!
//! ```text
//! dx(t) = -a x(t) dt + σ(t) dW(t),    x(0) = 0
//! ```
//!
//! with constant mean reversion a > 0 and piecewise-constant volatility
//! σ(t). The transition distribution of x is Gaussian with closed-form
//! mean and variance, so paths can be sampled exactly on any time grid.
//! Zero-coupon bond prices conditional on the state are available in
//! closed form and automatically reprice the initial curve.

use crate::error::ModelError;
use cva_core::market_data::curves::YieldCurve;

/// Single-factor Gaussian short-rate model with piecewise-constant
/// volatility.
///
/// The model is parameterised by:
///
/// - `mean_reversion` - The constant mean reversion speed a (must be > 0)
/// - `vol_times` / `vol_values` - Piecewise-constant volatility: the value
///   `vol_values[i]` applies on `[vol_times[i], vol_times[i+1])`, with the
///   last value extending to infinity. The first knot must be 0.
/// - `curve` - The initial discount curve P(0, ·)
///
/// # Example
///
/// ```
/// use cva_core::market_data::curves::{FlatCurve, YieldCurve};
/// use cva_models::models::GaussianShortRateModel;
///
/// let curve = FlatCurve::new(0.03_f64);
/// let model = GaussianShortRateModel::with_constant_volatility(0.02, 0.0075, curve).unwrap();
///
/// // At y = 0 and t = 0 the model reprices the initial curve.
/// let p = model.zerobond(5.0, 0.0, 0.0).unwrap();
/// assert!((p - (-0.15_f64).exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct GaussianShortRateModel<C> {
    /// Mean reversion speed a
    mean_reversion: f64,
    /// Volatility knot times (first knot is 0)
    vol_times: Vec<f64>,
    /// Volatility value applying from each knot
    vol_values: Vec<f64>,
    /// Initial discount curve
    curve: C,
}

impl<C: YieldCurve<f64>> GaussianShortRateModel<C> {
    /// Construct a model with piecewise-constant volatility.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidParameter`] when the mean reversion is
    /// not strictly positive, the knot times are not strictly increasing
    /// from 0, or any volatility value is negative or non-finite.
    pub fn new(
        mean_reversion: f64,
        vol_times: Vec<f64>,
        vol_values: Vec<f64>,
        curve: C,
    ) -> Result<Self, ModelError> {
        if !mean_reversion.is_finite() || mean_reversion <= 0.0 {
            return Err(ModelError::InvalidParameter(format!(
                "Mean reversion must be strictly positive, got {}",
                mean_reversion
            )));
        }

        if vol_times.is_empty() {
            return Err(ModelError::InvalidParameter(
                "At least one volatility knot is required".to_string(),
            ));
        }

        if vol_times[0] != 0.0 {
            return Err(ModelError::InvalidParameter(format!(
                "First volatility knot must be 0, got {}",
                vol_times[0]
            )));
        }

        for i in 1..vol_times.len() {
            if !vol_times[i].is_finite() || vol_times[i] <= vol_times[i - 1] {
                return Err(ModelError::InvalidParameter(format!(
                    "Volatility knots must be strictly increasing, got {} after {}",
                    vol_times[i],
                    vol_times[i - 1]
                )));
            }
        }

        if vol_values.len() != vol_times.len() {
            return Err(ModelError::InvalidParameter(format!(
                "Volatility knots and values must have same length: got {} and {}",
                vol_times.len(),
                vol_values.len()
            )));
        }

        for &v in &vol_values {
            if !v.is_finite() || v < 0.0 {
                return Err(ModelError::InvalidParameter(format!(
                    "Volatility must be non-negative and finite, got {}",
                    v
                )));
            }
        }

        Ok(Self {
            mean_reversion,
            vol_times,
            vol_values,
            curve,
        })
    }

    /// Construct a model with a single constant volatility.
    pub fn with_constant_volatility(
        mean_reversion: f64,
        volatility: f64,
        curve: C,
    ) -> Result<Self, ModelError> {
        Self::new(mean_reversion, vec![0.0], vec![volatility], curve)
    }

    /// Return the mean reversion speed.
    #[inline]
    pub fn mean_reversion(&self) -> f64 {
        self.mean_reversion
    }

    /// Return the volatility applying at time `t`.
    #[inline]
    pub fn volatility(&self, t: f64) -> f64 {
        self.vol_values[self.knot_index(t)]
    }

    /// Return the initial discount curve.
    #[inline]
    pub fn initial_curve(&self) -> &C {
        &self.curve
    }

    /// Index of the volatility segment containing time `t`.
    #[inline]
    fn knot_index(&self, t: f64) -> usize {
        self.vol_times.partition_point(|&k| k <= t).saturating_sub(1)
    }

    /// Accumulate `f(u0, u1, σ)` over the volatility segments covering
    /// `[lo, hi]`.
    fn accumulate<F>(&self, lo: f64, hi: f64, f: F) -> f64
    where
        F: Fn(f64, f64, f64) -> f64,
    {
        let n = self.vol_times.len();
        let mut total = 0.0;
        let mut u0 = lo;
        while u0 < hi {
            let idx = self.knot_index(u0);
            let u1 = if idx + 1 < n {
                self.vol_times[idx + 1].min(hi)
            } else {
                hi
            };
            total += f(u0, u1, self.vol_values[idx]);
            u0 = u1;
        }
        total
    }

    /// Drift integral α(t) = ∫₀ᵗ σ(u)² e⁻ᵃ⁽ᵗ⁻ᵘ⁾ (1 - e⁻ᵃ⁽ᵗ⁻ᵘ⁾) / a du.
    ///
    /// The state mean under the time-0 forward measure is
    /// E[x(t) | x(s)] = x(s) e⁻ᵃ⁽ᵗ⁻ˢ⁾ + α(t) - α(s) e⁻ᵃ⁽ᵗ⁻ˢ⁾.
    fn alpha(&self, t: f64) -> f64 {
        let a = self.mean_reversion;
        self.accumulate(0.0, t, |u0, u1, sigma| {
            let single = ((-a * (t - u1)).exp() - (-a * (t - u0)).exp()) / a;
            let double = ((-2.0 * a * (t - u1)).exp() - (-2.0 * a * (t - u0)).exp()) / (2.0 * a);
            sigma * sigma / a * (single - double)
        })
    }

    /// Conditional mean of the state: E[x(t0 + dt) | x(t0) = x0].
    pub fn expectation(&self, t0: f64, x0: f64, dt: f64) -> f64 {
        let decay = (-self.mean_reversion * dt).exp();
        x0 * decay + self.alpha(t0 + dt) - self.alpha(t0) * decay
    }

    /// Conditional variance of the state over `[t0, t0 + dt]`:
    ///
    /// ```text
    /// Var[x(t0 + dt) | x(t0)] = ∫ σ(u)² e⁻²ᵃ⁽ᵗ¹⁻ᵘ⁾ du,    t1 = t0 + dt
    /// ```
    pub fn variance(&self, t0: f64, dt: f64) -> f64 {
        let a = self.mean_reversion;
        let t1 = t0 + dt;
        self.accumulate(t0, t1, |u0, u1, sigma| {
            sigma * sigma * ((-2.0 * a * (t1 - u1)).exp() - (-2.0 * a * (t1 - u0)).exp())
                / (2.0 * a)
        })
    }

    /// Conditional standard deviation of the state over `[t0, t0 + dt]`.
    #[inline]
    pub fn std_deviation(&self, t0: f64, dt: f64) -> f64 {
        self.variance(t0, dt).sqrt()
    }

    /// Zero-coupon bond price P(t, maturity) conditional on the normalised
    /// state `y` at observation time `t`.
    ///
    /// The state is recovered as x = y · Std[x(t)] + E[x(t)], and the bond
    /// price is
    ///
    /// ```text
    /// P(t, T) = P(0, T) / P(0, t) · exp(-B(t, T) x - ½ B(t, T)² φ(t))
    /// ```
    ///
    /// where B(t, T) = (1 - e⁻ᵃ⁽ᵀ⁻ᵗ⁾) / a and φ(t) = Var[x(t)].
    ///
    /// At t = 0 (or y = 0 with zero accumulated variance) this reprices the
    /// initial curve exactly, and P(t, t) = 1 for any state.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidBondMaturity`] if `maturity < t` or
    /// `t < 0`, and propagates initial curve lookup failures.
    pub fn zerobond(&self, maturity: f64, t: f64, y: f64) -> Result<f64, ModelError> {
        if t < 0.0 || maturity < t {
            return Err(ModelError::InvalidBondMaturity { t, maturity });
        }

        let a = self.mean_reversion;
        let phi = self.variance(0.0, t);
        let x = y * phi.sqrt() + self.expectation(0.0, 0.0, t);
        let b = (1.0 - (-a * (maturity - t)).exp()) / a;

        let p0_maturity = self.curve.discount_factor(maturity)?;
        let p0_t = self.curve.discount_factor(t)?;

        Ok(p0_maturity / p0_t * (-b * x - 0.5 * b * b * phi).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cva_core::market_data::curves::FlatCurve;
    use proptest::prelude::*;

    fn flat_model(a: f64, sigma: f64) -> GaussianShortRateModel<FlatCurve<f64>> {
        GaussianShortRateModel::with_constant_volatility(a, sigma, FlatCurve::new(0.03)).unwrap()
    }

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_new_rejects_non_positive_mean_reversion() {
        let curve = FlatCurve::new(0.03);
        assert!(GaussianShortRateModel::with_constant_volatility(0.0, 0.01, curve).is_err());

        let curve = FlatCurve::new(0.03);
        assert!(GaussianShortRateModel::with_constant_volatility(-0.1, 0.01, curve).is_err());
    }

    #[test]
    fn test_new_rejects_negative_volatility() {
        let curve = FlatCurve::new(0.03);
        assert!(GaussianShortRateModel::with_constant_volatility(0.02, -0.01, curve).is_err());
    }

    #[test]
    fn test_new_accepts_zero_volatility() {
        let model = flat_model(0.02, 0.0);
        assert_eq!(model.volatility(1.0), 0.0);
    }

    #[test]
    fn test_new_rejects_bad_knots() {
        let curve = FlatCurve::new(0.03);
        // First knot must be zero.
        assert!(
            GaussianShortRateModel::new(0.02, vec![1.0], vec![0.01], curve).is_err()
        );

        let curve = FlatCurve::new(0.03);
        // Knots must be strictly increasing.
        assert!(
            GaussianShortRateModel::new(0.02, vec![0.0, 2.0, 1.0], vec![0.01; 3], curve).is_err()
        );

        let curve = FlatCurve::new(0.03);
        // Lengths must match.
        assert!(
            GaussianShortRateModel::new(0.02, vec![0.0, 1.0], vec![0.01], curve).is_err()
        );
    }

    #[test]
    fn test_volatility_lookup_piecewise() {
        let curve = FlatCurve::new(0.03);
        let model =
            GaussianShortRateModel::new(0.02, vec![0.0, 1.0, 3.0], vec![0.005, 0.0075, 0.01], curve)
                .unwrap();

        assert_eq!(model.volatility(0.0), 0.005);
        assert_eq!(model.volatility(0.5), 0.005);
        assert_eq!(model.volatility(1.0), 0.0075);
        assert_eq!(model.volatility(2.5), 0.0075);
        assert_eq!(model.volatility(10.0), 0.01);
    }

    // ========================================
    // Moment Tests
    // ========================================

    #[test]
    fn test_variance_constant_volatility_closed_form() {
        let (a, sigma) = (0.02, 0.0075);
        let model = flat_model(a, sigma);

        for t in [0.5_f64, 1.0, 2.0, 5.0, 10.0] {
            let expected = sigma * sigma * (1.0 - (-2.0 * a * t).exp()) / (2.0 * a);
            assert_relative_eq!(model.variance(0.0, t), expected, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_expectation_constant_volatility_closed_form() {
        let (a, sigma) = (0.05, 0.01);
        let model = flat_model(a, sigma);

        // α(t) = σ²/(2a²) (1 - e⁻ᵃᵗ)² for constant σ.
        for t in [0.5_f64, 1.0, 3.0, 7.0] {
            let expected = sigma * sigma / (2.0 * a * a) * (1.0 - (-a * t).exp()).powi(2);
            assert_relative_eq!(model.expectation(0.0, 0.0, t), expected, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_expectation_zero_volatility_pure_decay() {
        let model = flat_model(0.1, 0.0);
        let x0 = 0.02;
        let dt = 1.5;
        assert_relative_eq!(
            model.expectation(2.0, x0, dt),
            x0 * (-0.1 * dt).exp(),
            epsilon = 1e-14
        );
        assert_eq!(model.std_deviation(2.0, dt), 0.0);
    }

    #[test]
    fn test_variance_piecewise_matches_segment_sum() {
        let curve = FlatCurve::new(0.03);
        let a = 0.02;
        let model =
            GaussianShortRateModel::new(a, vec![0.0, 1.0], vec![0.005, 0.01], curve).unwrap();

        // Var over [0, 2] split at the knot.
        let t1 = 2.0;
        let seg1 = 0.005 * 0.005 * ((-2.0 * a * (t1 - 1.0)).exp() - (-2.0 * a * t1).exp())
            / (2.0 * a);
        let seg2 = 0.01 * 0.01 * (1.0 - (-2.0 * a * 1.0).exp()) / (2.0 * a);
        assert_relative_eq!(model.variance(0.0, 2.0), seg1 + seg2, epsilon = 1e-14);
    }

    // ========================================
    // Zero-Coupon Bond Tests
    // ========================================

    #[test]
    fn test_zerobond_reprices_initial_curve() {
        let model = flat_model(0.02, 0.0075);
        for maturity in [0.5_f64, 1.0, 2.0, 5.0, 10.0] {
            let p = model.zerobond(maturity, 0.0, 0.0).unwrap();
            assert_relative_eq!(p, (-0.03 * maturity).exp(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zerobond_at_own_maturity_is_one() {
        let model = flat_model(0.02, 0.0075);
        for y in [-2.0_f64, 0.0, 1.5] {
            let p = model.zerobond(3.0, 3.0, y).unwrap();
            assert_relative_eq!(p, 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_zerobond_rejects_maturity_before_observation() {
        let model = flat_model(0.02, 0.0075);
        assert!(matches!(
            model.zerobond(1.0, 2.0, 0.0).unwrap_err(),
            ModelError::InvalidBondMaturity { .. }
        ));
        assert!(model.zerobond(1.0, -0.5, 0.0).is_err());
    }

    #[test]
    fn test_zerobond_monotone_in_state() {
        // Higher state means higher rates, so lower bond prices.
        let model = flat_model(0.02, 0.0075);
        let p_low = model.zerobond(5.0, 1.0, -1.0).unwrap();
        let p_mid = model.zerobond(5.0, 1.0, 0.0).unwrap();
        let p_high = model.zerobond(5.0, 1.0, 1.0).unwrap();
        assert!(p_low > p_mid);
        assert!(p_mid > p_high);
    }

    #[test]
    fn test_zerobond_zero_volatility_is_forward_curve() {
        let model = flat_model(0.02, 0.0);
        let p = model.zerobond(5.0, 2.0, 0.0).unwrap();
        // P(0, 5) / P(0, 2) on the flat curve.
        assert_relative_eq!(p, (-0.03 * 3.0_f64).exp(), epsilon = 1e-12);
    }

    // ========================================
    // Property Tests
    // ========================================

    proptest! {
        #[test]
        fn prop_variance_tower_identity(
            s in 0.1_f64..5.0,
            d in 0.1_f64..5.0,
        ) {
            let a = 0.02;
            let model = flat_model(a, 0.0075);
            let lhs = model.variance(0.0, s + d);
            let rhs = model.variance(0.0, s) * (-2.0 * a * d).exp() + model.variance(s, d);
            prop_assert!((lhs - rhs).abs() < 1e-14);
        }

        #[test]
        fn prop_zerobond_positive_and_finite(
            t in 0.0_f64..6.0,
            tenor in 0.0_f64..10.0,
            y in -4.0_f64..4.0,
        ) {
            let model = flat_model(0.02, 0.0075);
            let p = model.zerobond(t + tenor, t, y).unwrap();
            prop_assert!(p.is_finite());
            prop_assert!(p > 0.0);
        }
    }
}
