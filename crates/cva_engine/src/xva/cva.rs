//! Credit Valuation Adjustment (CVA) calculation.
//!
//! CVA represents the expected loss due to counterparty default:
//!
//! ```text
//! CVA = (1 - R) × Σᵢ dEE(tᵢ) × ΔPD(tᵢ₋₁, tᵢ)
//! ```
//!
//! where R is the recovery rate, dEE the discounted expected exposure and
//! ΔPD(t₁, t₂) = P(τ > t₁) - P(τ > t₂) the default mass of each grid
//! interval. The sum weights each interval per the configured
//! [`IntegrationScheme`]; the right-point rule above is the default.

use crate::error::EngineError;
use crate::exposure::ExposureProfile;
use crate::xva::params::{CvaParams, IntegrationScheme};
use cva_core::market_data::curves::CreditCurve;

/// CVA together with its per-interval breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct CvaResult {
    /// The credit valuation adjustment
    pub cva: f64,
    /// Default mass ΔPD of each grid interval (length = nodes - 1)
    pub marginal_default: Vec<f64>,
    /// LGD-weighted loss contribution of each interval
    pub contributions: Vec<f64>,
}

/// Compute unilateral CVA from a discounted exposure profile and a credit
/// curve.
///
/// # Errors
///
/// Returns [`EngineError::Configuration`] when the profile has fewer than
/// two nodes, and propagates credit curve lookup failures.
///
/// # Examples
///
/// ```
/// use cva_core::market_data::curves::FlatHazardRateCurve;
/// use cva_engine::exposure::ExposureProfile;
/// use cva_engine::xva::{compute_cva, CvaParams};
///
/// let profile = ExposureProfile {
///     times: vec![0.0, 0.5, 1.0],
///     expected_exposure: vec![0.0, 100.0, 50.0],
///     discounted_exposure: vec![0.0, 98.0, 47.0],
/// };
/// let credit = FlatHazardRateCurve::new(0.02);
/// let cva = compute_cva(&profile, &credit, &CvaParams::new(0.4).unwrap()).unwrap();
/// assert!(cva > 0.0);
/// ```
pub fn compute_cva<C: CreditCurve<f64>>(
    profile: &ExposureProfile,
    credit_curve: &C,
    params: &CvaParams,
) -> Result<f64, EngineError> {
    Ok(compute_cva_detailed(profile, credit_curve, params)?.cva)
}

/// Compute unilateral CVA with its per-interval breakdown.
pub fn compute_cva_detailed<C: CreditCurve<f64>>(
    profile: &ExposureProfile,
    credit_curve: &C,
    params: &CvaParams,
) -> Result<CvaResult, EngineError> {
    let times = &profile.times;
    let dee = &profile.discounted_exposure;

    if times.len() < 2 || dee.len() != times.len() {
        return Err(EngineError::Configuration(format!(
            "Exposure profile must have at least 2 nodes, got {} times and {} exposures",
            times.len(),
            dee.len()
        )));
    }

    let lgd = params.lgd();
    let mut marginal_default = Vec::with_capacity(times.len() - 1);
    let mut contributions = Vec::with_capacity(times.len() - 1);
    let mut cva = 0.0;

    for i in 1..times.len() {
        let dpd = credit_curve.default_probability_between(times[i - 1], times[i])?;
        let exposure = match params.scheme() {
            IntegrationScheme::RightPoint => dee[i],
            IntegrationScheme::Trapezoid => 0.5 * (dee[i - 1] + dee[i]),
        };
        let contribution = lgd * exposure * dpd;
        marginal_default.push(dpd);
        contributions.push(contribution);
        cva += contribution;
    }

    Ok(CvaResult {
        cva,
        marginal_default,
        contributions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cva_core::market_data::curves::{FlatHazardRateCurve, HazardRateCurve};

    fn flat_profile(value: f64) -> ExposureProfile {
        let times: Vec<f64> = (0..5).map(|i| 0.25 * i as f64).collect();
        ExposureProfile {
            times: times.clone(),
            expected_exposure: vec![value; 5],
            discounted_exposure: vec![value; 5],
        }
    }

    #[test]
    fn test_cva_right_point_hand_computed() {
        let profile = flat_profile(100.0);
        let credit = FlatHazardRateCurve::new(0.02);
        let params = CvaParams::new(0.4).unwrap();

        let result = compute_cva_detailed(&profile, &credit, &params).unwrap();

        // Flat exposure: the sum telescopes to PD over the whole horizon.
        let expected = 0.6 * 100.0 * (1.0 - (-0.02_f64).exp());
        assert_relative_eq!(result.cva, expected, epsilon = 1e-12);
        assert_eq!(result.marginal_default.len(), 4);
        assert_eq!(result.contributions.len(), 4);
    }

    #[test]
    fn test_cva_zero_exposure_is_zero() {
        let profile = flat_profile(0.0);
        let credit = FlatHazardRateCurve::new(0.02);
        let params = CvaParams::new(0.4).unwrap();

        assert_eq!(compute_cva(&profile, &credit, &params).unwrap(), 0.0);
    }

    #[test]
    fn test_cva_scales_with_lgd() {
        let profile = flat_profile(100.0);
        let credit = FlatHazardRateCurve::new(0.02);

        let cva_r40 = compute_cva(&profile, &credit, &CvaParams::new(0.4).unwrap()).unwrap();
        let cva_r70 = compute_cva(&profile, &credit, &CvaParams::new(0.7).unwrap()).unwrap();

        assert_relative_eq!(cva_r40 / cva_r70, 0.6 / 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_cva_increases_with_hazard() {
        let profile = flat_profile(100.0);
        let params = CvaParams::new(0.4).unwrap();

        let cva_low =
            compute_cva(&profile, &FlatHazardRateCurve::new(0.01), &params).unwrap();
        let cva_high =
            compute_cva(&profile, &FlatHazardRateCurve::new(0.05), &params).unwrap();

        assert!(cva_high > cva_low);
    }

    #[test]
    fn test_trapezoid_vs_right_point_on_decaying_profile() {
        let profile = ExposureProfile {
            times: vec![0.0, 0.5, 1.0],
            expected_exposure: vec![100.0, 50.0, 0.0],
            discounted_exposure: vec![100.0, 50.0, 0.0],
        };
        let credit = FlatHazardRateCurve::new(0.02);

        let right = compute_cva(
            &profile,
            &credit,
            &CvaParams::with_scheme(0.4, IntegrationScheme::RightPoint).unwrap(),
        )
        .unwrap();
        let trap = compute_cva(
            &profile,
            &credit,
            &CvaParams::with_scheme(0.4, IntegrationScheme::Trapezoid).unwrap(),
        )
        .unwrap();

        // On a decaying profile the right-point rule undershoots the
        // trapezoidal average.
        assert!(right < trap);
        assert!(right >= 0.0);
    }

    #[test]
    fn test_cva_with_term_structure_credit() {
        let profile = flat_profile(100.0);
        let tenors: Vec<f64> = (0..=10).map(|i| i as f64).collect();
        let rates: Vec<f64> = (0..=10).map(|i| 0.02 * i as f64).collect();
        let credit = HazardRateCurve::new(&tenors, &rates, true).unwrap();
        let params = CvaParams::new(0.4).unwrap();

        let cva = compute_cva(&profile, &credit, &params).unwrap();
        assert!(cva > 0.0 && cva.is_finite());
    }

    #[test]
    fn test_degenerate_profile_rejected() {
        let profile = ExposureProfile {
            times: vec![0.0],
            expected_exposure: vec![1.0],
            discounted_exposure: vec![1.0],
        };
        let credit = FlatHazardRateCurve::new(0.02);
        let params = CvaParams::new(0.4).unwrap();

        assert!(matches!(
            compute_cva(&profile, &credit, &params).unwrap_err(),
            EngineError::Configuration(_)
        ));
    }
}
