//! CVA calculation parameters.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// How the discounted exposure profile is weighted over each default
/// interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntegrationScheme {
    /// Weight each interval (tᵢ₋₁, tᵢ] by the exposure at its right
    /// endpoint dEE(tᵢ).
    #[default]
    RightPoint,
    /// Weight each interval by the trapezoidal average
    /// ½ (dEE(tᵢ₋₁) + dEE(tᵢ)).
    Trapezoid,
}

/// Counterparty parameters of the CVA calculation.
///
/// # Examples
///
/// ```
/// use cva_engine::xva::{CvaParams, IntegrationScheme};
///
/// let params = CvaParams::new(0.4).unwrap();
/// assert_eq!(params.lgd(), 0.6);
/// assert_eq!(params.scheme(), IntegrationScheme::RightPoint);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CvaParams {
    /// Recovery rate as a fraction in [0, 1]
    recovery_rate: f64,
    /// Integration scheme over default intervals
    scheme: IntegrationScheme,
}

impl CvaParams {
    /// Create parameters with the default right-point scheme.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] when the recovery rate lies
    /// outside [0, 1].
    pub fn new(recovery_rate: f64) -> Result<Self, EngineError> {
        Self::with_scheme(recovery_rate, IntegrationScheme::RightPoint)
    }

    /// Create parameters with an explicit integration scheme.
    pub fn with_scheme(
        recovery_rate: f64,
        scheme: IntegrationScheme,
    ) -> Result<Self, EngineError> {
        if !(0.0..=1.0).contains(&recovery_rate) {
            return Err(EngineError::Configuration(format!(
                "Recovery rate must be in [0, 1], got {}",
                recovery_rate
            )));
        }
        Ok(Self {
            recovery_rate,
            scheme,
        })
    }

    /// Return the recovery rate.
    #[inline]
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// Return the loss given default 1 - recovery.
    #[inline]
    pub fn lgd(&self) -> f64 {
        1.0 - self.recovery_rate
    }

    /// Return the integration scheme.
    #[inline]
    pub fn scheme(&self) -> IntegrationScheme {
        self.scheme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_recovery() {
        let params = CvaParams::new(0.4).unwrap();
        assert_eq!(params.recovery_rate(), 0.4);
        assert_eq!(params.lgd(), 0.6);
    }

    #[test]
    fn test_boundary_recoveries_allowed() {
        assert!(CvaParams::new(0.0).is_ok());
        assert!(CvaParams::new(1.0).is_ok());
    }

    #[test]
    fn test_invalid_recovery_rejected() {
        assert!(CvaParams::new(-0.1).is_err());
        assert!(CvaParams::new(1.5).is_err());
        assert!(CvaParams::new(f64::NAN).is_err());
    }

    #[test]
    fn test_default_scheme_is_right_point() {
        let params = CvaParams::new(0.4).unwrap();
        assert_eq!(params.scheme(), IntegrationScheme::RightPoint);

        let params = CvaParams::with_scheme(0.4, IntegrationScheme::Trapezoid).unwrap();
        assert_eq!(params.scheme(), IntegrationScheme::Trapezoid);
    }
}
