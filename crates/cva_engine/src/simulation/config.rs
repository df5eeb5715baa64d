//! Simulation configuration.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Configuration of a Monte Carlo exposure run.
///
/// Model parameters (`mean_reversion`, `vol_times`, `vol_values`) are
/// validated in depth by the model constructor; this type performs the
/// engine-level checks on grid and pillar layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of Monte Carlo paths
    pub n_paths: usize,
    /// Seed for the draw generator
    pub seed: u64,
    /// End of the regular time grid in years
    pub horizon: f64,
    /// Regular grid spacing in years
    pub step: f64,
    /// Mean reversion speed of the short-rate model
    pub mean_reversion: f64,
    /// Volatility knot times (first knot must be 0)
    pub vol_times: Vec<f64>,
    /// Volatility values applying from each knot
    pub vol_values: Vec<f64>,
    /// Zero-bond pillar offsets from each node time; must start at 0 and
    /// be strictly increasing
    pub pillars: Vec<f64>,
}

impl SimulationConfig {
    /// Validate the engine-level configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] on violation.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.n_paths == 0 {
            return Err(EngineError::Configuration(
                "At least one path is required".to_string(),
            ));
        }

        if self.pillars.len() < 2 {
            return Err(EngineError::Configuration(format!(
                "At least 2 pillar offsets are required, got {}",
                self.pillars.len()
            )));
        }
        if self.pillars[0] != 0.0 {
            return Err(EngineError::Configuration(format!(
                "First pillar offset must be 0, got {}",
                self.pillars[0]
            )));
        }
        for i in 1..self.pillars.len() {
            if !self.pillars[i].is_finite() || self.pillars[i] <= self.pillars[i - 1] {
                return Err(EngineError::Configuration(format!(
                    "Pillar offsets must be strictly increasing, got {} after {}",
                    self.pillars[i],
                    self.pillars[i - 1]
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> SimulationConfig {
        SimulationConfig {
            n_paths: 100,
            seed: 1,
            horizon: 6.0,
            step: 1.0 / 12.0,
            mean_reversion: 0.02,
            vol_times: vec![0.0],
            vol_values: vec![0.0075],
            pillars: vec![0.0, 0.5, 1.0, 2.0, 5.0, 10.0],
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_zero_paths_rejected() {
        let mut config = valid_config();
        config.n_paths = 0;
        assert!(matches!(
            config.validate().unwrap_err(),
            EngineError::Configuration(_)
        ));
    }

    #[test]
    fn test_pillars_must_start_at_zero() {
        let mut config = valid_config();
        config.pillars = vec![0.5, 1.0, 2.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pillars_must_be_increasing() {
        let mut config = valid_config();
        config.pillars = vec![0.0, 2.0, 1.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = valid_config();
        let json = serde_json::to_string(&config).unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
