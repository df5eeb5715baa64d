//! Exposure profile aggregation.
//!
//! Exposure is computed at the netting-set level: instrument values are
//! summed per (path, node) first, the net value is floored at zero, and the
//! floored exposure is discounted back with the initial curve before
//! averaging across paths.

use crate::error::EngineError;
use crate::simulation::{SimulationResult, TimeGrid};
use cva_core::market_data::curves::YieldCurve;
use rayon::prelude::*;

/// Expected exposure profiles over the simulation grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureProfile {
    /// Grid times in years
    pub times: Vec<f64>,
    /// Expected exposure EE(tᵢ) = E[max(V(tᵢ), 0)]
    pub expected_exposure: Vec<f64>,
    /// Discounted expected exposure dEE(tᵢ) = EE(tᵢ) · P(0, tᵢ)
    pub discounted_exposure: Vec<f64>,
}

impl ExposureProfile {
    /// Aggregate netted per-path values into exposure profiles.
    ///
    /// # Arguments
    ///
    /// * `netted` - Net portfolio value per path and node
    /// * `grid` - The simulation time grid
    /// * `discount_curve` - Curve supplying the deterministic discount
    ///   factors P(0, tᵢ), normally the engine's initial curve
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] when the inputs are empty or
    /// ragged, and propagates discount factor lookup failures.
    pub fn from_netted<C: YieldCurve<f64>>(
        netted: &[Vec<f64>],
        grid: &TimeGrid,
        discount_curve: &C,
    ) -> Result<Self, EngineError> {
        if netted.is_empty() {
            return Err(EngineError::Configuration(
                "At least one path is required".to_string(),
            ));
        }
        let n_nodes = grid.len();
        if netted.iter().any(|path| path.len() != n_nodes) {
            return Err(EngineError::Configuration(format!(
                "Each path must have {} node values",
                n_nodes
            )));
        }

        let n_paths = netted.len() as f64;
        let expected_exposure: Vec<f64> = (0..n_nodes)
            .into_par_iter()
            .map(|i| {
                netted.iter().map(|path| path[i].max(0.0)).sum::<f64>() / n_paths
            })
            .collect();

        let discount_factors: Result<Vec<f64>, _> = grid
            .times()
            .iter()
            .map(|&t| discount_curve.discount_factor(t))
            .collect();
        let discount_factors = discount_factors?;

        let discounted_exposure = expected_exposure
            .iter()
            .zip(discount_factors.iter())
            .map(|(ee, df)| ee * df)
            .collect();

        Ok(Self {
            times: grid.times().to_vec(),
            expected_exposure,
            discounted_exposure,
        })
    }

    /// Aggregate a simulation result into exposure profiles.
    pub fn from_simulation<C: YieldCurve<f64>>(
        result: &SimulationResult,
        discount_curve: &C,
    ) -> Result<Self, EngineError> {
        Self::from_netted(&result.netted, &result.time_grid, discount_curve)
    }

    /// Number of grid nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the profile is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Expected positive exposure: the time average of EE over the grid,
    /// trapezoidal.
    pub fn epe(&self) -> f64 {
        if self.times.len() < 2 {
            return self.expected_exposure.first().copied().unwrap_or(0.0);
        }
        let mut integral = 0.0;
        for i in 0..self.times.len() - 1 {
            let dt = self.times[i + 1] - self.times[i];
            integral += 0.5 * (self.expected_exposure[i] + self.expected_exposure[i + 1]) * dt;
        }
        let span = self.times[self.times.len() - 1] - self.times[0];
        integral / span
    }

    /// Maximum of the expected exposure profile.
    pub fn peak_exposure(&self) -> f64 {
        self.expected_exposure.iter().copied().fold(0.0, f64::max)
    }
}
