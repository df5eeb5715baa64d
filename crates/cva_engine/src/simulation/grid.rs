//! Simulation time grid construction.

use crate::error::EngineError;

/// Tolerance below which two grid times are considered identical.
const DEDUP_TOLERANCE: f64 = 1e-9;

/// The joint simulation time grid.
///
/// Built as the union of a regular grid (0, step, 2·step, ..., horizon) and
/// a set of event times (typically floating rate fixing times), sorted
/// ascending with near-duplicates removed. The first node is always 0.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    /// Sorted, deduplicated grid times starting at 0
    times: Vec<f64>,
}

impl TimeGrid {
    /// Build the grid from a regular schedule and event times.
    ///
    /// # Arguments
    ///
    /// * `horizon` - End of the regular grid in years (> 0)
    /// * `step` - Regular grid spacing in years (> 0)
    /// * `event_times` - Additional times to include (non-negative); events
    ///   beyond the horizon extend the grid
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DateRange`] for a non-positive horizon or
    /// step, or for negative or non-finite event times.
    pub fn build(horizon: f64, step: f64, event_times: &[f64]) -> Result<Self, EngineError> {
        if !horizon.is_finite() || horizon <= 0.0 {
            return Err(EngineError::DateRange(format!(
                "Horizon must be strictly positive, got {}",
                horizon
            )));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(EngineError::DateRange(format!(
                "Grid step must be strictly positive, got {}",
                step
            )));
        }

        let mut times = Vec::new();
        let mut i = 0usize;
        loop {
            let t = step * i as f64;
            if t >= horizon - DEDUP_TOLERANCE {
                break;
            }
            times.push(t);
            i += 1;
        }
        times.push(horizon);

        for &t in event_times {
            if !t.is_finite() || t < 0.0 {
                return Err(EngineError::DateRange(format!(
                    "Event time must be non-negative and finite, got {}",
                    t
                )));
            }
            times.push(t);
        }

        times.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        times.dedup_by(|a, b| (*a - *b).abs() <= DEDUP_TOLERANCE);

        Ok(Self { times })
    }

    /// Return the grid times.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Return the number of grid nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the grid has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Return the last grid time.
    #[inline]
    pub fn last(&self) -> f64 {
        self.times[self.times.len() - 1]
    }
}
