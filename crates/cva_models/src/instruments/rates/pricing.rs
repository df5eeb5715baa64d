//! Swap valuation against a discount curve and a fixing history.
//!
//! Valuation is performed relative to an observation time `as_of`: the
//! supplied curve is read at offsets from `as_of`, so the same code prices
//! against the initial curve (as_of = 0) and against simulated node curves
//! (as_of = node time, curve over pillar offsets).

use crate::error::ModelError;
use crate::instruments::rates::swap::{SwapDirection, VanillaSwap};
use cva_core::market_data::curves::YieldCurve;
use cva_core::market_data::MarketDataError;

/// Tolerance used to match fixing times on the simulation grid.
pub const FIXING_TIME_TOLERANCE: f64 = 1e-9;

/// Recorded floating rate fixings for one simulation path.
///
/// Fixings are keyed by fixing time with a small matching tolerance, so
/// grid times that differ only by floating-point noise resolve to the same
/// entry. The history is append-only per path and never shared between
/// paths.
#[derive(Debug, Clone, Default)]
pub struct FixingHistory {
    /// (fixing time, simple rate) pairs, sorted by time
    entries: Vec<(f64, f64)>,
}

impl FixingHistory {
    /// Create an empty fixing history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fixing. An existing entry at the same time (within
    /// tolerance) is overwritten.
    pub fn record(&mut self, t: f64, rate: f64) {
        let pos = self.entries.partition_point(|&(ti, _)| ti < t - FIXING_TIME_TOLERANCE);
        if pos < self.entries.len() && (self.entries[pos].0 - t).abs() <= FIXING_TIME_TOLERANCE {
            self.entries[pos].1 = rate;
        } else {
            self.entries.insert(pos, (t, rate));
        }
    }

    /// Look up the fixing recorded at time `t`, within tolerance.
    pub fn get(&self, t: f64) -> Option<f64> {
        let pos = self.entries.partition_point(|&(ti, _)| ti < t - FIXING_TIME_TOLERANCE);
        if pos < self.entries.len() && (self.entries[pos].0 - t).abs() <= FIXING_TIME_TOLERANCE {
            Some(self.entries[pos].1)
        } else {
            None
        }
    }

    /// Whether a fixing is recorded at time `t`.
    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        self.get(t).is_some()
    }

    /// Number of recorded fixings.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Simple-compounded forward rate over `[start, end]` seen from `as_of`.
///
/// ```text
/// L(as_of; start, end) = (P(start) / P(end) - 1) / (end - start)
/// ```
///
/// with discount factors read from the curve at offsets from `as_of`. A
/// start at or marginally before `as_of` (grid rounding) is clamped to the
/// observation time.
pub fn forward_rate<C: YieldCurve<f64>>(
    curve: &C,
    as_of: f64,
    start: f64,
    end: f64,
) -> Result<f64, MarketDataError> {
    if end <= start {
        return Err(MarketDataError::InvalidMaturity { t: end - start });
    }
    let tau = end - start;
    let df_start = curve.discount_factor((start - as_of).max(0.0))?;
    let df_end = curve.discount_factor(end - as_of)?;
    Ok((df_start / df_end - 1.0) / tau)
}

/// Net present value of a swap at observation time `as_of`.
///
/// Cashflows paying at or before `as_of` are excluded. Floating periods
/// whose fixing time is strictly in the past use the recorded fixing; a
/// period fixing at `as_of` or later is projected with [`forward_rate`] off
/// the same curve used for discounting, which at the fixing instant
/// coincides with the rate being set.
///
/// # Errors
///
/// Returns [`ModelError::MissingFixing`] when a past fixing is not in the
/// history, and propagates curve lookup failures.
pub fn swap_npv<C: YieldCurve<f64>>(
    swap: &VanillaSwap,
    curve: &C,
    as_of: f64,
    fixings: &FixingHistory,
) -> Result<f64, ModelError> {
    let mut fixed = 0.0;
    for p in swap.fixed_periods() {
        if p.end <= as_of + FIXING_TIME_TOLERANCE {
            continue;
        }
        let tau = p.end - p.start;
        let df = curve.discount_factor(p.end - as_of)?;
        fixed += swap.notional() * swap.fixed_rate() * tau * df;
    }

    let mut floating = 0.0;
    for p in swap.float_periods() {
        if p.end <= as_of + FIXING_TIME_TOLERANCE {
            continue;
        }
        let rate = if p.fixing < as_of - FIXING_TIME_TOLERANCE {
            fixings
                .get(p.fixing)
                .ok_or(ModelError::MissingFixing { t: p.fixing })?
        } else {
            forward_rate(curve, as_of, p.start, p.end)?
        };
        let tau = p.end - p.start;
        let df = curve.discount_factor(p.end - as_of)?;
        floating += swap.notional() * rate * tau * df;
    }

    Ok(match swap.direction() {
        SwapDirection::Payer => floating - fixed,
        SwapDirection::Receiver => fixed - floating,
    })
}
