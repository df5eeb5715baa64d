//! Vanilla interest rate swap definition.
//!
//! Swaps are described in year-fraction time from the as-of date. Schedules
//! are generated from an effective time, a maturity and per-leg period
//! lengths; accrual fractions follow directly from the period bounds.

use crate::error::ModelError;

/// Direction of the fixed leg from the holder's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapDirection {
    /// Pay fixed, receive floating.
    Payer,
    /// Receive fixed, pay floating.
    Receiver,
}

/// A fixed leg accrual period, paying at `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPeriod {
    /// Accrual start time (years)
    pub start: f64,
    /// Accrual end and payment time (years)
    pub end: f64,
}

/// A floating leg accrual period, fixing at `fixing` and paying at `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatPeriod {
    /// Rate fixing time (years)
    pub fixing: f64,
    /// Accrual start time (years)
    pub start: f64,
    /// Accrual end and payment time (years)
    pub end: f64,
}

/// A fixed-for-floating vanilla interest rate swap.
///
/// # Example
///
/// ```
/// use cva_models::instruments::{SwapDirection, VanillaSwap};
///
/// // 5y payer swap, annual fixed leg, semi-annual floating leg.
/// let swap = VanillaSwap::new(1_000_000.0, 0.03, SwapDirection::Payer, 0.0, 5.0, 1.0, 0.5)
///     .unwrap();
///
/// assert_eq!(swap.fixed_periods().len(), 5);
/// assert_eq!(swap.float_periods().len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct VanillaSwap {
    /// Notional amount
    notional: f64,
    /// Fixed leg rate
    fixed_rate: f64,
    /// Pay or receive fixed
    direction: SwapDirection,
    /// Fixed leg schedule
    fixed_periods: Vec<FixedPeriod>,
    /// Floating leg schedule
    float_periods: Vec<FloatPeriod>,
}

impl VanillaSwap {
    /// Construct a swap with regular schedules on both legs.
    ///
    /// # Arguments
    ///
    /// * `notional` - Notional amount (non-negative; use `direction` for the
    ///   position sign)
    /// * `fixed_rate` - Fixed leg rate
    /// * `direction` - Pay or receive fixed
    /// * `effective` - Schedule start time in years (>= 0)
    /// * `maturity` - Schedule end time in years (> effective)
    /// * `fixed_tenor` - Fixed leg period length in years (e.g. 1.0)
    /// * `float_tenor` - Floating leg period length in years (e.g. 0.5)
    ///
    /// A short final stub is generated when the tenor does not divide the
    /// schedule length evenly. Floating rate fixings occur at period start.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidParameter`] for non-finite inputs,
    /// negative notional or effective time, non-positive tenors, or a
    /// maturity at or before the effective time.
    pub fn new(
        notional: f64,
        fixed_rate: f64,
        direction: SwapDirection,
        effective: f64,
        maturity: f64,
        fixed_tenor: f64,
        float_tenor: f64,
    ) -> Result<Self, ModelError> {
        if !notional.is_finite() || notional < 0.0 {
            return Err(ModelError::InvalidParameter(format!(
                "Notional must be non-negative and finite, got {}",
                notional
            )));
        }
        if !fixed_rate.is_finite() {
            return Err(ModelError::InvalidParameter(
                "Fixed rate must be finite".to_string(),
            ));
        }
        if !effective.is_finite() || effective < 0.0 {
            return Err(ModelError::InvalidParameter(format!(
                "Effective time must be non-negative, got {}",
                effective
            )));
        }
        if !maturity.is_finite() || maturity <= effective {
            return Err(ModelError::InvalidParameter(format!(
                "Maturity {} must be after effective time {}",
                maturity, effective
            )));
        }
        if !(fixed_tenor > 0.0) || !(float_tenor > 0.0) {
            return Err(ModelError::InvalidParameter(
                "Period lengths must be strictly positive".to_string(),
            ));
        }

        let fixed_periods = build_schedule(effective, maturity, fixed_tenor)
            .into_iter()
            .map(|(start, end)| FixedPeriod { start, end })
            .collect();
        let float_periods = build_schedule(effective, maturity, float_tenor)
            .into_iter()
            .map(|(start, end)| FloatPeriod {
                fixing: start,
                start,
                end,
            })
            .collect();

        Ok(Self {
            notional,
            fixed_rate,
            direction,
            fixed_periods,
            float_periods,
        })
    }

    /// Return the notional amount.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Return the fixed leg rate.
    #[inline]
    pub fn fixed_rate(&self) -> f64 {
        self.fixed_rate
    }

    /// Return the swap direction.
    #[inline]
    pub fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Return the fixed leg schedule.
    #[inline]
    pub fn fixed_periods(&self) -> &[FixedPeriod] {
        &self.fixed_periods
    }

    /// Return the floating leg schedule.
    #[inline]
    pub fn float_periods(&self) -> &[FloatPeriod] {
        &self.float_periods
    }

    /// Return the schedule start time.
    #[inline]
    pub fn effective(&self) -> f64 {
        self.float_periods[0].start
    }

    /// Return the final payment time.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.float_periods[self.float_periods.len() - 1].end
    }

    /// Return the floating leg fixing times in schedule order.
    pub fn fixing_times(&self) -> Vec<f64> {
        self.float_periods.iter().map(|p| p.fixing).collect()
    }
}

/// Generate regular (start, end) periods from `effective` to `maturity`,
/// with a short final stub when the tenor does not divide evenly.
fn build_schedule(effective: f64, maturity: f64, tenor: f64) -> Vec<(f64, f64)> {
    // Guards against a spurious stub from accumulated rounding.
    const STUB_TOLERANCE: f64 = 1e-9;

    let mut periods = Vec::new();
    let mut start = effective;
    let mut i = 1usize;
    while start < maturity - STUB_TOLERANCE {
        let end = (effective + tenor * i as f64).min(maturity);
        periods.push((start, end));
        start = end;
        i += 1;
    }
    periods
}
