//! Curve implementations for discounting and credit.
//!
//! This module provides:
//! - [`YieldCurve`]: Generic trait for discount factor lookups
//! - [`FlatCurve`]: Constant continuously-compounded zero rate
//! - [`DiscountFactorCurve`]: Log-linear interpolation over discount factor pillars
//! - [`CreditCurve`]: Generic trait for hazard rate and survival probability lookups
//! - [`HazardRateCurve`]: Piecewise-constant hazard rate term structure
//! - [`FlatHazardRateCurve`]: Constant hazard rate

mod credit;
mod discount;
mod flat;
mod traits;

pub use credit::{CreditCurve, FlatHazardRateCurve, HazardRateCurve};
pub use discount::DiscountFactorCurve;
pub use flat::FlatCurve;
pub use traits::YieldCurve;
