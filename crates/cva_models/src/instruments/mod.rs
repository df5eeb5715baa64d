//! Instrument definitions and valuation.

pub mod rates;

pub use rates::{swap_npv, FixingHistory, SwapDirection, VanillaSwap};
