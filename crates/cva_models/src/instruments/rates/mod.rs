//! Interest rate instruments.

mod pricing;
mod swap;

pub use pricing::{forward_rate, swap_npv, FixingHistory, FIXING_TIME_TOLERANCE};
pub use swap::{FixedPeriod, FloatPeriod, SwapDirection, VanillaSwap};
