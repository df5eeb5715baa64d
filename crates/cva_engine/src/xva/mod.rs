//! Credit valuation adjustment.

mod cva;
mod params;

pub use cva::{compute_cva, compute_cva_detailed, CvaResult};
pub use params::{CvaParams, IntegrationScheme};
