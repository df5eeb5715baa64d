//! Interest rate models.

mod gaussian;

pub use gaussian::GaussianShortRateModel;
