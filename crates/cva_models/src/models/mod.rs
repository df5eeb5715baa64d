//! Model dynamics.

pub mod rates;

pub use rates::GaussianShortRateModel;
