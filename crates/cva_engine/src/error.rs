//! Engine error types.

use cva_core::market_data::MarketDataError;
use cva_models::ModelError;
use thiserror::Error;

/// Simulation and XVA engine errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Invalid engine configuration.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Invalid time or date range.
    #[error("Invalid date range: {0}")]
    DateRange(String),

    /// A non-finite or degenerate value was produced during simulation.
    #[error("Numerical degeneracy on path {path} at step {step}")]
    NumericalDegeneracy {
        /// Index of the offending path
        path: usize,
        /// Index of the offending grid step
        step: usize,
    },

    /// Model error.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Market data error.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
}
