//! Model and instrument error types.

use cva_core::market_data::MarketDataError;
use thiserror::Error;

/// Model and instrument operation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Invalid model or instrument parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Bond maturity before the observation time.
    #[error("Invalid bond maturity: {maturity} is before observation time {t}")]
    InvalidBondMaturity {
        /// Observation time
        t: f64,
        /// Requested bond maturity
        maturity: f64,
    },

    /// A floating rate fixing was required but not recorded.
    #[error("Missing fixing at t = {t}")]
    MissingFixing {
        /// The fixing time that was not found
        t: f64,
    },

    /// Market data error.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
}
