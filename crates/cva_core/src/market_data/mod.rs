//! Market data abstractions: yield curves and credit curves.

pub mod curves;
mod error;

pub use error::MarketDataError;
