//! Core market data and numerical primitives for exposure simulation.
//!
//! This crate provides the foundation layer shared by the model and engine
//! crates:
//!
//! - [`math`]: Interpolation utilities used by curve implementations
//! - [`market_data`]: Yield and credit curve abstractions
//! - [`types`]: Shared error types
//!
//! All curve implementations are generic over `T: num_traits::Float` so the
//! same code paths serve `f64` and `f32` without duplication.

pub mod market_data;
pub mod math;
pub mod types;

pub use market_data::MarketDataError;
