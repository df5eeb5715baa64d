//! Model dynamics and instrument definitions for exposure simulation.
//!
//! This crate provides:
//!
//! - [`models`]: The single-factor Gaussian short-rate model with analytic
//!   transition moments and zero-coupon bond reconstitution
//! - [`instruments`]: Vanilla interest rate swaps with schedule generation,
//!   fixing history and curve-based valuation
//!
//! Everything is expressed in year-fraction time measured from the
//! simulation as-of date.

pub mod error;
pub mod instruments;
pub mod models;

pub use error::ModelError;
