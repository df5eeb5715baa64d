//! Numerical utilities for curve construction.

pub mod interpolators;
