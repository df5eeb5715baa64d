//! Shared types for the core layer.

mod error;

pub use error::InterpolationError;
