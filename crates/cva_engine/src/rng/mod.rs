//! Random number generation for the simulation engine.

mod prng;

pub use prng::PathGenerator;
