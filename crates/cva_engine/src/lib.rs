//! Monte Carlo exposure simulation and CVA calculation.
//!
//! This crate drives the full pipeline:
//!
//! 1. [`simulation`]: Evolve the Gaussian short-rate state over a joint
//!    time grid, rebuild a discount curve at every (path, node) and value
//!    the portfolio into an NPV cube
//! 2. [`exposure`]: Net, floor, discount and average the cube into expected
//!    exposure profiles
//! 3. [`xva`]: Integrate the discounted profile against a credit curve to
//!    obtain CVA
//!
//! Runs are deterministic for a fixed seed and configuration: normal draws
//! are generated up front in path-major order by a single seeded generator,
//! and paths are then fanned out across threads with rayon.
//!
//! # Example
//!
//! ```
//! use cva_core::market_data::curves::{FlatCurve, FlatHazardRateCurve};
//! use cva_engine::simulation::{SimulationConfig, SimulationEngine};
//! use cva_engine::exposure::ExposureProfile;
//! use cva_engine::xva::{compute_cva, CvaParams};
//! use cva_models::instruments::{SwapDirection, VanillaSwap};
//!
//! let config = SimulationConfig {
//!     n_paths: 64,
//!     seed: 1,
//!     horizon: 3.0,
//!     step: 0.25,
//!     mean_reversion: 0.02,
//!     vol_times: vec![0.0],
//!     vol_values: vec![0.0075],
//!     pillars: vec![0.0, 0.5, 1.0, 2.0, 3.0, 5.0],
//! };
//!
//! let swap = VanillaSwap::new(1.0, 0.03, SwapDirection::Payer, 0.0, 3.0, 1.0, 0.5).unwrap();
//! let engine = SimulationEngine::new(config, FlatCurve::new(0.03)).unwrap();
//! let result = engine.run(&[swap]).unwrap();
//!
//! let profile = ExposureProfile::from_simulation(&result, engine.initial_curve()).unwrap();
//! let cva = compute_cva(&profile, &FlatHazardRateCurve::new(0.02), &CvaParams::new(0.4).unwrap()).unwrap();
//! assert!(cva >= 0.0);
//! ```

pub mod error;
pub mod exposure;
pub mod rng;
pub mod simulation;
pub mod xva;

pub use error::EngineError;
