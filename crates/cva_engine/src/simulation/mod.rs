//! Monte Carlo state evolution and portfolio valuation.

mod config;
mod engine;
mod grid;

pub use config::SimulationConfig;
pub use engine::{node_curve, SimulationEngine, SimulationResult};
pub use grid::TimeGrid;
