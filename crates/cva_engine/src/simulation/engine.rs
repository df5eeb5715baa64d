//! The Monte Carlo exposure simulation engine.

use crate::error::EngineError;
use crate::rng::PathGenerator;
use crate::simulation::config::SimulationConfig;
use crate::simulation::grid::TimeGrid;
use cva_core::market_data::curves::{DiscountFactorCurve, YieldCurve};
use cva_models::instruments::rates::{forward_rate, FIXING_TIME_TOLERANCE};
use cva_models::instruments::{swap_npv, FixingHistory, VanillaSwap};
use cva_models::models::GaussianShortRateModel;
use rayon::prelude::*;
use tracing::debug;

/// Output of one simulation run.
///
/// All cubes are indexed path-major: `zero_bonds[p][i][k]` is the zero-bond
/// price on path `p` at grid node `i` for pillar offset `k`, and
/// `npvs[p][i][j]` the value of instrument `j` seen from node `i`.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// The joint simulation time grid
    pub time_grid: TimeGrid,
    /// State variable x per path and node
    pub states: Vec<Vec<f64>>,
    /// Normalised state y = (x - E[x]) / Std[x] per path and node
    pub normalized: Vec<Vec<f64>>,
    /// Zero-bond prices per path, node and pillar offset
    pub zero_bonds: Vec<Vec<Vec<f64>>>,
    /// Instrument values per path, node and instrument
    pub npvs: Vec<Vec<Vec<f64>>>,
    /// Portfolio value (sum over instruments) per path and node
    pub netted: Vec<Vec<f64>>,
}

impl SimulationResult {
    /// Number of simulated paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.states.len()
    }

    /// Number of grid nodes.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.time_grid.len()
    }

    /// Net portfolio value per path and node, discounted to time 0.
    ///
    /// Applies the deterministic discount factors P(0, tᵢ) of the given
    /// curve (normally the engine's initial curve) to every path, yielding
    /// the per-path discounted exposure paths before flooring and
    /// averaging.
    ///
    /// # Errors
    ///
    /// Propagates discount factor lookup failures.
    pub fn discounted_netted<C: YieldCurve<f64>>(
        &self,
        discount_curve: &C,
    ) -> Result<Vec<Vec<f64>>, EngineError> {
        let discount_factors: Result<Vec<f64>, _> = self
            .time_grid
            .times()
            .iter()
            .map(|&t| discount_curve.discount_factor(t))
            .collect();
        let discount_factors = discount_factors?;

        Ok(self
            .netted
            .iter()
            .map(|path| {
                path.iter()
                    .zip(discount_factors.iter())
                    .map(|(v, df)| v * df)
                    .collect()
            })
            .collect())
    }
}

/// Build the discount curve seen from one grid node out of its zero-bond
/// pillar prices.
///
/// A pure function of its inputs: `zero_bonds[k]` is the bond price for
/// pillar offset `pillars[k]`, so the resulting curve is read at offsets
/// from the node time.
///
/// # Errors
///
/// Propagates curve construction failures (too few pillars, unsorted
/// offsets, non-positive prices).
pub fn node_curve(
    pillars: &[f64],
    zero_bonds: &[f64],
) -> Result<DiscountFactorCurve<f64>, EngineError> {
    Ok(DiscountFactorCurve::new(pillars, zero_bonds)?)
}

/// Per-node model moments shared by all paths.
struct NodeMoments {
    /// Std of the transition into each node (index 0 unused)
    step_std: Vec<f64>,
    /// E[x(tᵢ)] from time 0
    total_mean: Vec<f64>,
    /// Std[x(tᵢ)] from time 0
    total_std: Vec<f64>,
}

/// Monte Carlo exposure simulation engine.
///
/// Owns the short-rate model (and through it the initial curve) together
/// with the run configuration. A run:
///
/// 1. Builds the joint time grid from the regular schedule and the
///    portfolio's fixing times
/// 2. Generates all normal draws up front from a single seeded generator,
///    path-major
/// 3. Evolves the state per path with exact Gaussian transitions, rebuilds
///    a discount curve from zero-bond pillars at every node, records
///    fixings as they occur and values every instrument
///
/// Paths are mutually independent and processed in parallel; results are
/// bit-identical across runs for a fixed seed and configuration.
#[derive(Debug)]
pub struct SimulationEngine<C> {
    config: SimulationConfig,
    model: GaussianShortRateModel<C>,
}

impl<C: YieldCurve<f64> + Sync> SimulationEngine<C> {
    /// Create an engine from a configuration and initial discount curve.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] for invalid engine settings
    /// and propagates model parameter validation failures.
    pub fn new(config: SimulationConfig, initial_curve: C) -> Result<Self, EngineError> {
        config.validate()?;
        let model = GaussianShortRateModel::new(
            config.mean_reversion,
            config.vol_times.clone(),
            config.vol_values.clone(),
            initial_curve,
        )?;
        Ok(Self { config, model })
    }

    /// Return the run configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Return the initial discount curve.
    #[inline]
    pub fn initial_curve(&self) -> &C {
        self.model.initial_curve()
    }

    /// Return the short-rate model.
    #[inline]
    pub fn model(&self) -> &GaussianShortRateModel<C> {
        &self.model
    }

    /// Run the simulation for a netting set of swaps.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] for an empty portfolio,
    /// [`EngineError::NumericalDegeneracy`] when a path produces a
    /// non-finite state, bond price or value, and propagates grid, model
    /// and curve failures.
    pub fn run(&self, portfolio: &[VanillaSwap]) -> Result<SimulationResult, EngineError> {
        if portfolio.is_empty() {
            return Err(EngineError::Configuration(
                "Portfolio must contain at least one instrument".to_string(),
            ));
        }

        let mut events = Vec::new();
        for swap in portfolio {
            events.extend(swap.fixing_times());
        }
        let grid = TimeGrid::build(self.config.horizon, self.config.step, &events)?;

        let n_paths = self.config.n_paths;
        let n_nodes = grid.len();
        let n_steps = n_nodes - 1;
        debug!(
            n_paths,
            n_nodes,
            instruments = portfolio.len(),
            seed = self.config.seed,
            "starting exposure simulation"
        );

        // All draws come from one seeded generator before the parallel
        // fan-out, in path-major order.
        let mut draws = vec![0.0; n_paths * n_steps];
        PathGenerator::from_seed(self.config.seed).fill_normal(&mut draws);

        let moments = self.node_moments(grid.times());

        let paths: Result<Vec<PathOutput>, EngineError> = (0..n_paths)
            .into_par_iter()
            .map(|p| {
                let path_draws = &draws[p * n_steps..(p + 1) * n_steps];
                self.simulate_path(p, grid.times(), path_draws, &moments, portfolio)
            })
            .collect();
        let paths = paths?;

        let mut result = SimulationResult {
            time_grid: grid,
            states: Vec::with_capacity(n_paths),
            normalized: Vec::with_capacity(n_paths),
            zero_bonds: Vec::with_capacity(n_paths),
            npvs: Vec::with_capacity(n_paths),
            netted: Vec::with_capacity(n_paths),
        };
        for path in paths {
            result.states.push(path.states);
            result.normalized.push(path.normalized);
            result.zero_bonds.push(path.zero_bonds);
            result.npvs.push(path.npvs);
            result.netted.push(path.netted);
        }

        debug!(n_paths = result.n_paths(), "simulation complete");
        Ok(result)
    }

    /// Precompute the transition and terminal moments at every grid node.
    fn node_moments(&self, times: &[f64]) -> NodeMoments {
        let n = times.len();
        let mut step_std = vec![0.0; n];
        let mut total_mean = vec![0.0; n];
        let mut total_std = vec![0.0; n];
        for i in 1..n {
            let dt = times[i] - times[i - 1];
            step_std[i] = self.model.std_deviation(times[i - 1], dt);
            total_mean[i] = self.model.expectation(0.0, 0.0, times[i]);
            total_std[i] = self.model.std_deviation(0.0, times[i]);
        }
        NodeMoments {
            step_std,
            total_mean,
            total_std,
        }
    }

    /// Evolve one path over the grid, rebuilding the discount curve and
    /// valuing the portfolio at every node.
    fn simulate_path(
        &self,
        path: usize,
        times: &[f64],
        draws: &[f64],
        moments: &NodeMoments,
        portfolio: &[VanillaSwap],
    ) -> Result<PathOutput, EngineError> {
        let n_nodes = times.len();
        let pillars = &self.config.pillars;

        let mut out = PathOutput::with_capacity(n_nodes);
        let mut fixings = FixingHistory::new();
        let mut x = 0.0;

        for i in 0..n_nodes {
            let t = times[i];

            if i > 0 {
                let dt = t - times[i - 1];
                x = self.model.expectation(times[i - 1], x, dt) + draws[i - 1] * moments.step_std[i];
                if !x.is_finite() {
                    return Err(EngineError::NumericalDegeneracy { path, step: i });
                }
            }

            // Deterministic at the first node; with zero accumulated
            // variance the state carries no information either.
            let y = if moments.total_std[i] > 0.0 {
                (x - moments.total_mean[i]) / moments.total_std[i]
            } else {
                0.0
            };

            let mut dfs = Vec::with_capacity(pillars.len());
            for &pillar in pillars {
                let z = self.model.zerobond(t + pillar, t, y)?;
                if !z.is_finite() || z <= 0.0 {
                    return Err(EngineError::NumericalDegeneracy { path, step: i });
                }
                dfs.push(z);
            }

            let curve = node_curve(pillars, &dfs)?;

            // Record any fixing occurring at this node before valuing, so
            // later nodes on this path see it.
            for swap in portfolio {
                for period in swap.float_periods() {
                    if (period.fixing - t).abs() <= FIXING_TIME_TOLERANCE
                        && !fixings.contains(period.fixing)
                    {
                        let rate = forward_rate(&curve, t, period.start, period.end)?;
                        fixings.record(period.fixing, rate);
                    }
                }
            }

            let mut net = 0.0;
            let mut node_npvs = Vec::with_capacity(portfolio.len());
            for swap in portfolio {
                let value = swap_npv(swap, &curve, t, &fixings)?;
                if !value.is_finite() {
                    return Err(EngineError::NumericalDegeneracy { path, step: i });
                }
                node_npvs.push(value);
                net += value;
            }

            out.states.push(x);
            out.normalized.push(y);
            out.zero_bonds.push(dfs);
            out.npvs.push(node_npvs);
            out.netted.push(net);
        }

        Ok(out)
    }
}

/// Per-path simulation output.
struct PathOutput {
    states: Vec<f64>,
    normalized: Vec<f64>,
    zero_bonds: Vec<Vec<f64>>,
    npvs: Vec<Vec<f64>>,
    netted: Vec<f64>,
}

impl PathOutput {
    fn with_capacity(n_nodes: usize) -> Self {
        Self {
            states: Vec::with_capacity(n_nodes),
            normalized: Vec::with_capacity(n_nodes),
            zero_bonds: Vec::with_capacity(n_nodes),
            npvs: Vec::with_capacity(n_nodes),
            netted: Vec::with_capacity(n_nodes),
        }
    }
}
