//! Bounded minimization
//!
//! This module wraps argmin's Nelder-Mead simplex solver behind a small
//! bounded-minimization interface. Bounds are enforced by clamping, and the
//! solver is restarted from its best vertex to escape premature collapse of
//! the simplex.

use argmin::core::{CostFunction, Executor, State, TerminationReason, TerminationStatus};
use argmin::solver::neldermead::NelderMead;
use pl_core::traits::LogDensityModel;
use pl_core::{Error, Result};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Configuration for the Nelder-Mead optimizer
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    /// Maximum number of iterations per simplex run
    pub max_iter: u64,
    /// Convergence tolerance on the standard deviation of simplex costs
    pub sd_tolerance: f64,
    /// Initial simplex edge, relative to `max(|x_i|, 1)`
    pub initial_step: f64,
    /// Extra simplex runs started from the best point found so far
    pub restarts: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self { max_iter: 5000, sd_tolerance: 1e-10, initial_step: 0.25, restarts: 3 }
    }
}

/// Result of optimization
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best-fit parameters
    pub parameters: Vec<f64>,
    /// Function value at minimum
    pub fval: f64,
    /// Number of iterations, summed over restarts
    pub n_iter: u64,
    /// Number of objective (cost) evaluations.
    pub n_fev: usize,
    /// Convergence status of the last simplex run
    pub converged: bool,
    /// Termination message
    pub message: String,
}

impl fmt::Display for OptimizationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OptimizationResult(fval={:.6}, n_iter={}, n_fev={}, converged={})",
            self.fval, self.n_iter, self.n_fev, self.converged
        )
    }
}

/// Objective function trait for optimization
pub trait ObjectiveFunction: Send + Sync {
    /// Evaluate function at given parameters
    fn eval(&self, params: &[f64]) -> Result<f64>;
}

/// Adapter exposing a [`LogDensityModel`] NLL as an objective.
pub(crate) struct ModelObjective<'a, M: ?Sized>(pub(crate) &'a M);

impl<M: LogDensityModel + Sync + ?Sized> ObjectiveFunction for ModelObjective<'_, M> {
    fn eval(&self, params: &[f64]) -> Result<f64> {
        let v = self.0.nll(params)?;
        // NaN would poison the simplex ordering.
        Ok(if v.is_nan() { f64::MAX } else { v })
    }
}

/// argmin cost adapter: clamps, counts evaluations, forwards to the objective
struct ArgminProblem<'a> {
    objective: &'a dyn ObjectiveFunction,
    bounds: &'a [(f64, f64)],
    n_fev: &'a AtomicUsize,
}

fn clamp_params(params: &[f64], bounds: &[(f64, f64)]) -> Vec<f64> {
    params.iter().zip(bounds.iter()).map(|(&v, &(lo, hi))| v.clamp(lo, hi)).collect()
}

impl CostFunction for ArgminProblem<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> std::result::Result<Self::Output, argmin::core::Error> {
        self.n_fev.fetch_add(1, Ordering::Relaxed);
        let clamped = clamp_params(params, self.bounds);
        self.objective.eval(&clamped).map_err(|e| argmin::core::Error::msg(e.to_string()))
    }
}

/// Nelder-Mead simplex optimizer with box constraints
pub struct NelderMeadOptimizer {
    config: OptimizerConfig,
}

impl NelderMeadOptimizer {
    /// Create new Nelder-Mead optimizer with given configuration
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Initial simplex: `init` plus one vertex per axis, stepping inward
    /// when a forward step would be clamped away.
    fn simplex(&self, init: &[f64], bounds: &[(f64, f64)]) -> Vec<Vec<f64>> {
        let mut vertices = Vec::with_capacity(init.len() + 1);
        vertices.push(init.to_vec());
        for (i, (&x, &(lo, hi))) in init.iter().zip(bounds.iter()).enumerate() {
            let step = self.config.initial_step * x.abs().max(1.0);
            let mut v = init.to_vec();
            v[i] = if x + step <= hi { x + step } else { (x - step).max(lo) };
            vertices.push(v);
        }
        vertices
    }

    /// Minimize `objective` from `init_params` inside the box `bounds`.
    ///
    /// Every evaluation sees the clamped point, and the returned parameters
    /// are clamped as well. After the first run the simplex is rebuilt around
    /// the best point up to `restarts` times, stopping early once a run no
    /// longer improves the optimum.
    pub fn minimize(
        &self,
        objective: &dyn ObjectiveFunction,
        init_params: &[f64],
        bounds: &[(f64, f64)],
    ) -> Result<OptimizationResult> {
        if init_params.len() != bounds.len() {
            return Err(Error::Validation(format!(
                "Parameter and bounds length mismatch: {} != {}",
                init_params.len(),
                bounds.len()
            )));
        }
        if init_params.is_empty() {
            return Err(Error::Validation("cannot optimize over zero parameters".to_string()));
        }

        let n_fev = AtomicUsize::new(0);
        let mut best = clamp_params(init_params, bounds);
        let mut fval = objective.eval(&best)?;
        let mut n_iter = 0;
        let mut converged = false;
        let mut message = String::new();

        for run in 0..=self.config.restarts {
            let problem = ArgminProblem { objective, bounds, n_fev: &n_fev };
            let solver = NelderMead::new(self.simplex(&best, bounds))
                .with_sd_tolerance(self.config.sd_tolerance)
                .map_err(|e| {
                    Error::Validation(format!("Invalid optimizer configuration (sd_tolerance): {e}"))
                })?;

            let res = Executor::new(problem, solver)
                .configure(|state| state.max_iters(self.config.max_iter))
                .run()
                .map_err(|e| Error::Computation(format!("Optimization failed: {}", e)))?;

            let state = res.state();
            let run_best = state
                .get_best_param()
                .ok_or_else(|| Error::Computation("No best parameters found".to_string()))?;
            let run_fval = state.get_best_cost();
            n_iter += state.get_iter();

            let termination = state.get_termination_status();
            converged = matches!(
                termination,
                TerminationStatus::Terminated(TerminationReason::SolverConverged)
                    | TerminationStatus::Terminated(TerminationReason::TargetCostReached)
            );
            message = termination.to_string();

            let improvement = fval - run_fval;
            if run_fval < fval {
                best = clamp_params(run_best, bounds);
                fval = run_fval;
            }
            log::debug!("nelder-mead run {run}: fval={run_fval:.8} improvement={improvement:.3e}");

            // A restart that no longer moves the optimum ends the search.
            if run > 0 && improvement.abs() <= 1e-9 * fval.abs().max(1.0) {
                break;
            }
        }

        Ok(OptimizationResult {
            parameters: best,
            fval,
            n_iter,
            n_fev: n_fev.load(Ordering::Relaxed),
            converged,
            message,
        })
    }

    /// Minimize the negative log-likelihood of `model` from its own starting
    /// point and bounds.
    pub fn minimize_model<M: LogDensityModel + Sync>(&self, model: &M) -> Result<OptimizationResult> {
        let objective = ModelObjective(model);
        self.minimize(&objective, &model.parameter_init(), &model.parameter_bounds())
    }
}

impl Default for NelderMeadOptimizer {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}
