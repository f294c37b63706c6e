//! Core traits for Probability Lab
//!
//! Likelihood models are described independently of the optimizer that
//! minimizes them: fitting code only sees a negative log-likelihood over an
//! unconstrained parameter vector, its starting point and its box bounds.

use crate::Result;

/// A negative log-likelihood over a fixed sample.
pub trait LogDensityModel {
    /// Number of optimizer parameters
    fn dim(&self) -> usize;

    /// Parameter names (optimizer space, e.g. `log_sigma`)
    fn parameter_names(&self) -> Vec<String>;

    /// Parameter bounds (min, max), applied by clamping
    fn parameter_bounds(&self) -> Vec<(f64, f64)>;

    /// Starting point for the optimizer
    fn parameter_init(&self) -> Vec<f64>;

    /// Negative log-likelihood at `params`.
    ///
    /// Infeasible points return `f64::MAX` rather than an error so that
    /// derivative-free optimizers can step back into the feasible region.
    fn nll(&self, params: &[f64]) -> Result<f64>;
}
