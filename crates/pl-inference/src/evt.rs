//! Extreme value fitters: GEV on block maxima, GPD on threshold exceedances.
//!
//! The likelihoods are written in the ξ convention of the extreme value
//! literature (ξ > 0 heavy tail, ξ = 0 light tail, ξ < 0 bounded tail) and
//! minimized with the bounded Nelder-Mead wrapper. Fits are reported in the
//! catalog's `c` convention: `c = -ξ` for `genextreme`, `c = ξ` for
//! `genpareto`.

use pl_core::traits::LogDensityModel;
use pl_core::{Error, FitResult, Result};
use pl_prob::empirical;
use pl_prob::math::{SHAPE_ZERO_EPS, exp_clamped};

use crate::catalog;
use crate::estimate::Estimate;
use crate::optimizer::{NelderMeadOptimizer, OptimizerConfig};

/// Name reported by [`fit_block_maxima`].
pub const BLOCK_MAXIMA_NAME: &str = "genextreme(block-maxima)";

/// Name reported by [`fit_peaks_over_threshold`].
pub const PEAKS_OVER_THRESHOLD_NAME: &str = "genpareto(excess over threshold)";

/// Effective parameter count of a block-maxima fit (location, scale, shape).
pub const BLOCK_MAXIMA_K: usize = 3;

/// Effective parameter count of a POT fit; the fixed location is not counted.
pub const PEAKS_OVER_THRESHOLD_K: usize = 2;

/// True when `xi <= -1`: the GEV/GPD likelihood is unbounded there, so the
/// reported log-likelihood reflects where the search stopped at the support edge.
pub fn likelihood_is_unbounded(xi: f64) -> bool {
    xi <= -1.0
}

/// Scale of reference for data-relative bounds: the standard deviation, or
/// `max(|mean|, 1)` when the data has no spread (e.g. a single block).
fn reference_scale(data: &[f64]) -> f64 {
    let sd = empirical::std_dev(data);
    if sd.is_finite() && sd > 0.0 { sd } else { empirical::mean(data).abs().max(1.0) }
}

/// Σ -log g(x) for the GEV, `None` outside the support.
fn gev_nll(maxima: &[f64], mu: f64, log_sigma: f64, xi: f64) -> Option<f64> {
    let sigma = exp_clamped(log_sigma);
    if !(sigma.is_finite() && sigma > 0.0) {
        return None;
    }
    let gumbel = xi.abs() < SHAPE_ZERO_EPS;
    let body = maxima.iter().try_fold(0.0, |acc, &x| {
        let z = (x - mu) / sigma;
        if gumbel {
            return Some(acc + z + (-z).exp());
        }
        let t = 1.0 + xi * z;
        (t > 0.0).then(|| acc + (1.0 + 1.0 / xi) * t.ln() + t.powf(-1.0 / xi))
    })?;
    let total = maxima.len() as f64 * log_sigma + body;
    total.is_finite().then_some(total)
}

/// Σ -log h(y) for the GPD with zero location, `None` outside the support.
fn gpd_nll(excess: &[f64], log_sigma: f64, xi: f64) -> Option<f64> {
    let sigma = exp_clamped(log_sigma);
    if !(sigma.is_finite() && sigma > 0.0) {
        return None;
    }
    let body = if xi.abs() < SHAPE_ZERO_EPS {
        excess.iter().sum::<f64>() / sigma
    } else {
        excess.iter().try_fold(0.0, |acc, &y| {
            let t = 1.0 + xi * (y / sigma);
            (t > 0.0).then(|| acc + (1.0 + 1.0 / xi) * t.ln())
        })?
    };
    let total = excess.len() as f64 * log_sigma + body;
    total.is_finite().then_some(total)
}

/// Block-maxima likelihood over `[loc, log_scale, xi]`.
///
/// Location bounds span a wide window around the mean and `log_scale` is
/// bounded relative to the spread of the maxima, so a single block still
/// gives a valid box.
#[derive(Debug, Clone)]
pub struct GevModel {
    maxima: Vec<f64>,
    spread: f64,
}

impl GevModel {
    /// Model over the given block maxima.
    pub fn new(maxima: Vec<f64>) -> Result<Self> {
        empirical::check_sample(&maxima)?;
        let spread = reference_scale(&maxima);
        Ok(Self { maxima, spread })
    }

    /// Minimize and report `(shapes=[c], loc, scale)` with `c = -ξ`.
    pub fn estimate(&self, config: &OptimizerConfig) -> Result<Estimate> {
        let opt = NelderMeadOptimizer::new(config.clone()).minimize_model(self)?;
        if opt.fval == f64::MAX {
            return Err(Error::degenerate("genextreme", "no feasible parameters found"));
        }
        if !opt.converged {
            log::warn!("genextreme: simplex stopped before convergence ({})", opt.message);
        }
        let [loc, log_scale, xi] = opt.parameters[..] else {
            return Err(Error::Computation("optimizer returned wrong dimension".to_string()));
        };
        if likelihood_is_unbounded(xi) {
            log::warn!("genextreme: c = {:.3} >= 1, likelihood unbounded; AIC/BIC arbitrary", -xi);
        }
        Ok(Estimate { shapes: vec![-xi], loc, scale: exp_clamped(log_scale) })
    }
}

impl LogDensityModel for GevModel {
    fn dim(&self) -> usize {
        3
    }

    fn parameter_names(&self) -> Vec<String> {
        ["loc", "log_scale", "xi"].iter().map(|s| s.to_string()).collect()
    }

    fn parameter_bounds(&self) -> Vec<(f64, f64)> {
        let center = empirical::mean(&self.maxima);
        let (s, ls) = (self.spread, self.spread.ln());
        vec![(center - 1e3 * s, center + 1e3 * s), (ls - 10.0, ls + 10.0), (-5.0, 5.0)]
    }

    fn parameter_init(&self) -> Vec<f64> {
        // Gumbel moments: scale = sd·√6/π, loc = mean - γ·scale
        let scale0 = self.spread * 6f64.sqrt() / std::f64::consts::PI;
        let loc0 = empirical::mean(&self.maxima) - 0.577_215_664_9 * scale0;
        let candidate = [loc0, scale0.ln(), 0.1];
        match gev_nll(&self.maxima, candidate[0], candidate[1], candidate[2]) {
            Some(_) => candidate.to_vec(),
            None => vec![loc0, scale0.ln(), 0.0],
        }
    }

    fn nll(&self, params: &[f64]) -> Result<f64> {
        let &[loc, log_scale, xi] = params else {
            return Err(Error::Validation(format!("expected 3 parameters, got {}", params.len())));
        };
        Ok(gev_nll(&self.maxima, loc, log_scale, xi).unwrap_or(f64::MAX))
    }
}

/// Exceedance likelihood over `[log_scale, xi]`; location is fixed at 0.
#[derive(Debug, Clone)]
pub struct GpdModel {
    excess: Vec<f64>,
    mean_excess: f64,
}

impl GpdModel {
    /// Model over `x - u` for the observations above a threshold `u`.
    ///
    /// Every excess must be finite and strictly positive.
    pub fn new(excess: Vec<f64>) -> Result<Self> {
        if excess.is_empty() {
            return Err(Error::Validation("no exceedances to fit".to_string()));
        }
        if let Some(bad) = excess.iter().find(|y| !(y.is_finite() && **y > 0.0)) {
            return Err(Error::Validation(format!("excess must be finite and > 0, got {}", bad)));
        }
        let mean_excess = empirical::mean(&excess);
        Ok(Self { excess, mean_excess })
    }

    /// Minimize and report `(shapes=[ξ], loc=0, scale)`.
    pub fn estimate(&self, config: &OptimizerConfig) -> Result<Estimate> {
        let opt = NelderMeadOptimizer::new(config.clone()).minimize_model(self)?;
        if opt.fval == f64::MAX {
            return Err(Error::degenerate("genpareto", "no feasible parameters found"));
        }
        if !opt.converged {
            log::warn!("genpareto: simplex stopped before convergence ({})", opt.message);
        }
        let [log_scale, xi] = opt.parameters[..] else {
            return Err(Error::Computation("optimizer returned wrong dimension".to_string()));
        };
        if likelihood_is_unbounded(xi) {
            log::warn!("genpareto: xi = {:.3} <= -1, likelihood unbounded; AIC/BIC arbitrary", xi);
        }
        Ok(Estimate { shapes: vec![xi], loc: 0.0, scale: exp_clamped(log_scale) })
    }
}

impl LogDensityModel for GpdModel {
    fn dim(&self) -> usize {
        2
    }

    fn parameter_names(&self) -> Vec<String> {
        vec!["log_scale".to_string(), "xi".to_string()]
    }

    fn parameter_bounds(&self) -> Vec<(f64, f64)> {
        let lm = self.mean_excess.ln();
        vec![(lm - 10.0, lm + 10.0), (-5.0, 5.0)]
    }

    fn parameter_init(&self) -> Vec<f64> {
        // exponential tail: scale = mean excess
        vec![self.mean_excess.ln(), 0.1]
    }

    fn nll(&self, params: &[f64]) -> Result<f64> {
        let &[log_scale, xi] = params else {
            return Err(Error::Validation(format!("expected 2 parameters, got {}", params.len())));
        };
        Ok(gpd_nll(&self.excess, log_scale, xi).unwrap_or(f64::MAX))
    }
}

// ---------------------------------------------------------------------------
// Threshold policy
// ---------------------------------------------------------------------------

/// POT threshold as configured: a sample quantile or a literal value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// Probability level in `(0, 1)`, resolved against the sample
    Quantile(f64),
    /// Literal threshold value
    Value(f64),
}

impl Threshold {
    /// Interpret a configured number: `0 < t < 1` is a quantile level,
    /// anything else a literal threshold.
    pub fn from_config(t: f64) -> Self {
        if t > 0.0 && t < 1.0 { Threshold::Quantile(t) } else { Threshold::Value(t) }
    }

    /// Literal threshold for `sample`.
    pub fn resolve(&self, sample: &[f64]) -> Result<f64> {
        match *self {
            Threshold::Quantile(p) => {
                empirical::check_sample(sample)?;
                empirical::quantile(sample, p)
            }
            Threshold::Value(u) => {
                if !u.is_finite() {
                    return Err(Error::Validation(format!("threshold must be finite, got {}", u)));
                }
                Ok(u)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Fitters
// ---------------------------------------------------------------------------

/// Maxima of consecutive blocks of `block_size`; the last block may be short.
pub fn block_maxima(sample: &[f64], block_size: usize) -> Result<Vec<f64>> {
    if block_size == 0 {
        return Err(Error::Validation("block_size must be >= 1".to_string()));
    }
    Ok(sample
        .chunks(block_size)
        .map(|block| block.iter().copied().fold(f64::NEG_INFINITY, f64::max))
        .collect())
}

/// Values strictly above `threshold`, shifted by it.
pub fn exceedances(sample: &[f64], threshold: f64) -> Vec<f64> {
    sample.iter().filter(|&&x| x > threshold).map(|&x| x - threshold).collect()
}

/// Fit a GEV to block maxima with a given optimizer configuration.
pub fn fit_block_maxima_with_config(
    sample: &[f64],
    block_size: usize,
    config: &OptimizerConfig,
) -> Result<FitResult> {
    empirical::check_sample(sample)?;
    let maxima = block_maxima(sample, block_size)?;
    let est = GevModel::new(maxima.clone())?.estimate(config)?;

    let handle = catalog::lookup("genextreme")?;
    let loglik = handle
        .log_likelihood(&maxima, &est.shapes, est.loc, est.scale)
        .map_err(|e| rename_degenerate(e, BLOCK_MAXIMA_NAME))?;
    log::debug!("block maxima: {} blocks of {}", maxima.len(), block_size);

    FitResult::from_loglik(
        BLOCK_MAXIMA_NAME,
        est.shapes,
        est.loc,
        est.scale,
        loglik,
        maxima.len(),
        BLOCK_MAXIMA_K,
    )
}

/// Fit a GEV to the maxima of consecutive blocks of `block_size`.
///
/// `n` is the number of blocks, `ceil(len / block_size)`, and `k = 3`.
pub fn fit_block_maxima(sample: &[f64], block_size: usize) -> Result<FitResult> {
    fit_block_maxima_with_config(sample, block_size, &OptimizerConfig::default())
}

/// Fit a GPD to exceedances over a literal threshold with a given optimizer configuration.
pub fn fit_peaks_over_threshold_with_config(
    sample: &[f64],
    threshold: f64,
    config: &OptimizerConfig,
) -> Result<FitResult> {
    empirical::check_sample(sample)?;
    if !threshold.is_finite() {
        return Err(Error::Validation(format!("threshold must be finite, got {}", threshold)));
    }
    let excess = exceedances(sample, threshold);
    if excess.is_empty() {
        return Err(Error::EmptyExceedanceSet { threshold });
    }
    let est = GpdModel::new(excess.clone())?.estimate(config)?;

    let handle = catalog::lookup("genpareto")?;
    let loglik = handle
        .log_likelihood(&excess, &est.shapes, est.loc, est.scale)
        .map_err(|e| rename_degenerate(e, PEAKS_OVER_THRESHOLD_NAME))?;
    log::debug!("peaks over threshold {}: {} exceedances", threshold, excess.len());

    FitResult::from_loglik(
        PEAKS_OVER_THRESHOLD_NAME,
        est.shapes,
        est.loc,
        est.scale,
        loglik,
        excess.len(),
        PEAKS_OVER_THRESHOLD_K,
    )
}

/// Fit a GPD (location fixed at 0) to `x - threshold` for `x > threshold`.
///
/// `n` is the number of exceedances and `k = 2`.
pub fn fit_peaks_over_threshold(sample: &[f64], threshold: f64) -> Result<FitResult> {
    fit_peaks_over_threshold_with_config(sample, threshold, &OptimizerConfig::default())
}

/// Resolve a [`Threshold`] against the sample, then fit as [`fit_peaks_over_threshold`].
pub fn fit_peaks_over_threshold_with(sample: &[f64], threshold: Threshold) -> Result<FitResult> {
    let u = threshold.resolve(sample)?;
    fit_peaks_over_threshold(sample, u)
}

fn rename_degenerate(err: Error, name: &str) -> Error {
    match err {
        Error::DegenerateFit { reason, .. } => Error::degenerate(name, reason),
        other => other,
    }
}

fn single_shape(fit: &FitResult) -> Result<f64> {
    match fit.params.as_slice() {
        [c] => Ok(*c),
        other => Err(Error::Validation(format!(
            "expected exactly one shape parameter, got {}",
            other.len()
        ))),
    }
}

/// Level exceeded on average once every `period` blocks by a GEV fit.
pub fn return_level(fit: &FitResult, period: f64) -> Result<f64> {
    if !(period > 1.0) || !period.is_finite() {
        return Err(Error::Validation(format!("return period must be > 1, got {}", period)));
    }
    let c = single_shape(fit)?;
    pl_prob::gev::ppf(1.0 - 1.0 / period, c, fit.loc, fit.scale)
}

/// Excess over the threshold at probability level `p` for a GPD fit.
pub fn excess_quantile(fit: &FitResult, p: f64) -> Result<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(Error::Validation(format!("p must be in (0, 1), got {}", p)));
    }
    let c = single_shape(fit)?;
    pl_prob::gpd::ppf(p, c, fit.loc, fit.scale)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
