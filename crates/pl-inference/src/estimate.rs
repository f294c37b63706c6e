//! Per-family maximum-likelihood estimators.
//!
//! `expon` and `norm` have closed forms. Families bounded below are fitted by
//! Nelder-Mead over an unconstrained parameterization
//!
//! ```text
//! loc   = min(x) - exp(θ₀)·sd(x)
//! scale = exp(θ₁)
//! shape = exp(θ₂)   (positive shapes; genpareto's shape is left linear)
//! ```
//!
//! so every trial point keeps all observations inside the support. Starting
//! values come from the method of moments on the sample shifted by
//! `min(x) - 0.1·sd(x)`.

use pl_core::traits::LogDensityModel;
use pl_core::{Error, Result};
use pl_prob::empirical;
use pl_prob::math::exp_clamped;
use statrs::function::gamma::gamma;

use crate::catalog::LogPdfFn;
use crate::evt::GevModel;
use crate::optimizer::{NelderMeadOptimizer, OptimizerConfig};

/// Estimated `(shapes, loc, scale)` of a family.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// Shape parameters in family order
    pub shapes: Vec<f64>,
    /// Location
    pub loc: f64,
    /// Scale
    pub scale: f64,
}

/// Initial offset of the location below the sample minimum, in units of sd.
const INIT_OFFSET: f64 = 0.1;

/// How a shape parameter maps to optimizer space.
#[derive(Debug, Clone, Copy)]
enum ShapeSpace {
    /// Positive shape, optimized as its logarithm
    Log,
    /// Signed shape, optimized directly within bounds
    Linear(f64, f64),
}

impl ShapeSpace {
    fn to_optimizer(self, value: f64) -> f64 {
        match self {
            ShapeSpace::Log => value.ln(),
            ShapeSpace::Linear(lo, hi) => value.clamp(lo, hi),
        }
    }

    fn from_optimizer(self, theta: f64) -> f64 {
        match self {
            ShapeSpace::Log => exp_clamped(theta),
            ShapeSpace::Linear(..) => theta,
        }
    }

    fn bounds(self) -> (f64, f64) {
        match self {
            ShapeSpace::Log => (-7.0, 7.0),
            ShapeSpace::Linear(lo, hi) => (lo, hi),
        }
    }
}

/// Negative log-likelihood of a lower-bounded loc/scale family.
///
/// Parameters: `[log_offset, log_scale, shapes...]`.
struct LowerBoundedModel<'a> {
    data: &'a [f64],
    min: f64,
    spread: f64,
    shape_names: &'static [&'static str],
    shape_spaces: &'static [ShapeSpace],
    logpdf: LogPdfFn,
    init: Vec<f64>,
}

impl LowerBoundedModel<'_> {
    fn unpack(&self, params: &[f64]) -> Estimate {
        let loc = self.min - exp_clamped(params[0]) * self.spread;
        let scale = exp_clamped(params[1]);
        let shapes = self
            .shape_spaces
            .iter()
            .zip(&params[2..])
            .map(|(space, &theta)| space.from_optimizer(theta))
            .collect();
        Estimate { shapes, loc, scale }
    }
}

impl LogDensityModel for LowerBoundedModel<'_> {
    fn dim(&self) -> usize {
        2 + self.shape_spaces.len()
    }

    fn parameter_names(&self) -> Vec<String> {
        let mut names = vec!["log_offset".to_string(), "log_scale".to_string()];
        for (name, space) in self.shape_names.iter().zip(self.shape_spaces) {
            names.push(match space {
                ShapeSpace::Log => format!("log_{}", name),
                ShapeSpace::Linear(..) => name.to_string(),
            });
        }
        names
    }

    fn parameter_bounds(&self) -> Vec<(f64, f64)> {
        let s = self.spread.ln();
        let mut bounds = vec![(-25.0, 10.0), (s - 20.0, s + 20.0)];
        bounds.extend(self.shape_spaces.iter().map(|space| space.bounds()));
        bounds
    }

    fn parameter_init(&self) -> Vec<f64> {
        self.init.clone()
    }

    fn nll(&self, params: &[f64]) -> Result<f64> {
        if params.len() != self.dim() {
            return Err(Error::Validation("params length mismatch".to_string()));
        }
        let est = self.unpack(params);
        let mut nll = 0.0;
        for &x in self.data {
            let lp = (self.logpdf)(x, &est.shapes, est.loc, est.scale)?;
            if !lp.is_finite() {
                return Ok(f64::MAX);
            }
            nll -= lp;
        }
        Ok(nll)
    }
}

/// Shared driver for the lower-bounded families.
#[allow(clippy::too_many_arguments)]
fn fit_lower_bounded(
    family: &str,
    sample: &[f64],
    shape_names: &'static [&'static str],
    shape_spaces: &'static [ShapeSpace],
    logpdf: LogPdfFn,
    init_shapes: &[f64],
    init_scale: f64,
    config: &OptimizerConfig,
) -> Result<Estimate> {
    let (min, _) = empirical::min_max(sample)
        .ok_or_else(|| Error::InvalidSample("sample is empty".to_string()))?;
    let spread = empirical::std_dev(sample);
    if !(spread > 0.0) {
        return Err(Error::degenerate(family, "sample has zero spread"));
    }
    if !(init_scale > 0.0) || !init_scale.is_finite() {
        return Err(Error::degenerate(family, "method-of-moments scale is not positive"));
    }

    let mut init = vec![INIT_OFFSET.ln(), init_scale.ln()];
    init.extend(shape_spaces.iter().zip(init_shapes).map(|(space, &v)| space.to_optimizer(v)));

    let model = LowerBoundedModel { data: sample, min, spread, shape_names, shape_spaces, logpdf, init };
    let opt = NelderMeadOptimizer::new(config.clone()).minimize_model(&model)?;
    if opt.fval == f64::MAX {
        return Err(Error::degenerate(family, "no feasible parameters found"));
    }
    if !opt.converged {
        log::warn!("{} fit did not converge: {}", family, opt.message);
    }
    log::debug!("{} fit: {}", family, opt);
    Ok(model.unpack(&opt.parameters))
}

/// The sample shifted to start just below its minimum, with its mean and sd.
fn shifted_moments(sample: &[f64]) -> (Vec<f64>, f64, f64) {
    let sd = empirical::std_dev(sample);
    let min = empirical::min_max(sample).map_or(0.0, |(lo, _)| lo);
    let loc0 = min - INIT_OFFSET * sd;
    let shifted: Vec<f64> = sample.iter().map(|x| x - loc0).collect();
    let mean = empirical::mean(&shifted);
    (shifted, mean, sd)
}

/// `expon`: loc = min, scale = mean - min.
pub fn expon(sample: &[f64], _config: &OptimizerConfig) -> Result<Estimate> {
    let (min, _) = empirical::min_max(sample)
        .ok_or_else(|| Error::InvalidSample("sample is empty".to_string()))?;
    let scale = empirical::mean(sample) - min;
    if !(scale > 0.0) {
        return Err(Error::degenerate("expon", "sample has zero spread"));
    }
    Ok(Estimate { shapes: Vec::new(), loc: min, scale })
}

/// `norm`: loc = mean, scale = population standard deviation.
pub fn norm(sample: &[f64], _config: &OptimizerConfig) -> Result<Estimate> {
    let scale = empirical::std_dev(sample);
    if !(scale > 0.0) {
        return Err(Error::degenerate("norm", "sample has zero spread"));
    }
    Ok(Estimate { shapes: Vec::new(), loc: empirical::mean(sample), scale })
}

/// `weibull_min`: shape from the coefficient of variation, `c ≈ cv^-1.086`.
pub fn weibull_min(sample: &[f64], config: &OptimizerConfig) -> Result<Estimate> {
    let (_, mean, sd) = shifted_moments(sample);
    let c0 = (sd / mean).powf(-1.086).clamp(0.05, 50.0);
    let scale0 = mean / gamma(1.0 + 1.0 / c0);
    fit_lower_bounded(
        "weibull_min",
        sample,
        &["c"],
        &[ShapeSpace::Log],
        |x, s, loc, scale| pl_prob::weibull::logpdf(x, s[0], loc, scale),
        &[c0],
        scale0,
        config,
    )
}

/// `gamma`: `a = (mean/sd)²`, `scale = sd²/mean`.
pub fn gamma_dist(sample: &[f64], config: &OptimizerConfig) -> Result<Estimate> {
    let (_, mean, sd) = shifted_moments(sample);
    let a0 = (mean / sd).powi(2).clamp(1e-3, 1e3);
    let scale0 = sd * sd / mean;
    fit_lower_bounded(
        "gamma",
        sample,
        &["a"],
        &[ShapeSpace::Log],
        |x, s, loc, scale| pl_prob::gamma::logpdf(x, s[0], loc, scale),
        &[a0],
        scale0,
        config,
    )
}

/// `lognorm`: moments of the log of the shifted sample.
pub fn lognorm(sample: &[f64], config: &OptimizerConfig) -> Result<Estimate> {
    let (shifted, _, _) = shifted_moments(sample);
    let logs: Vec<f64> = shifted.iter().map(|y| y.ln()).collect();
    let s0 = empirical::std_dev(&logs).clamp(0.05, 20.0);
    let scale0 = empirical::mean(&logs).exp();
    fit_lower_bounded(
        "lognorm",
        sample,
        &["s"],
        &[ShapeSpace::Log],
        |x, s, loc, scale| pl_prob::lognormal::logpdf(x, s[0], loc, scale),
        &[s0],
        scale0,
        config,
    )
}

/// `gompertz`: starts at `c = 1`, where the standardized mean is ≈ 0.596.
pub fn gompertz(sample: &[f64], config: &OptimizerConfig) -> Result<Estimate> {
    let (_, mean, _) = shifted_moments(sample);
    fit_lower_bounded(
        "gompertz",
        sample,
        &["c"],
        &[ShapeSpace::Log],
        |x, s, loc, scale| pl_prob::gompertz::logpdf(x, s[0], loc, scale),
        &[1.0],
        mean / 0.596,
        config,
    )
}

/// `genpareto`: starts near the exponential case, `c = 0.1`.
pub fn genpareto(sample: &[f64], config: &OptimizerConfig) -> Result<Estimate> {
    let (_, mean, _) = shifted_moments(sample);
    fit_lower_bounded(
        "genpareto",
        sample,
        &["c"],
        &[ShapeSpace::Linear(-5.0, 5.0)],
        |x, s, loc, scale| pl_prob::gpd::logpdf(x, s[0], loc, scale),
        &[0.1],
        0.9 * mean,
        config,
    )
}

/// `genextreme`: the GEV model with free location.
pub fn genextreme(sample: &[f64], config: &OptimizerConfig) -> Result<Estimate> {
    GevModel::new(sample.to_vec())?.estimate(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cfg() -> OptimizerConfig {
        OptimizerConfig::default()
    }

    #[test]
    fn test_expon_closed_form() {
        let est = expon(&[1.0, 2.0, 3.0, 6.0], &cfg()).unwrap();
        assert!(est.shapes.is_empty());
        assert_eq!(est.loc, 1.0);
        assert_relative_eq!(est.scale, 2.0);
    }

    #[test]
    fn test_norm_closed_form() {
        let est = norm(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], &cfg()).unwrap();
        assert_relative_eq!(est.loc, 5.0);
        assert_relative_eq!(est.scale, 2.0);
    }

    #[test]
    fn test_constant_sample_is_degenerate() {
        let xs = [3.0; 10];
        for f in [expon, norm, weibull_min, gamma_dist, lognorm, gompertz, genpareto] {
            let err = f(&xs, &cfg()).unwrap_err();
            assert_eq!(err.kind(), pl_core::ErrorKind::DegenerateFit);
        }
    }

    #[test]
    fn test_lower_bounded_keeps_support() {
        let xs: Vec<f64> = (1..=60).map(|i| (i as f64 * 0.37).sin().abs() * 5.0 + 1.0).collect();
        let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
        for f in [weibull_min, gamma_dist, lognorm, gompertz] {
            let est = f(&xs, &cfg()).unwrap();
            assert!(est.loc < min, "loc {} not below min {}", est.loc, min);
            assert!(est.scale > 0.0);
            assert!(est.shapes[0] > 0.0);
        }
    }

    #[test]
    fn test_model_names_follow_spaces() {
        let xs = [1.0, 2.0, 4.0];
        let model = LowerBoundedModel {
            data: &xs,
            min: 1.0,
            spread: 1.2,
            shape_names: &["c"],
            shape_spaces: &[ShapeSpace::Linear(-5.0, 5.0)],
            logpdf: |x, s, loc, scale| pl_prob::gpd::logpdf(x, s[0], loc, scale),
            init: vec![0.1_f64.ln(), 0.0, 0.1],
        };
        assert_eq!(model.parameter_names(), vec!["log_offset", "log_scale", "c"]);
        assert_eq!(model.parameter_bounds().len(), model.dim());
        assert!(model.nll(&model.parameter_init()).unwrap().is_finite());
    }
}
