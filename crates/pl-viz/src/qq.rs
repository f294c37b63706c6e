//! Theoretical vs. sample quantiles on a fixed probability grid.

use pl_core::{FitResult, Result};
use pl_prob::{empirical, math};
use serde::{Deserialize, Serialize};

/// Number of probability levels, evenly spaced over `[0.01, 0.99]`.
pub const QQ_LEVELS: usize = 99;

/// QQ series plus identity reference line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QqArtifact {
    /// Family name the quantiles were evaluated with.
    pub family: String,
    /// Shape parameters.
    pub params: Vec<f64>,
    /// Location.
    pub loc: f64,
    /// Scale.
    pub scale: f64,
    /// Probability levels.
    pub probabilities: Vec<f64>,
    /// Family quantile at each level.
    pub theoretical: Vec<f64>,
    /// Linear-interpolation sample quantile at each level.
    pub sample: Vec<f64>,
    /// `[lo, hi]` of the `y = x` reference line, spanning both series.
    pub line: [f64; 2],
}

/// Build the QQ series for `sample` against `family`.
pub fn qq_artifact(
    sample: &[f64],
    family: &str,
    params: &[f64],
    loc: f64,
    scale: f64,
) -> Result<QqArtifact> {
    empirical::check_sample(sample)?;
    let handle = pl_inference::lookup(family)?;

    let probabilities = math::linspace(0.01, 0.99, QQ_LEVELS);
    let theoretical = handle.quantiles(&probabilities, params, loc, scale)?;
    let sorted = empirical::sorted(sample);
    let sample_q = probabilities
        .iter()
        .map(|&p| empirical::quantile_sorted(&sorted, p))
        .collect::<Result<Vec<f64>>>()?;

    let (lo, hi) = theoretical
        .iter()
        .chain(sample_q.iter())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    Ok(QqArtifact {
        family: family.to_string(),
        params: params.to_vec(),
        loc,
        scale,
        probabilities,
        theoretical,
        sample: sample_q,
        line: [lo, hi],
    })
}

impl QqArtifact {
    /// QQ series for an MLE fit.
    pub fn from_fit(sample: &[f64], fit: &FitResult) -> Result<Self> {
        qq_artifact(sample, &fit.name, &fit.params, fit.loc, fit.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_levels() {
        let xs: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        let a = qq_artifact(&xs, "norm", &[], 50.0, 30.0).unwrap();
        assert_eq!(a.probabilities.len(), QQ_LEVELS);
        assert_relative_eq!(a.probabilities[0], 0.01);
        assert_relative_eq!(a.probabilities[98], 0.99);
        assert_relative_eq!(a.probabilities[49], 0.5, epsilon = 1e-12);
        assert_relative_eq!(a.theoretical[49], 50.0, epsilon = 1e-9);
        // numpy-linear median of 1..=100
        assert_relative_eq!(a.sample[49], 50.5, epsilon = 1e-9);
    }

    #[test]
    fn test_line_spans_both_series() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let a = qq_artifact(&xs, "expon", &[], 0.0, 1.0).unwrap();
        let all_min = a.theoretical.iter().chain(&a.sample).copied().fold(f64::INFINITY, f64::min);
        let all_max =
            a.theoretical.iter().chain(&a.sample).copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(a.line, [all_min, all_max]);
        assert!(a.theoretical.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_alias_resolves() {
        let xs = [0.5, 1.0, 1.5];
        let a = qq_artifact(&xs, "gpd", &[0.1], 0.0, 1.0).unwrap();
        assert_eq!(a.family, "gpd");
        assert!(a.theoretical.iter().all(|q| q.is_finite() && *q >= 0.0));
    }
}
