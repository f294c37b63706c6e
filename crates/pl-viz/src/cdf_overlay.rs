//! Empirical CDF against a fitted family's CDF.
//!
//! The fitted curve is the cumulative sum of densities on an even grid over
//! the sample range, normalized by its total. It is a discretized surrogate
//! for visual comparison; the family's closed-form CDF on the same grid is
//! carried alongside it as `model_cdf`.

use pl_core::{Error, FitResult, Result};
use pl_prob::{empirical, math};
use serde::{Deserialize, Serialize};

/// Grid size used when the caller has no preference.
pub const DEFAULT_N_POINTS: usize = 400;

/// ECDF step series plus the normalized fitted-CDF surrogate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdfOverlayArtifact {
    /// Family name the curve was evaluated with.
    pub family: String,
    /// Shape parameters.
    pub params: Vec<f64>,
    /// Location.
    pub loc: f64,
    /// Scale.
    pub scale: f64,
    /// Sorted sample values (step positions).
    pub ecdf_x: Vec<f64>,
    /// `i / N` for `i = 1..=N`.
    pub ecdf_y: Vec<f64>,
    /// Evenly spaced evaluation points over `[min, max]`.
    pub grid: Vec<f64>,
    /// Density at each grid point.
    pub density: Vec<f64>,
    /// Cumulative density normalized to end at 1.
    pub cdf: Vec<f64>,
    /// Closed-form CDF at each grid point.
    pub model_cdf: Vec<f64>,
}

/// Build the overlay for `sample` against `family` with the given parameters.
pub fn cdf_overlay_artifact(
    sample: &[f64],
    family: &str,
    params: &[f64],
    loc: f64,
    scale: f64,
    n_points: usize,
) -> Result<CdfOverlayArtifact> {
    empirical::check_sample(sample)?;
    if n_points == 0 {
        return Err(Error::Validation("n_points must be >= 1".to_string()));
    }
    let handle = pl_inference::lookup(family)?;
    let (lo, hi) = empirical::min_max(sample)
        .ok_or_else(|| Error::InvalidSample("sample is empty".to_string()))?;

    let (ecdf_x, ecdf_y) = empirical::ecdf(sample);
    let grid = math::linspace(lo, hi, n_points);
    let density = handle.densities(&grid, params, loc, scale)?;

    let total: f64 = density.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(Error::Computation(format!(
            "density total over [{}, {}] is {} for {}",
            lo, hi, total, family
        )));
    }
    let cdf = density
        .iter()
        .scan(0.0, |acc, &d| {
            *acc += d;
            Some(*acc / total)
        })
        .collect();
    let model_cdf = handle.cumulatives(&grid, params, loc, scale)?;

    Ok(CdfOverlayArtifact {
        family: family.to_string(),
        params: params.to_vec(),
        loc,
        scale,
        ecdf_x,
        ecdf_y,
        grid,
        density,
        cdf,
        model_cdf,
    })
}

impl CdfOverlayArtifact {
    /// Overlay for an MLE fit, evaluated with the fit's family and parameters.
    pub fn from_fit(sample: &[f64], fit: &FitResult, n_points: usize) -> Result<Self> {
        cdf_overlay_artifact(sample, &fit.name, &fit.params, fit.loc, fit.scale, n_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pl_core::ErrorKind;

    #[test]
    fn test_ecdf_steps() {
        let a = cdf_overlay_artifact(&[3.0, 1.0, 2.0, 4.0], "norm", &[], 2.5, 1.0, 10).unwrap();
        assert_eq!(a.ecdf_x, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a.ecdf_y, vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_surrogate_is_normalized() {
        let a = cdf_overlay_artifact(&[1.0, 2.0, 5.0], "expon", &[], 0.0, 2.0, 50).unwrap();
        assert_eq!(a.grid.len(), 50);
        assert_eq!(a.cdf.len(), 50);
        assert_relative_eq!(a.grid[0], 1.0);
        assert_relative_eq!(a.grid[49], 5.0);
        assert_relative_eq!(a.cdf[49], 1.0, epsilon = 1e-12);
        assert!(a.cdf.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_model_cdf_is_closed_form() {
        let a = cdf_overlay_artifact(&[1.0, 2.0, 5.0], "expon", &[], 0.0, 2.0, 9).unwrap();
        assert_eq!(a.model_cdf.len(), a.grid.len());
        for (&x, &f) in a.grid.iter().zip(&a.model_cdf) {
            assert_relative_eq!(f, 1.0 - (-x / 2.0).exp(), epsilon = 1e-12);
        }
        // the surrogate is pinned to 1 at the right edge, the model is not
        assert!(a.model_cdf[8] < a.cdf[8]);
    }

    #[test]
    fn test_zero_density_total_is_error() {
        // Support starts at loc = 10, past every grid point.
        let err = cdf_overlay_artifact(&[1.0, 2.0], "expon", &[], 10.0, 1.0, 20).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Computation);
    }

    #[test]
    fn test_rejects_unknown_family_and_empty_grid() {
        let err = cdf_overlay_artifact(&[1.0, 2.0], "bogus", &[], 0.0, 1.0, 20).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownDistribution);
        let err = cdf_overlay_artifact(&[1.0, 2.0], "norm", &[], 0.0, 1.0, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
