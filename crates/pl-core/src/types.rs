//! Common data types for Probability Lab

use serde::{Deserialize, Serialize};

use crate::criteria::{self, Criterion};
use crate::{Error, ErrorKind, Result};

/// Fit result shared by every fitting path.
///
/// Flat record of primitive fields so it can be exported as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Fitted family name, or a qualified variant such as `genextreme(block-maxima)`
    pub name: String,

    /// Shape parameters in family order (possibly empty)
    pub params: Vec<f64>,

    /// Location parameter
    pub loc: f64,

    /// Scale parameter (always > 0)
    pub scale: f64,

    /// Summed log-density of the fitted data
    pub loglik: f64,

    /// Akaike Information Criterion
    pub aic: f64,

    /// Bayesian Information Criterion
    pub bic: f64,

    /// Number of observations the likelihood was evaluated on
    pub n: usize,
}

impl FitResult {
    /// Build a fit result from the log-likelihood and the effective parameter count `k`.
    ///
    /// Rejects non-positive/non-finite scale, non-finite log-likelihood and `n == 0`
    /// with [`Error::DegenerateFit`].
    pub fn from_loglik(
        name: impl Into<String>,
        params: Vec<f64>,
        loc: f64,
        scale: f64,
        loglik: f64,
        n: usize,
        k: usize,
    ) -> Result<Self> {
        let name = name.into();
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::degenerate(name, format!("scale must be finite and > 0, got {}", scale)));
        }
        if !loc.is_finite() || params.iter().any(|p| !p.is_finite()) {
            return Err(Error::degenerate(name, "non-finite parameter estimate"));
        }
        if !loglik.is_finite() {
            return Err(Error::degenerate(name, format!("log-likelihood is {}", loglik)));
        }
        if n == 0 {
            return Err(Error::degenerate(name, "no observations were fitted"));
        }
        let (aic, bic) = criteria::aic_bic(loglik, k, n)?;
        Ok(Self { name, params, loc, scale, loglik, aic, bic, n })
    }

    /// Value of the requested information criterion.
    pub fn criterion(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Aic => self.aic,
            Criterion::Bic => self.bic,
        }
    }
}

/// A failed attempt recorded by the trial runner instead of aborting the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Requested family name
    pub name: String,
    /// Kind of the original error
    pub kind: ErrorKind,
    /// Rendered error message
    pub reason: String,
}

impl FailureRecord {
    /// Record `error` as the outcome for `name`.
    pub fn new(name: impl Into<String>, error: &Error) -> Self {
        Self { name: name.into(), kind: error.kind(), reason: error.to_string() }
    }
}

/// Per-family outcome of a trial: a fit or a recorded failure.
pub type TrialOutcome = std::result::Result<FitResult, FailureRecord>;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_result_criteria() {
        let fr = FitResult::from_loglik("weibull_min", vec![1.5], 0.0, 10.0, -120.0, 50, 3).unwrap();
        assert_relative_eq!(fr.aic, 2.0 * 3.0 + 240.0, epsilon = 1e-12);
        assert_relative_eq!(fr.bic, 3.0 * (50.0_f64).ln() + 240.0, epsilon = 1e-12);
        assert_eq!(fr.criterion(Criterion::Aic), fr.aic);
        assert_eq!(fr.criterion(Criterion::Bic), fr.bic);
    }

    #[test]
    fn test_fit_result_rejects_bad_scale() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = FitResult::from_loglik("expon", vec![], 0.0, scale, -1.0, 3, 2).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DegenerateFit);
        }
    }

    #[test]
    fn test_fit_result_rejects_infinite_loglik() {
        let err =
            FitResult::from_loglik("gamma", vec![2.0], 0.0, 1.0, f64::NEG_INFINITY, 3, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateFit);
    }

    #[test]
    fn test_fit_result_flat_json() {
        let fr = FitResult::from_loglik("lognorm", vec![0.5], 1.0, 2.0, -10.0, 20, 3).unwrap();
        let v = serde_json::to_value(&fr).unwrap();
        assert_eq!(v["name"], "lognorm");
        assert_eq!(v["params"][0], 0.5);
        assert_eq!(v["n"], 20);
        let back: FitResult = serde_json::from_value(v).unwrap();
        assert_eq!(back, fr);
    }

    #[test]
    fn test_failure_record_from_error() {
        let err = Error::UnknownDistribution { name: "bogus".into(), available: "expon".into() };
        let rec = FailureRecord::new("bogus", &err);
        assert_eq!(rec.kind, ErrorKind::UnknownDistribution);
        assert!(rec.reason.contains("bogus"));
    }
}
