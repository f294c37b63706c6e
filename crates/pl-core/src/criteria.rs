//! Information criteria for model selection (AIC, BIC)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Compute AIC (Akaike Information Criterion)
///
/// AIC = 2k - 2·loglik
///
/// where k is the number of free parameters of the fitted model.
pub fn aic(loglik: f64, k: usize) -> f64 {
    2.0 * k as f64 - 2.0 * loglik
}

/// Compute BIC (Bayesian Information Criterion)
///
/// BIC = k·ln(n) - 2·loglik
///
/// BIC penalizes model complexity more heavily than AIC once n > e².
pub fn bic(loglik: f64, k: usize, n: usize) -> Result<f64> {
    if n == 0 {
        return Err(Error::Validation("n must be > 0".into()));
    }
    Ok(k as f64 * (n as f64).ln() - 2.0 * loglik)
}

/// Compute both AIC and BIC
pub fn aic_bic(loglik: f64, k: usize, n: usize) -> Result<(f64, f64)> {
    Ok((aic(loglik, k), bic(loglik, k, n)?))
}

/// Which information criterion to rank fits by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Akaike Information Criterion
    #[default]
    Aic,
    /// Bayesian Information Criterion
    Bic,
}

impl std::str::FromStr for Criterion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "aic" => Ok(Criterion::Aic),
            "bic" => Ok(Criterion::Bic),
            other => Err(Error::Validation(format!("unknown criterion '{}'", other))),
        }
    }
}
