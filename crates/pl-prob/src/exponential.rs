//! Exponential distribution utilities.

use pl_core::Result;

use crate::math::{check_prob, check_scale};

/// Log-PDF of an Exponential distribution with location `loc` and scale `scale` at `x`.
///
/// Support: `x >= loc`.
pub fn logpdf(x: f64, loc: f64, scale: f64) -> Result<f64> {
    check_scale(scale)?;
    let z = (x - loc) / scale;
    if z < 0.0 {
        return Ok(f64::NEG_INFINITY);
    }
    Ok(-z - scale.ln())
}

/// CDF of an Exponential distribution.
pub fn cdf(x: f64, loc: f64, scale: f64) -> Result<f64> {
    check_scale(scale)?;
    let z = (x - loc) / scale;
    if z <= 0.0 {
        return Ok(0.0);
    }
    Ok(-(-z).exp_m1())
}

/// Quantile function of an Exponential distribution.
pub fn ppf(p: f64, loc: f64, scale: f64) -> Result<f64> {
    check_scale(scale)?;
    check_prob(p)?;
    Ok(loc - scale * (-p).ln_1p())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_basic_value() {
        // rate 2 <=> scale 0.5
        let lp = logpdf(0.5, 0.0, 0.5).unwrap();
        assert!((lp - (2.0f64.ln() - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_support() {
        let lp = logpdf(0.9, 1.0, 2.0).unwrap();
        assert!(lp.is_infinite() && lp.is_sign_negative());
        assert_eq!(cdf(0.9, 1.0, 2.0).unwrap(), 0.0);
    }

    #[test]
    fn test_median() {
        let m = ppf(0.5, 1.0, 3.0).unwrap();
        assert_relative_eq!(m, 1.0 + 3.0 * 2.0_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(cdf(m, 1.0, 3.0).unwrap(), 0.5, epsilon = 1e-12);
        assert!(ppf(1.0, 0.0, 1.0).unwrap().is_infinite());
    }

    #[test]
    fn test_invalid_scale() {
        assert!(logpdf(0.0, 0.0, 0.0).is_err());
        assert!(logpdf(0.0, 0.0, -1.0).is_err());
    }
}
