//! Normal distribution utilities.

use pl_core::Result;

use crate::math::{LN_SQRT_2PI, check_prob, check_scale, std_normal_cdf, std_normal_ppf};

/// Log-PDF of a Normal distribution with mean `loc` and standard deviation `scale` at `x`.
///
/// `log p(x) = -0.5 * ((x-loc)/scale)^2 - ln(scale) - ln(sqrt(2π))`
pub fn logpdf(x: f64, loc: f64, scale: f64) -> Result<f64> {
    check_scale(scale)?;
    let z = (x - loc) / scale;
    Ok(-0.5 * z * z - scale.ln() - LN_SQRT_2PI)
}

/// CDF of a Normal distribution.
pub fn cdf(x: f64, loc: f64, scale: f64) -> Result<f64> {
    check_scale(scale)?;
    Ok(std_normal_cdf((x - loc) / scale))
}

/// Quantile function of a Normal distribution.
pub fn ppf(p: f64, loc: f64, scale: f64) -> Result<f64> {
    check_scale(scale)?;
    check_prob(p)?;
    Ok(loc + scale * std_normal_ppf(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_at_zero() {
        let lp = logpdf(0.0, 0.0, 1.0).unwrap();
        assert!((lp + LN_SQRT_2PI).abs() < 1e-12);
    }

    #[test]
    fn test_symmetry() {
        let lp1 = logpdf(1.3, 0.0, 2.0).unwrap();
        let lp2 = logpdf(-1.3, 0.0, 2.0).unwrap();
        assert!((lp1 - lp2).abs() < 1e-12);
    }

    #[test]
    fn test_ppf_inverts_cdf() {
        let x = ppf(0.3, 5.0, 2.0).unwrap();
        assert_relative_eq!(cdf(x, 5.0, 2.0).unwrap(), 0.3, epsilon = 1e-10);
    }

    #[test]
    fn test_invalid_sigma() {
        assert!(logpdf(0.0, 0.0, 0.0).is_err());
        assert!(logpdf(0.0, 0.0, -1.0).is_err());
    }
}
