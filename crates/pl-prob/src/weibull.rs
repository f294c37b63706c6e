//! Weibull (minimum) distribution utilities.

use pl_core::Result;

use crate::math::{check_positive_shape, check_prob, check_scale};

/// Log-PDF of a Weibull distribution at `x` with shape `c`, location `loc` and scale `scale`.
///
/// Support: `x >= loc`.
pub fn logpdf(x: f64, c: f64, loc: f64, scale: f64) -> Result<f64> {
    check_positive_shape("c", c)?;
    check_scale(scale)?;
    let z = (x - loc) / scale;
    if z < 0.0 {
        return Ok(f64::NEG_INFINITY);
    }
    if z == 0.0 {
        if c < 1.0 {
            return Ok(f64::INFINITY);
        }
        if c > 1.0 {
            return Ok(f64::NEG_INFINITY);
        }
        // c == 1 => exponential
        return Ok(-scale.ln());
    }

    Ok(c.ln() + (c - 1.0) * z.ln() - z.powf(c) - scale.ln())
}

/// CDF of a Weibull distribution.
pub fn cdf(x: f64, c: f64, loc: f64, scale: f64) -> Result<f64> {
    check_positive_shape("c", c)?;
    check_scale(scale)?;
    let z = (x - loc) / scale;
    if z <= 0.0 {
        return Ok(0.0);
    }
    Ok(-(-z.powf(c)).exp_m1())
}

/// Quantile function of a Weibull distribution.
pub fn ppf(p: f64, c: f64, loc: f64, scale: f64) -> Result<f64> {
    check_positive_shape("c", c)?;
    check_scale(scale)?;
    check_prob(p)?;
    Ok(loc + scale * (-(-p).ln_1p()).powf(1.0 / c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weibull_c1_matches_exponential() {
        let x = 0.7;
        let scale = 0.5;
        let lp_w = logpdf(x, 1.0, 0.0, scale).unwrap();
        let lp_e = crate::exponential::logpdf(x, 0.0, scale).unwrap();
        assert!((lp_w - lp_e).abs() < 1e-12);
    }

    #[test]
    fn test_ppf_inverts_cdf() {
        for p in [0.01, 0.25, 0.5, 0.9, 0.999] {
            let x = ppf(p, 1.5, 2.0, 10.0).unwrap();
            assert_relative_eq!(cdf(x, 1.5, 2.0, 10.0).unwrap(), p, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_out_of_support() {
        let lp = logpdf(-0.1, 2.0, 0.0, 1.0).unwrap();
        assert!(lp.is_infinite() && lp.is_sign_negative());
    }

    #[test]
    fn test_invalid_params() {
        assert!(logpdf(1.0, 0.0, 0.0, 1.0).is_err());
        assert!(logpdf(1.0, 1.0, 0.0, 0.0).is_err());
    }
}
