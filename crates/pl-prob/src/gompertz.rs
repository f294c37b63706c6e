//! Gompertz distribution utilities.

use pl_core::Result;

use crate::math::{check_positive_shape, check_prob, check_scale};

/// Log-PDF of a Gompertz distribution with shape `c`, location `loc` and scale `scale` at `x`.
///
/// `f(z) = c e^z exp(-c (e^z - 1))` on `z = (x - loc) / scale >= 0`.
pub fn logpdf(x: f64, c: f64, loc: f64, scale: f64) -> Result<f64> {
    check_positive_shape("c", c)?;
    check_scale(scale)?;
    let z = (x - loc) / scale;
    if z < 0.0 {
        return Ok(f64::NEG_INFINITY);
    }
    let lp = c.ln() + z - c * z.exp_m1() - scale.ln();
    Ok(if lp.is_nan() { f64::NEG_INFINITY } else { lp })
}

/// CDF of a Gompertz distribution.
pub fn cdf(x: f64, c: f64, loc: f64, scale: f64) -> Result<f64> {
    check_positive_shape("c", c)?;
    check_scale(scale)?;
    let z = (x - loc) / scale;
    if z <= 0.0 {
        return Ok(0.0);
    }
    Ok(-(-c * z.exp_m1()).exp_m1())
}

/// Quantile function of a Gompertz distribution.
pub fn ppf(p: f64, c: f64, loc: f64, scale: f64) -> Result<f64> {
    check_positive_shape("c", c)?;
    check_scale(scale)?;
    check_prob(p)?;
    Ok(loc + scale * (-(-p).ln_1p() / c).ln_1p())
}
