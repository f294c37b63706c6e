//! Log-normal distribution utilities.

use pl_core::Result;

use crate::math::{
    LN_SQRT_2PI, check_positive_shape, check_prob, check_scale, std_normal_cdf, std_normal_ppf,
};

/// Log-PDF of a log-normal distribution with shape `s`, location `loc` and scale `scale` at `x`.
///
/// `ln((x - loc) / scale)` is Normal(0, s). Support: `x > loc`.
pub fn logpdf(x: f64, s: f64, loc: f64, scale: f64) -> Result<f64> {
    check_positive_shape("s", s)?;
    check_scale(scale)?;
    let z = (x - loc) / scale;
    if z <= 0.0 {
        return Ok(f64::NEG_INFINITY);
    }
    let lz = z.ln();
    let u = lz / s;
    Ok(-0.5 * u * u - s.ln() - LN_SQRT_2PI - lz - scale.ln())
}

/// CDF of a log-normal distribution.
pub fn cdf(x: f64, s: f64, loc: f64, scale: f64) -> Result<f64> {
    check_positive_shape("s", s)?;
    check_scale(scale)?;
    let z = (x - loc) / scale;
    if z <= 0.0 {
        return Ok(0.0);
    }
    Ok(std_normal_cdf(z.ln() / s))
}

/// Quantile function of a log-normal distribution.
pub fn ppf(p: f64, s: f64, loc: f64, scale: f64) -> Result<f64> {
    check_positive_shape("s", s)?;
    check_scale(scale)?;
    check_prob(p)?;
    Ok(loc + scale * (s * std_normal_ppf(p)).exp())
}
