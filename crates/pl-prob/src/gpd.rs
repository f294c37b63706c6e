//! Generalized Pareto distribution utilities.
//!
//! The shape `c` equals the tail index `ξ`: `c > 0` is heavy-tailed, `c < 0` has
//! a finite upper end point at `loc - scale / c`, `c = 0` is exponential.

use pl_core::Result;

use crate::math::{SHAPE_ZERO_EPS, check_finite_shape, check_prob, check_scale};

/// Log-PDF of a GPD with shape `c`, location `loc` and scale `scale` at `x`.
pub fn logpdf(x: f64, c: f64, loc: f64, scale: f64) -> Result<f64> {
    check_finite_shape("c", c)?;
    check_scale(scale)?;
    let z = (x - loc) / scale;
    if z < 0.0 {
        return Ok(f64::NEG_INFINITY);
    }

    if c.abs() < SHAPE_ZERO_EPS {
        return Ok(-z - scale.ln());
    }

    let t = 1.0 + c * z;
    if t <= 0.0 {
        return Ok(f64::NEG_INFINITY);
    }
    Ok(-(1.0 + 1.0 / c) * t.ln() - scale.ln())
}

/// CDF of a GPD.
pub fn cdf(x: f64, c: f64, loc: f64, scale: f64) -> Result<f64> {
    check_finite_shape("c", c)?;
    check_scale(scale)?;
    let z = (x - loc) / scale;
    if z <= 0.0 {
        return Ok(0.0);
    }

    if c.abs() < SHAPE_ZERO_EPS {
        return Ok(-(-z).exp_m1());
    }

    let t = 1.0 + c * z;
    if t <= 0.0 {
        return Ok(1.0);
    }
    Ok(-(-(c * z).ln_1p() / c).exp_m1())
}

/// Quantile function of a GPD.
pub fn ppf(p: f64, c: f64, loc: f64, scale: f64) -> Result<f64> {
    check_finite_shape("c", c)?;
    check_scale(scale)?;
    check_prob(p)?;

    if c.abs() < SHAPE_ZERO_EPS {
        return Ok(loc - scale * (-p).ln_1p());
    }
    if p == 1.0 {
        return Ok(if c < 0.0 { loc - scale / c } else { f64::INFINITY });
    }
    Ok(loc + scale * (-c * (-p).ln_1p()).exp_m1() / c)
}
