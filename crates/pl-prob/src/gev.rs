//! Generalized extreme value distribution utilities.
//!
//! The shape uses the `c` sign convention: `c = -ξ`, so `c > 0` gives a bounded
//! upper tail (Weibull type), `c < 0` a heavy upper tail (Fréchet type) and
//! `c = 0` the Gumbel limit.

use pl_core::Result;

use crate::math::{SHAPE_ZERO_EPS, check_finite_shape, check_prob, check_scale};

/// Log-PDF of a GEV distribution with shape `c`, location `loc` and scale `scale` at `x`.
pub fn logpdf(x: f64, c: f64, loc: f64, scale: f64) -> Result<f64> {
    check_finite_shape("c", c)?;
    check_scale(scale)?;
    let z = (x - loc) / scale;

    if c.abs() < SHAPE_ZERO_EPS {
        return Ok(-z - (-z).exp() - scale.ln());
    }

    let t = 1.0 - c * z;
    if t <= 0.0 {
        return Ok(f64::NEG_INFINITY);
    }
    let inv_c = 1.0 / c;
    Ok((inv_c - 1.0) * t.ln() - t.powf(inv_c) - scale.ln())
}

/// CDF of a GEV distribution.
pub fn cdf(x: f64, c: f64, loc: f64, scale: f64) -> Result<f64> {
    check_finite_shape("c", c)?;
    check_scale(scale)?;
    let z = (x - loc) / scale;

    if c.abs() < SHAPE_ZERO_EPS {
        return Ok((-(-z).exp()).exp());
    }

    let t = 1.0 - c * z;
    if t <= 0.0 {
        // past the finite end point of the support
        return Ok(if c > 0.0 { 1.0 } else { 0.0 });
    }
    Ok((-t.powf(1.0 / c)).exp())
}

/// Quantile function of a GEV distribution.
pub fn ppf(p: f64, c: f64, loc: f64, scale: f64) -> Result<f64> {
    check_finite_shape("c", c)?;
    check_scale(scale)?;
    check_prob(p)?;
    let gumbel = c.abs() < SHAPE_ZERO_EPS;

    if p == 0.0 {
        return Ok(if gumbel || c > 0.0 { f64::NEG_INFINITY } else { loc + scale / c });
    }
    if p == 1.0 {
        return Ok(if !gumbel && c > 0.0 { loc + scale / c } else { f64::INFINITY });
    }

    let y = -p.ln();
    if gumbel {
        return Ok(loc - scale * y.ln());
    }
    Ok(loc + scale * (1.0 - y.powf(c)) / c)
}
