//! Small numerically-stable math utilities used across probability code.

use pl_core::{Error, Result};
use statrs::function::erf::{erfc, erfc_inv};

/// Natural log of `sqrt(2π)`.
pub const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_7;

/// Shape parameters closer to zero than this use the limiting closed form
/// (Gumbel for GEV, exponential for GPD).
pub const SHAPE_ZERO_EPS: f64 = 1e-8;

/// Exponential with a conservative clamp to avoid overflow.
///
/// For `x > 700`, `exp(x)` can overflow to `inf`. Optimizers working in log-space
/// need the objective to stay finite so they can recover.
#[inline]
pub fn exp_clamped(x: f64) -> f64 {
    x.clamp(-700.0, 700.0).exp()
}

/// Standard normal CDF `Φ(x)`.
#[inline]
pub fn std_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Standard normal quantile `Φ⁻¹(p)`; `±inf` at the end points.
#[inline]
pub fn std_normal_ppf(p: f64) -> f64 {
    -std::f64::consts::SQRT_2 * erfc_inv(2.0 * p)
}

/// Validate a scale parameter.
pub fn check_scale(scale: f64) -> Result<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Error::Validation(format!("scale must be finite and > 0, got {}", scale)));
    }
    Ok(())
}

/// Validate a strictly positive shape parameter.
pub fn check_positive_shape(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::Validation(format!("{} must be finite and > 0, got {}", name, value)));
    }
    Ok(())
}

/// Validate a finite (possibly signed) shape parameter.
pub fn check_finite_shape(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::Validation(format!("{} must be finite, got {}", name, value)));
    }
    Ok(())
}

/// Validate a probability for quantile evaluation.
pub fn check_prob(p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::Validation(format!("p must be in [0, 1], got {}", p)));
    }
    Ok(())
}

/// Invert a monotone CDF on `[lower, +inf)` by bracketing and bisection.
///
/// `cdf` must be non-decreasing with `cdf(lower) <= p`.
pub fn invert_cdf<F: Fn(f64) -> f64>(cdf: F, p: f64, lower: f64) -> Result<f64> {
    check_prob(p)?;
    if p == 0.0 {
        return Ok(lower);
    }
    if p == 1.0 {
        return Ok(f64::INFINITY);
    }

    let mut lo = lower;
    let mut hi = lower + 1.0;
    let mut expansions = 0;
    while cdf(hi) < p {
        lo = hi;
        hi = lower + 2.0 * (hi - lower);
        expansions += 1;
        if expansions > 1100 || !hi.is_finite() {
            return Err(Error::Computation(format!("could not bracket quantile p={}", p)));
        }
    }

    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if cdf(mid) < p {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo <= 1e-14 * hi.abs().max(1.0) {
            break;
        }
    }
    Ok(0.5 * (lo + hi))
}

/// `n` evenly spaced points over `[start, stop]`, both end points included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| if i == n - 1 { stop } else { start + step * i as f64 }).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exp_clamped_is_finite_extremes() {
        let xs: [f64; 4] = [-1e6, -100.0, 100.0, 1e6];
        for x in xs {
            let y = exp_clamped(x);
            assert!(y.is_finite(), "x={} produced {}", x, y);
            assert!(y >= 0.0);
        }
        assert!((exp_clamped(1e6).ln() - 700.0).abs() < 1e-12);
    }

    #[test]
    fn test_std_normal_cdf_ppf() {
        assert_relative_eq!(std_normal_cdf(0.0), 0.5, epsilon = 1e-15);
        assert_relative_eq!(std_normal_cdf(1.959_963_984_540_054), 0.975, epsilon = 1e-12);
        assert_relative_eq!(std_normal_ppf(0.975), 1.959_963_984_540_054, epsilon = 1e-9);
        assert!(std_normal_ppf(0.0).is_infinite() && std_normal_ppf(0.0) < 0.0);
        assert!(std_normal_ppf(1.0).is_infinite() && std_normal_ppf(1.0) > 0.0);
    }

    #[test]
    fn test_invert_cdf_exponential() {
        let cdf = |x: f64| if x <= 0.0 { 0.0 } else { 1.0 - (-x).exp() };
        let q = invert_cdf(cdf, 0.5, 0.0).unwrap();
        assert_relative_eq!(q, 2.0_f64.ln(), epsilon = 1e-10);
        assert_eq!(invert_cdf(cdf, 0.0, 0.0).unwrap(), 0.0);
        assert!(invert_cdf(cdf, 1.0, 0.0).unwrap().is_infinite());
        assert!(invert_cdf(cdf, 1.5, 0.0).is_err());
    }

    #[test]
    fn test_linspace() {
        let xs = linspace(0.01, 0.99, 99);
        assert_eq!(xs.len(), 99);
        assert_relative_eq!(xs[0], 0.01);
        assert_relative_eq!(xs[49], 0.5, epsilon = 1e-12);
        assert_eq!(xs[98], 0.99);
        assert_eq!(linspace(3.0, 5.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_param_checks() {
        assert!(check_scale(1.0).is_ok());
        assert!(check_scale(0.0).is_err());
        assert!(check_positive_shape("c", -1.0).is_err());
        assert!(check_finite_shape("c", -1.0).is_ok());
        assert!(check_finite_shape("c", f64::NAN).is_err());
        assert!(check_prob(-0.1).is_err());
    }
}
