//! Empirical summaries of a sample: order statistics, quantiles, ECDF and moments.

use pl_core::{Error, Result};

use crate::math::check_prob;

/// Validate a sample: non-empty and all values finite.
pub fn check_sample(sample: &[f64]) -> Result<()> {
    if sample.is_empty() {
        return Err(Error::InvalidSample("sample is empty".to_string()));
    }
    if let Some((i, v)) = sample.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(Error::InvalidSample(format!("sample[{}] is not finite: {}", i, v)));
    }
    Ok(())
}

/// Ascending copy of the sample.
pub fn sorted(sample: &[f64]) -> Vec<f64> {
    let mut xs = sample.to_vec();
    xs.sort_by(|a, b| a.total_cmp(b));
    xs
}

/// Quantile of an already sorted sample, linear interpolation between order statistics.
///
/// Position `h = p * (n - 1)`; the result is `x[⌊h⌋] + (h - ⌊h⌋) (x[⌊h⌋+1] - x[⌊h⌋])`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Result<f64> {
    check_prob(p)?;
    if sorted.is_empty() {
        return Err(Error::InvalidSample("cannot take a quantile of an empty sample".to_string()));
    }
    let h = p * (sorted.len() - 1) as f64;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = h - lo as f64;
    Ok(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Quantile of an unsorted sample.
pub fn quantile(sample: &[f64], p: f64) -> Result<f64> {
    quantile_sorted(&sorted(sample), p)
}

/// Empirical CDF: sorted values paired with `i / n` for `i = 1..=n`.
pub fn ecdf(sample: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let xs = sorted(sample);
    let n = xs.len() as f64;
    let ys = (1..=xs.len()).map(|i| i as f64 / n).collect();
    (xs, ys)
}

/// Arithmetic mean; `NaN` for an empty sample.
pub fn mean(sample: &[f64]) -> f64 {
    sample.iter().sum::<f64>() / sample.len() as f64
}

/// Population standard deviation (divisor `n`).
pub fn std_dev(sample: &[f64]) -> f64 {
    let m = mean(sample);
    let var = sample.iter().map(|x| (x - m).powi(2)).sum::<f64>() / sample.len() as f64;
    var.sqrt()
}

/// Minimum and maximum of a non-empty sample.
pub fn min_max(sample: &[f64]) -> Option<(f64, f64)> {
    let first = *sample.first()?;
    Some(sample.iter().fold((first, first), |(lo, hi), &x| (lo.min(x), hi.max(x))))
}
