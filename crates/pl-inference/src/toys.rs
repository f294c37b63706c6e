//! Synthetic sample generation.

use pl_core::{Error, Result};
use rand::SeedableRng;
use rand_distr::{Distribution, Weibull};

/// Draw `n` Weibull(shape, scale) time-to-event values.
///
/// Sampling is deterministic for a given `seed`.
pub fn weibull_sample(n: usize, shape: f64, scale: f64, seed: u64) -> Result<Vec<f64>> {
    let dist = Weibull::new(scale, shape)
        .map_err(|e| Error::Validation(format!("invalid Weibull(shape={shape}, scale={scale}): {e}")))?;
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    Ok((0..n).map(|_| dist.sample(&mut rng)).collect())
}
