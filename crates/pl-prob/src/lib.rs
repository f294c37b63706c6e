//! Probability building blocks for Probability Lab.
//!
//! This crate hosts the continuous loc/scale families used by the fitters:
//! - per-family `logpdf` / `cdf` / `ppf` in `(shapes..., loc, scale)` form
//! - empirical summaries of a sample (quantiles, ECDF, moments)
//! - small numeric helpers (stable exp, standard normal, CDF inversion)

pub mod empirical;
pub mod exponential;
pub mod gamma;
pub mod gev;
pub mod gompertz;
pub mod gpd;
pub mod lognormal;
pub mod math;
pub mod normal;
pub mod weibull;
