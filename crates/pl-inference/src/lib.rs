//! # pl-inference
//!
//! Statistical inference for Probability Lab.
//!
//! This crate provides:
//! - the distribution catalog and per-family estimators
//! - Maximum Likelihood Estimation scored by AIC/BIC
//! - extreme-value fitters (block-maxima GEV, peaks-over-threshold GPD)
//! - a multi-model trial runner
//!
//! ## Architecture
//!
//! Likelihoods implement `LogDensityModel` from pl-core and are minimized by
//! a bounded Nelder-Mead wrapper; closed-form densities come from pl-prob.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Distribution catalog of family handles.
pub mod catalog;
/// Per-family estimators.
pub mod estimate;
/// Extreme value models and fitters.
pub mod evt;
/// Maximum-likelihood estimation via Nelder-Mead.
pub mod mle;
/// Generic numerical optimizer (Nelder-Mead backend).
pub mod optimizer;
/// Synthetic samples.
pub mod toys;
/// Multi-model trial runner.
pub mod trials;

pub use catalog::{CATALOG, FamilyHandle, lookup, names};
pub use estimate::Estimate;
pub use evt::{
    Threshold, excess_quantile, fit_block_maxima, fit_peaks_over_threshold,
    fit_peaks_over_threshold_with, return_level,
};
pub use mle::{MaximumLikelihoodEstimator, fit_mle};
pub use optimizer::{NelderMeadOptimizer, ObjectiveFunction, OptimizationResult, OptimizerConfig};
pub use trials::{DEFAULT_TRIAL_FAMILIES, TrialResults, try_many, try_many_parallel};
