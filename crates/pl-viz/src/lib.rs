//! # pl-viz
//!
//! Diagnostic data artifacts for Probability Lab.
//!
//! This crate does no rendering. It emits plot-friendly structures (parallel
//! arrays instead of nested objects) that any plotting frontend can draw.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// ECDF vs. fitted CDF overlay.
pub mod cdf_overlay;

/// Quantile-quantile series.
pub mod qq;

/// Fit summary for export.
pub mod summary;

pub use cdf_overlay::{CdfOverlayArtifact, DEFAULT_N_POINTS, cdf_overlay_artifact};
pub use qq::{QQ_LEVELS, QqArtifact, qq_artifact};
pub use summary::{FitSummaryArtifact, FitSummaryEntry, FitSummaryMeta, fit_summary_artifact};
