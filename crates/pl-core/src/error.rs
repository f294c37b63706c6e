//! Error types for Probability Lab

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Probability Lab error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Requested family name is not in the distribution catalog
    #[error("Unknown distribution '{name}' (available: {available})")]
    UnknownDistribution {
        /// Name as requested by the caller
        name: String,
        /// Comma-separated canonical names of the catalog
        available: String,
    },

    /// Sample is empty or contains non-finite values
    #[error("Invalid sample: {0}")]
    InvalidSample(String),

    /// Estimated parameters do not define a usable likelihood
    #[error("Degenerate fit for '{family}': {reason}")]
    DegenerateFit {
        /// Family (or fitter variant) being fitted
        family: String,
        /// What made the fit degenerate
        reason: String,
    },

    /// Peaks-over-threshold filtering left no observations
    #[error("No observations exceed threshold {threshold}")]
    EmptyExceedanceSet {
        /// Resolved (literal) threshold
        threshold: f64,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Flat tag for an [`Error`] variant.
///
/// Used where an error has to be stored as data, e.g. in a
/// [`FailureRecord`](crate::FailureRecord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`Error::UnknownDistribution`]
    UnknownDistribution,
    /// See [`Error::InvalidSample`]
    InvalidSample,
    /// See [`Error::DegenerateFit`]
    DegenerateFit,
    /// See [`Error::EmptyExceedanceSet`]
    EmptyExceedanceSet,
    /// See [`Error::Validation`]
    Validation,
    /// See [`Error::Computation`]
    Computation,
}

impl Error {
    /// Variant tag of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownDistribution { .. } => ErrorKind::UnknownDistribution,
            Error::InvalidSample(_) => ErrorKind::InvalidSample,
            Error::DegenerateFit { .. } => ErrorKind::DegenerateFit,
            Error::EmptyExceedanceSet { .. } => ErrorKind::EmptyExceedanceSet,
            Error::Validation(_) => ErrorKind::Validation,
            Error::Computation(_) => ErrorKind::Computation,
        }
    }

    /// Shorthand for [`Error::DegenerateFit`].
    pub fn degenerate(family: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::DegenerateFit { family: family.into(), reason: reason.into() }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
