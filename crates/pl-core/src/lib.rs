//! # pl-core
//!
//! Core types for Probability Lab: the error type, the [`FitResult`] record
//! shared by every fitting path, information criteria and the
//! [`LogDensityModel`](traits::LogDensityModel) trait.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod criteria;
pub mod error;
pub mod traits;
pub mod types;

pub use criteria::Criterion;
pub use error::{Error, ErrorKind, Result};
pub use types::{FailureRecord, FitResult, TrialOutcome};

/// Crate version, stamped into exported artifacts.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
