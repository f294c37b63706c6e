//! Maximum Likelihood Estimation

use pl_core::{FitResult, Result};
use pl_prob::empirical;

use crate::catalog;
use crate::evt::{self, Threshold};
use crate::optimizer::OptimizerConfig;
use crate::trials::{self, TrialResults};

/// Maximum Likelihood Estimator
///
/// Fits catalog families by maximizing the summed log-density. Carries only
/// immutable optimizer configuration, so one estimator can be shared across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct MaximumLikelihoodEstimator {
    config: OptimizerConfig,
}

impl MaximumLikelihoodEstimator {
    /// Create a new MLE with default configuration
    pub fn new() -> Self {
        Self { config: OptimizerConfig::default() }
    }

    /// Create MLE with custom optimizer configuration
    pub fn with_config(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Access the optimizer configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Fit the family `name` (canonical or alias) to `sample`.
    ///
    /// The result keeps `name` exactly as requested and counts
    /// `k = shapes + 2` parameters.
    pub fn fit(&self, sample: &[f64], name: &str) -> Result<FitResult> {
        empirical::check_sample(sample)?;
        let handle = catalog::lookup(name)?;
        let est = handle.estimate_with(sample, &self.config)?;
        let loglik = handle.log_likelihood(sample, &est.shapes, est.loc, est.scale)?;
        let k = handle.n_shapes() + 2;

        let fit = FitResult::from_loglik(name, est.shapes, est.loc, est.scale, loglik, sample.len(), k)?;
        log::debug!("{}: loglik={:.6} aic={:.6} bic={:.6}", fit.name, fit.loglik, fit.aic, fit.bic);
        Ok(fit)
    }

    /// Fit a GEV to block maxima, see [`evt::fit_block_maxima`].
    pub fn fit_block_maxima(&self, sample: &[f64], block_size: usize) -> Result<FitResult> {
        evt::fit_block_maxima_with_config(sample, block_size, &self.config)
    }

    /// Fit a GPD to threshold exceedances, see [`evt::fit_peaks_over_threshold_with`].
    pub fn fit_peaks_over_threshold(&self, sample: &[f64], threshold: Threshold) -> Result<FitResult> {
        let u = threshold.resolve(sample)?;
        evt::fit_peaks_over_threshold_with_config(sample, u, &self.config)
    }

    /// Attempt every requested family sequentially, see [`trials::try_many`].
    pub fn try_many<S: AsRef<str>>(&self, sample: &[f64], names: &[S]) -> TrialResults {
        trials::run(self, sample, names, false)
    }

    /// Attempt every requested family on the rayon pool.
    pub fn try_many_parallel<S: AsRef<str>>(&self, sample: &[f64], names: &[S]) -> TrialResults {
        trials::run(self, sample, names, true)
    }
}

/// Fit the family `name` with the default optimizer configuration.
pub fn fit_mle(sample: &[f64], name: &str) -> Result<FitResult> {
    MaximumLikelihoodEstimator::new().fit(sample, name)
}
