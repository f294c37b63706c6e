//! Multi-model trial runner.
//!
//! Attempts one MLE fit per requested family and records every outcome,
//! success or failure, instead of stopping at the first error.

use pl_core::{Criterion, FailureRecord, FitResult, TrialOutcome};
use rayon::prelude::*;

use crate::mle::MaximumLikelihoodEstimator;

/// Families attempted when the caller does not name any.
pub const DEFAULT_TRIAL_FAMILIES: [&str; 5] = ["expon", "weibull_min", "lognorm", "gamma", "gompertz"];

/// Outcomes keyed by requested name, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialResults {
    entries: Vec<(String, TrialOutcome)>,
}

impl TrialResults {
    /// Number of distinct requested names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was requested.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Outcome for a requested name.
    pub fn get(&self, name: &str) -> Option<&TrialOutcome> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, o)| o)
    }

    /// `(name, outcome)` pairs in request order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TrialOutcome)> {
        self.entries.iter().map(|(n, o)| (n.as_str(), o))
    }

    /// Requested names in order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Successful fits in request order.
    pub fn successes(&self) -> impl Iterator<Item = &FitResult> {
        self.entries.iter().filter_map(|(_, o)| o.as_ref().ok())
    }

    /// Failed attempts in request order.
    pub fn failures(&self) -> impl Iterator<Item = &FailureRecord> {
        self.entries.iter().filter_map(|(_, o)| o.as_ref().err())
    }

    /// Successful fits sorted by ascending criterion; ties keep request order.
    pub fn ranked(&self, criterion: Criterion) -> Vec<&FitResult> {
        let mut fits: Vec<&FitResult> = self.successes().collect();
        fits.sort_by(|a, b| a.criterion(criterion).total_cmp(&b.criterion(criterion)));
        fits
    }

    /// Lowest-criterion fit, if any attempt succeeded.
    pub fn best(&self, criterion: Criterion) -> Option<&FitResult> {
        self.ranked(criterion).into_iter().next()
    }
}

impl<'a> IntoIterator for &'a TrialResults {
    type Item = &'a (String, TrialOutcome);
    type IntoIter = std::slice::Iter<'a, (String, TrialOutcome)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Requested names with repeats dropped, first occurrence wins.
fn distinct<S: AsRef<str>>(names: &[S]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::with_capacity(names.len());
    for n in names {
        let n = n.as_ref();
        if !out.contains(&n) {
            out.push(n);
        }
    }
    out
}

fn attempt(mle: &MaximumLikelihoodEstimator, sample: &[f64], name: &str) -> TrialOutcome {
    mle.fit(sample, name).map_err(|e| {
        log::warn!("fit '{}' failed: {}", name, e);
        FailureRecord::new(name, &e)
    })
}

pub(crate) fn run<S: AsRef<str>>(
    mle: &MaximumLikelihoodEstimator,
    sample: &[f64],
    names: &[S],
    parallel: bool,
) -> TrialResults {
    let names = distinct(names);
    let outcomes: Vec<TrialOutcome> = if parallel {
        names.par_iter().map(|n| attempt(mle, sample, n)).collect()
    } else {
        names.iter().map(|n| attempt(mle, sample, n)).collect()
    };
    let entries = names.into_iter().map(str::to_string).zip(outcomes).collect();
    TrialResults { entries }
}

/// Attempt an MLE fit for every requested family.
///
/// Exactly one entry per distinct requested name; a failed fit is recorded
/// as a [`FailureRecord`] and does not affect the others.
pub fn try_many<S: AsRef<str>>(sample: &[f64], names: &[S]) -> TrialResults {
    MaximumLikelihoodEstimator::new().try_many(sample, names)
}

/// Like [`try_many`], running the attempts on the rayon pool.
pub fn try_many_parallel<S: AsRef<str>>(sample: &[f64], names: &[S]) -> TrialResults {
    MaximumLikelihoodEstimator::new().try_many_parallel(sample, names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pl_core::ErrorKind;

    fn sample() -> Vec<f64> {
        vec![0.3, 1.2, 0.8, 2.5, 0.1, 1.7, 0.9, 3.4, 0.6, 1.1, 0.4, 2.2, 1.4, 0.7, 5.1]
    }

    #[test]
    fn test_duplicates_collapse_onto_first() {
        let res = try_many(&sample(), &["expon", "norm", "expon"]);
        assert_eq!(res.names(), vec!["expon", "norm"]);
    }

    #[test]
    fn test_failures_are_recorded() {
        let res = try_many(&sample(), &["bogus_dist", "expon"]);
        assert_eq!(res.len(), 2);
        let failure = res.get("bogus_dist").unwrap().as_ref().unwrap_err();
        assert_eq!(failure.kind, ErrorKind::UnknownDistribution);
        assert!(res.get("expon").unwrap().is_ok());
        assert_eq!(res.failures().count(), 1);
        assert_eq!(res.successes().count(), 1);
    }

    #[test]
    fn test_ranked_is_ascending() {
        let res = try_many(&sample(), &DEFAULT_TRIAL_FAMILIES);
        let ranked = res.ranked(Criterion::Aic);
        for pair in ranked.windows(2) {
            assert!(pair[0].aic <= pair[1].aic);
        }
        assert_eq!(res.best(Criterion::Aic), ranked.first().copied());
    }

    #[test]
    fn test_ranked_ties_keep_request_order() {
        // alias and canonical name fit identically, so the criteria tie
        let res = try_many(&sample(), &["gev", "genextreme"]);
        assert_eq!(res.successes().count(), 2);
        let ranked = res.ranked(Criterion::Aic);
        assert_eq!(ranked[0].aic, ranked[1].aic);
        let names: Vec<&str> = ranked.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["gev", "genextreme"]);

        let res = try_many(&sample(), &["genextreme", "gev"]);
        let names: Vec<&str> = res.ranked(Criterion::Bic).iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["genextreme", "gev"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let names = ["expon", "norm", "bogus_dist", "gamma"];
        let seq = try_many(&sample(), &names);
        let par = try_many_parallel(&sample(), &names);
        assert_eq!(seq, par);
    }

    #[test]
    fn test_empty_request() {
        let names: [&str; 0] = [];
        assert!(try_many(&sample(), &names).is_empty());
    }
}
