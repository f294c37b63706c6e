//! Distribution catalog: a closed, process-lifetime table of family handles.
//!
//! Each [`FamilyHandle`] bundles a family's canonical name, aliases, shape
//! parameter names and function pointers to its estimator and its scalar
//! density, CDF and quantile functions. Adding a family means adding one
//! entry to [`CATALOG`].

use pl_core::{Error, Result};
use pl_prob::empirical;
use std::fmt;

use crate::estimate::{self, Estimate};
use crate::optimizer::OptimizerConfig;

/// Estimator: sample and optimizer configuration to `(shapes, loc, scale)`.
pub type EstimateFn = fn(&[f64], &OptimizerConfig) -> Result<Estimate>;

/// Scalar function of `(x or p, shapes, loc, scale)`: log-density, CDF or quantile.
pub type LogPdfFn = fn(f64, &[f64], f64, f64) -> Result<f64>;

/// Static descriptor of one distribution family.
pub struct FamilyHandle {
    /// Canonical name
    pub name: &'static str,
    /// Accepted alternative names
    pub aliases: &'static [&'static str],
    /// Shape parameter names, in order
    pub shape_names: &'static [&'static str],
    estimate: EstimateFn,
    logpdf: LogPdfFn,
    cdf: LogPdfFn,
    ppf: LogPdfFn,
}

impl fmt::Debug for FamilyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FamilyHandle")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("shape_names", &self.shape_names)
            .finish_non_exhaustive()
    }
}

impl FamilyHandle {
    /// Number of shape parameters.
    pub fn n_shapes(&self) -> usize {
        self.shape_names.len()
    }

    /// True if `name` is the canonical name or one of the aliases.
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }

    /// Estimate `(shapes, loc, scale)` with the default optimizer configuration.
    pub fn estimate(&self, sample: &[f64]) -> Result<Estimate> {
        self.estimate_with(sample, &OptimizerConfig::default())
    }

    /// Estimate `(shapes, loc, scale)` with a given optimizer configuration.
    pub fn estimate_with(&self, sample: &[f64], config: &OptimizerConfig) -> Result<Estimate> {
        empirical::check_sample(sample)?;
        let est = (self.estimate)(sample, config)?;
        self.check_shapes(&est.shapes)?;
        Ok(est)
    }

    fn check_shapes(&self, shapes: &[f64]) -> Result<()> {
        if shapes.len() != self.n_shapes() {
            return Err(Error::Validation(format!(
                "{} expects {} shape parameter(s), got {}",
                self.name,
                self.n_shapes(),
                shapes.len()
            )));
        }
        Ok(())
    }

    /// Log-density at `x`.
    pub fn log_density(&self, x: f64, shapes: &[f64], loc: f64, scale: f64) -> Result<f64> {
        self.check_shapes(shapes)?;
        (self.logpdf)(x, shapes, loc, scale)
    }

    /// Density at `x`.
    pub fn density(&self, x: f64, shapes: &[f64], loc: f64, scale: f64) -> Result<f64> {
        Ok(self.log_density(x, shapes, loc, scale)?.exp())
    }

    /// Cumulative distribution at `x`.
    pub fn cumulative(&self, x: f64, shapes: &[f64], loc: f64, scale: f64) -> Result<f64> {
        self.check_shapes(shapes)?;
        (self.cdf)(x, shapes, loc, scale)
    }

    /// Quantile at probability `p`.
    pub fn quantile(&self, p: f64, shapes: &[f64], loc: f64, scale: f64) -> Result<f64> {
        self.check_shapes(shapes)?;
        (self.ppf)(p, shapes, loc, scale)
    }

    /// Densities at every point of `xs`.
    pub fn densities(&self, xs: &[f64], shapes: &[f64], loc: f64, scale: f64) -> Result<Vec<f64>> {
        xs.iter().map(|&x| self.density(x, shapes, loc, scale)).collect()
    }

    /// Cumulative distribution at every point of `xs`.
    pub fn cumulatives(&self, xs: &[f64], shapes: &[f64], loc: f64, scale: f64) -> Result<Vec<f64>> {
        xs.iter().map(|&x| self.cumulative(x, shapes, loc, scale)).collect()
    }

    /// Quantiles at every probability of `ps`.
    pub fn quantiles(&self, ps: &[f64], shapes: &[f64], loc: f64, scale: f64) -> Result<Vec<f64>> {
        ps.iter().map(|&p| self.quantile(p, shapes, loc, scale)).collect()
    }

    /// Summed log-density over `data`.
    ///
    /// Any point with zero or non-finite density is a [`Error::DegenerateFit`].
    pub fn log_likelihood(&self, data: &[f64], shapes: &[f64], loc: f64, scale: f64) -> Result<f64> {
        let mut total = 0.0;
        for &x in data {
            let lp = self.log_density(x, shapes, loc, scale)?;
            if !lp.is_finite() {
                return Err(Error::degenerate(
                    self.name,
                    format!("log-density at x={} is {}", x, lp),
                ));
            }
            total += lp;
        }
        Ok(total)
    }
}

/// Every supported family.
pub static CATALOG: [FamilyHandle; 8] = [
    FamilyHandle {
        name: "expon",
        aliases: &[],
        shape_names: &[],
        estimate: estimate::expon,
        logpdf: |x, _, loc, scale| pl_prob::exponential::logpdf(x, loc, scale),
        cdf: |x, _, loc, scale| pl_prob::exponential::cdf(x, loc, scale),
        ppf: |p, _, loc, scale| pl_prob::exponential::ppf(p, loc, scale),
    },
    FamilyHandle {
        name: "weibull_min",
        aliases: &[],
        shape_names: &["c"],
        estimate: estimate::weibull_min,
        logpdf: |x, s, loc, scale| pl_prob::weibull::logpdf(x, s[0], loc, scale),
        cdf: |x, s, loc, scale| pl_prob::weibull::cdf(x, s[0], loc, scale),
        ppf: |p, s, loc, scale| pl_prob::weibull::ppf(p, s[0], loc, scale),
    },
    FamilyHandle {
        name: "lognorm",
        aliases: &[],
        shape_names: &["s"],
        estimate: estimate::lognorm,
        logpdf: |x, s, loc, scale| pl_prob::lognormal::logpdf(x, s[0], loc, scale),
        cdf: |x, s, loc, scale| pl_prob::lognormal::cdf(x, s[0], loc, scale),
        ppf: |p, s, loc, scale| pl_prob::lognormal::ppf(p, s[0], loc, scale),
    },
    FamilyHandle {
        name: "gamma",
        aliases: &[],
        shape_names: &["a"],
        estimate: estimate::gamma_dist,
        logpdf: |x, s, loc, scale| pl_prob::gamma::logpdf(x, s[0], loc, scale),
        cdf: |x, s, loc, scale| pl_prob::gamma::cdf(x, s[0], loc, scale),
        ppf: |p, s, loc, scale| pl_prob::gamma::ppf(p, s[0], loc, scale),
    },
    FamilyHandle {
        name: "gompertz",
        aliases: &[],
        shape_names: &["c"],
        estimate: estimate::gompertz,
        logpdf: |x, s, loc, scale| pl_prob::gompertz::logpdf(x, s[0], loc, scale),
        cdf: |x, s, loc, scale| pl_prob::gompertz::cdf(x, s[0], loc, scale),
        ppf: |p, s, loc, scale| pl_prob::gompertz::ppf(p, s[0], loc, scale),
    },
    FamilyHandle {
        name: "genextreme",
        aliases: &["gev"],
        shape_names: &["c"],
        estimate: estimate::genextreme,
        logpdf: |x, s, loc, scale| pl_prob::gev::logpdf(x, s[0], loc, scale),
        cdf: |x, s, loc, scale| pl_prob::gev::cdf(x, s[0], loc, scale),
        ppf: |p, s, loc, scale| pl_prob::gev::ppf(p, s[0], loc, scale),
    },
    FamilyHandle {
        name: "genpareto",
        aliases: &["gpd"],
        shape_names: &["c"],
        estimate: estimate::genpareto,
        logpdf: |x, s, loc, scale| pl_prob::gpd::logpdf(x, s[0], loc, scale),
        cdf: |x, s, loc, scale| pl_prob::gpd::cdf(x, s[0], loc, scale),
        ppf: |p, s, loc, scale| pl_prob::gpd::ppf(p, s[0], loc, scale),
    },
    FamilyHandle {
        name: "norm",
        aliases: &[],
        shape_names: &[],
        estimate: estimate::norm,
        logpdf: |x, _, loc, scale| pl_prob::normal::logpdf(x, loc, scale),
        cdf: |x, _, loc, scale| pl_prob::normal::cdf(x, loc, scale),
        ppf: |p, _, loc, scale| pl_prob::normal::ppf(p, loc, scale),
    },
];

/// Resolve a family by canonical name or alias.
pub fn lookup(name: &str) -> Result<&'static FamilyHandle> {
    CATALOG.iter().find(|h| h.matches(name)).ok_or_else(|| Error::UnknownDistribution {
        name: name.to_string(),
        available: names().join(", "),
    })
}

/// Canonical names of every family, in catalog order.
pub fn names() -> Vec<&'static str> {
    CATALOG.iter().map(|h| h.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lookup_canonical_and_alias() {
        assert_eq!(lookup("weibull_min").unwrap().name, "weibull_min");
        assert_eq!(lookup("gpd").unwrap().name, "genpareto");
        assert_eq!(lookup("gev").unwrap().name, "genextreme");
    }

    #[test]
    fn test_lookup_unknown_lists_available() {
        match lookup("bogus_dist").unwrap_err() {
            Error::UnknownDistribution { name, available } => {
                assert_eq!(name, "bogus_dist");
                for n in names() {
                    assert!(available.contains(n));
                }
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut ns = names();
        ns.sort_unstable();
        ns.dedup();
        assert_eq!(ns.len(), CATALOG.len());
    }

    #[test]
    fn test_shape_arity_checked() {
        let h = lookup("weibull_min").unwrap();
        assert!(h.log_density(1.0, &[], 0.0, 1.0).is_err());
        assert!(h.log_density(1.0, &[1.5, 2.0], 0.0, 1.0).is_err());
        assert!(h.log_density(1.0, &[1.5], 0.0, 1.0).is_ok());
    }

    #[test]
    fn test_quantile_inverts_cumulative_for_every_family() {
        for h in CATALOG.iter() {
            let shapes = vec![0.5; h.n_shapes()];
            for p in [0.1, 0.5, 0.9] {
                let x = h.quantile(p, &shapes, 1.0, 2.0).unwrap();
                let back = h.cumulative(x, &shapes, 1.0, 2.0).unwrap();
                assert_relative_eq!(back, p, epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn test_log_likelihood_rejects_zero_density() {
        let h = lookup("expon").unwrap();
        let err = h.log_likelihood(&[0.5, 2.0], &[], 1.0, 1.0).unwrap_err();
        assert_eq!(err.kind(), pl_core::ErrorKind::DegenerateFit);
        let ll = h.log_likelihood(&[1.0, 2.0], &[], 1.0, 1.0).unwrap();
        assert_relative_eq!(ll, -1.0);
    }

    #[test]
    fn test_estimate_rejects_invalid_sample() {
        let h = lookup("expon").unwrap();
        assert_eq!(h.estimate(&[]).unwrap_err().kind(), pl_core::ErrorKind::InvalidSample);
        assert_eq!(
            h.estimate(&[1.0, f64::NAN]).unwrap_err().kind(),
            pl_core::ErrorKind::InvalidSample
        );
    }
}
