//! End-to-end fitting scenarios.
//!
//! - Weibull parameter recovery from a seeded synthetic sample
//! - Block maxima and peaks-over-threshold accounting on `1..=100`
//! - Trial runner totality with an unknown family

use approx::assert_relative_eq;
use pl_core::{Criterion, Error, ErrorKind};
use pl_inference::{
    Threshold, fit_block_maxima, fit_mle, fit_peaks_over_threshold, fit_peaks_over_threshold_with,
    toys::weibull_sample, try_many,
};

fn one_to_hundred() -> Vec<f64> {
    (1..=100).map(|i| i as f64).collect()
}

#[test]
fn weibull_recovers_shape_and_scale() {
    let xs = weibull_sample(1000, 1.5, 10.0, 42).unwrap();
    let fit = fit_mle(&xs, "weibull_min").unwrap();

    assert_eq!(fit.name, "weibull_min");
    assert_eq!(fit.n, 1000);
    assert!((fit.params[0] - 1.5).abs() < 0.3, "shape {}", fit.params[0]);
    assert!((fit.scale - 10.0).abs() < 2.0, "scale {}", fit.scale);
    assert_relative_eq!(fit.aic, 2.0 * 3.0 - 2.0 * fit.loglik, epsilon = 1e-9);
    assert_relative_eq!(fit.bic, 3.0 * 1000f64.ln() - 2.0 * fit.loglik, epsilon = 1e-9);
}

#[test]
fn weibull_beats_lognorm_on_weibull_data() {
    let xs = weibull_sample(1000, 1.5, 10.0, 42).unwrap();
    let res = try_many(&xs, &["weibull_min", "lognorm"]);
    let best = res.best(Criterion::Aic).unwrap();
    assert_eq!(best.name, "weibull_min");
}

#[test]
fn block_maxima_of_one_to_hundred() {
    let xs = one_to_hundred();
    let maxima = pl_inference::evt::block_maxima(&xs, 10).unwrap();
    assert_eq!(maxima, (1..=10).map(|i| (i * 10) as f64).collect::<Vec<_>>());

    let fit = fit_block_maxima(&xs, 10).unwrap();
    assert_eq!(fit.name, "genextreme(block-maxima)");
    assert_eq!(fit.n, 10);
    assert_eq!(fit.params.len(), 1);
    assert!(fit.scale > 0.0);
    assert_relative_eq!(fit.aic, 6.0 - 2.0 * fit.loglik, epsilon = 1e-9);
}

#[test]
fn block_maxima_rejects_zero_block_size() {
    let err = fit_block_maxima(&one_to_hundred(), 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn peaks_over_quantile_threshold() {
    let xs = one_to_hundred();
    let u = Threshold::from_config(0.9).resolve(&xs).unwrap();
    assert_relative_eq!(u, 90.1, epsilon = 1e-12);

    let fit = fit_peaks_over_threshold_with(&xs, Threshold::from_config(0.9)).unwrap();
    assert_eq!(fit.name, "genpareto(excess over threshold)");
    assert_eq!(fit.n, 10);
    assert_eq!(fit.loc, 0.0);
    assert_relative_eq!(fit.aic, 4.0 - 2.0 * fit.loglik, epsilon = 1e-9);
    assert_relative_eq!(fit.bic, 2.0 * 10f64.ln() - 2.0 * fit.loglik, epsilon = 1e-9);
}

#[test]
fn peaks_over_threshold_at_max_is_empty() {
    let err = fit_peaks_over_threshold(&one_to_hundred(), 100.0).unwrap_err();
    assert_eq!(err, Error::EmptyExceedanceSet { threshold: 100.0 });
    let err = fit_peaks_over_threshold(&one_to_hundred(), 250.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyExceedanceSet);
}

#[test]
fn try_many_records_unknown_family() {
    let xs = weibull_sample(300, 1.5, 10.0, 1).unwrap();
    let res = try_many(&xs, &["expon", "weibull_min", "bogus_dist"]);

    assert_eq!(res.len(), 3);
    assert_eq!(res.names(), vec!["expon", "weibull_min", "bogus_dist"]);
    assert!(res.get("expon").unwrap().is_ok());
    assert!(res.get("weibull_min").unwrap().is_ok());
    let failure = res.get("bogus_dist").unwrap().as_ref().unwrap_err();
    assert_eq!(failure.kind, ErrorKind::UnknownDistribution);
    assert!(failure.reason.contains("bogus_dist"));
}
