//! Fit summary artifact: one or more labelled fit results for export.

use std::time::{SystemTime, UNIX_EPOCH};

use pl_core::{FitResult, Result};
use serde::{Deserialize, Serialize};

/// Schema tag stamped into every summary.
pub const SCHEMA_VERSION: &str = "problab_fit_summary_v0";

/// Labelled fit results with provenance metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitSummaryArtifact {
    /// Schema tag.
    pub schema_version: String,
    /// Provenance.
    pub meta: FitSummaryMeta,
    /// Fits, in the order given.
    pub entries: Vec<FitSummaryEntry>,
}

/// Provenance of a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitSummaryMeta {
    /// Producing tool.
    pub tool: String,
    /// Producing tool version.
    pub tool_version: String,
    /// Wall-clock creation time.
    pub created_unix_ms: u128,
}

/// One labelled fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitSummaryEntry {
    /// Role of the fit, e.g. `mle` or `extreme`.
    pub label: String,
    /// The fit itself, flattened into the entry.
    #[serde(flatten)]
    pub fit: FitResult,
}

fn now_unix_ms() -> Result<u128> {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| pl_core::Error::Computation(format!("system time error: {}", e)))?;
    Ok(d.as_millis())
}

/// Wrap `(label, fit)` pairs into a summary artifact.
pub fn fit_summary_artifact<I, S>(results: I) -> Result<FitSummaryArtifact>
where
    I: IntoIterator<Item = (S, FitResult)>,
    S: Into<String>,
{
    Ok(FitSummaryArtifact {
        schema_version: SCHEMA_VERSION.to_string(),
        meta: FitSummaryMeta {
            tool: "problab".to_string(),
            tool_version: pl_core::VERSION.to_string(),
            created_unix_ms: now_unix_ms()?,
        },
        entries: results
            .into_iter()
            .map(|(label, fit)| FitSummaryEntry { label: label.into(), fit })
            .collect(),
    })
}

impl FitSummaryArtifact {
    /// Entry with the given label.
    pub fn get(&self, label: &str) -> Option<&FitResult> {
        self.entries.iter().find(|e| e.label == label).map(|e| &e.fit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(name: &str) -> FitResult {
        FitResult::from_loglik(name, vec![1.5], 0.0, 10.0, -100.0, 40, 3).unwrap()
    }

    #[test]
    fn test_summary_meta_and_order() {
        let s = fit_summary_artifact([("mle", fit("weibull_min")), ("extreme", fit("gev"))]).unwrap();
        assert_eq!(s.schema_version, SCHEMA_VERSION);
        assert_eq!(s.meta.tool_version, pl_core::VERSION);
        assert!(s.meta.created_unix_ms > 0);
        let labels: Vec<&str> = s.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["mle", "extreme"]);
        assert_eq!(s.get("extreme").unwrap().name, "gev");
        assert!(s.get("missing").is_none());
    }

    #[test]
    fn test_entry_json_is_flat() {
        let s = fit_summary_artifact([("mle", fit("weibull_min"))]).unwrap();
        let v = serde_json::to_value(&s).unwrap();
        let e = &v["entries"][0];
        assert_eq!(e["label"], "mle");
        assert_eq!(e["name"], "weibull_min");
        assert_eq!(e["n"], 40);
        assert!(e["aic"].is_number());
    }
}
