//! Sample loading: one CSV column, or whitespace-separated numbers.
//!
//! Cells that are empty, non-numeric or non-finite are dropped and counted.

use anyhow::Result;
use std::path::Path;

fn parse_cell(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_csv(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Read the numeric values of `column` from a CSV file with a header row.
pub fn read_csv_column(path: &Path, column: &str) -> Result<(Vec<f64>, usize)> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let Some(idx) = headers.iter().position(|h| h.trim() == column) else {
        anyhow::bail!(
            "column '{}' not found in {} (available: {})",
            column,
            path.display(),
            headers.iter().collect::<Vec<_>>().join(", ")
        );
    };

    let mut values = Vec::new();
    let mut dropped = 0;
    for record in rdr.records() {
        let record = record?;
        match record.get(idx).and_then(parse_cell) {
            Some(v) => values.push(v),
            None => dropped += 1,
        }
    }
    Ok((values, dropped))
}

/// Parse whitespace-separated numbers.
pub fn parse_plain(text: &str) -> (Vec<f64>, usize) {
    let mut values = Vec::new();
    let mut dropped = 0;
    for tok in text.split_whitespace() {
        match parse_cell(tok) {
            Some(v) => values.push(v),
            None => dropped += 1,
        }
    }
    (values, dropped)
}

/// Load a sample from `path`.
///
/// With `column`, the file is read as CSV with a header row; a `.csv` file
/// without `column` is an error. Otherwise it is plain text.
pub fn read_sample(path: &Path, column: Option<&str>) -> Result<Vec<f64>> {
    tracing::info!(path = %path.display(), column = column.unwrap_or("-"), "loading sample");
    let (values, dropped) = match column {
        Some(col) => read_csv_column(path, col)?,
        None if is_csv(path) => {
            anyhow::bail!("--column is required for CSV input: {}", path.display())
        }
        None => parse_plain(&std::fs::read_to_string(path)?),
    };
    if dropped > 0 {
        tracing::warn!(dropped, kept = values.len(), "dropped missing or non-numeric values");
    }
    if values.is_empty() {
        anyhow::bail!("no numeric values in {}", path.display());
    }
    tracing::info!(n = values.len(), "sample loaded");
    Ok(values)
}
