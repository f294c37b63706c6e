//! Probability Lab CLI

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pl_core::{Criterion, FitResult};
use pl_inference::{MaximumLikelihoodEstimator, Threshold, TrialResults};
use pl_viz::{CdfOverlayArtifact, DEFAULT_N_POINTS, QqArtifact};
use std::path::PathBuf;

mod input;
mod run;

/// Families compared when `compare` is given no `--dist`.
pub(crate) const DEFAULT_DISTRIBUTIONS: [&str; 6] =
    ["expon", "weibull_min", "lognorm", "gamma", "genextreme", "gpd"];

#[derive(Parser)]
#[command(name = "pl-cli")]
#[command(about = "Probability Lab - distribution fitting and extreme value analysis")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit one family by maximum likelihood
    Fit {
        /// Input sample (CSV with header, or whitespace-separated numbers)
        #[arg(short, long)]
        input: PathBuf,

        /// CSV column to read
        #[arg(long)]
        column: Option<String>,

        /// Family name or alias (e.g. weibull_min, gpd)
        #[arg(long)]
        dist: String,

        /// Also write CDF overlay and QQ artifacts to this file
        #[arg(long)]
        diagnostics: Option<PathBuf>,

        /// Grid size of the CDF overlay
        #[arg(long, default_value_t = DEFAULT_N_POINTS)]
        n_points: usize,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fit several families and rank them
    Compare {
        /// Input sample (CSV with header, or whitespace-separated numbers)
        #[arg(short, long)]
        input: PathBuf,

        /// CSV column to read
        #[arg(long)]
        column: Option<String>,

        /// Family to try (repeatable). Defaults to the standard set.
        #[arg(long)]
        dist: Vec<String>,

        /// Ranking criterion
        #[arg(long, value_enum, default_value = "aic")]
        criterion: CriterionArg,

        /// Threads (0 = auto). Use 1 for sequential fitting.
        #[arg(long, default_value = "1")]
        threads: usize,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fit a GEV to block maxima
    BlockMaxima {
        /// Input sample (CSV with header, or whitespace-separated numbers)
        #[arg(short, long)]
        input: PathBuf,

        /// CSV column to read
        #[arg(long)]
        column: Option<String>,

        /// Observations per block
        #[arg(long)]
        block_size: usize,

        /// Also report the return level for this period, in blocks
        #[arg(long)]
        return_period: Option<f64>,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fit a GPD to threshold exceedances
    Pot {
        /// Input sample (CSV with header, or whitespace-separated numbers)
        #[arg(short, long)]
        input: PathBuf,

        /// CSV column to read
        #[arg(long)]
        column: Option<String>,

        /// Threshold: a quantile level if in (0, 1), otherwise a literal value
        #[arg(long)]
        threshold: f64,

        /// Also report the fitted excess at this probability level in (0, 1)
        #[arg(long)]
        excess_quantile: Option<f64>,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a synthetic Weibull sample, one value per line
    Synth {
        /// Number of draws
        #[arg(long)]
        n: usize,

        /// Weibull shape
        #[arg(long, default_value = "1.5")]
        shape: f64,

        /// Weibull scale
        #[arg(long, default_value = "10.0")]
        scale: f64,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output file. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run an experiment described by a YAML/JSON config
    Run {
        /// Experiment config (YAML or JSON)
        #[arg(long)]
        config: PathBuf,
    },

    /// Print version information
    Version,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CriterionArg {
    Aic,
    Bic,
}

impl From<CriterionArg> for Criterion {
    fn from(c: CriterionArg) -> Self {
        match c {
            CriterionArg::Aic => Criterion::Aic,
            CriterionArg::Bic => Criterion::Bic,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Fit { input, column, dist, diagnostics, n_points, output } => cmd_fit(
            &input,
            column.as_deref(),
            &dist,
            diagnostics.as_ref(),
            n_points,
            output.as_ref(),
        ),
        Commands::Compare { input, column, dist, criterion, threads, output } => {
            cmd_compare(&input, column.as_deref(), &dist, criterion.into(), threads, output.as_ref())
        }
        Commands::BlockMaxima { input, column, block_size, return_period, output } => {
            cmd_block_maxima(&input, column.as_deref(), block_size, return_period, output.as_ref())
        }
        Commands::Pot { input, column, threshold, excess_quantile, output } => {
            cmd_pot(&input, column.as_deref(), threshold, excess_quantile, output.as_ref())
        }
        Commands::Synth { n, shape, scale, seed, output } => {
            cmd_synth(n, shape, scale, seed, output.as_ref())
        }
        Commands::Run { config } => run::run_experiment(&config),
        Commands::Version => {
            println!("problab {}", pl_core::VERSION);
            Ok(())
        }
    }
}

fn log_fit(fit: &FitResult) {
    tracing::info!(
        family = %fit.name,
        n = fit.n,
        loc = fit.loc,
        scale = fit.scale,
        loglik = fit.loglik,
        aic = fit.aic,
        bic = fit.bic,
        "fit complete"
    );
}

fn cmd_fit(
    input: &PathBuf,
    column: Option<&str>,
    dist: &str,
    diagnostics: Option<&PathBuf>,
    n_points: usize,
    output: Option<&PathBuf>,
) -> Result<()> {
    let sample = input::read_sample(input, column)?;
    let fit = MaximumLikelihoodEstimator::new().fit(&sample, dist)?;
    log_fit(&fit);

    if let Some(path) = diagnostics {
        let overlay = CdfOverlayArtifact::from_fit(&sample, &fit, n_points)?;
        let qq = QqArtifact::from_fit(&sample, &fit)?;
        let value = serde_json::json!({ "cdf_overlay": overlay, "qq": qq });
        write_json(Some(path), value)?;
        tracing::info!(path = %path.display(), "diagnostics written");
    }

    write_json(output, serde_json::to_value(&fit)?)
}

fn trial_json(results: &TrialResults, criterion: Criterion) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = results
        .iter()
        .map(|(name, outcome)| match outcome {
            Ok(fit) => serde_json::json!({ "name": name, "ok": true, "fit": fit }),
            Err(failure) => serde_json::json!({ "name": name, "ok": false, "failure": failure }),
        })
        .collect();
    let ranked: Vec<&str> = results.ranked(criterion).iter().map(|f| f.name.as_str()).collect();
    serde_json::json!({
        "criterion": match criterion {
            Criterion::Aic => "aic",
            Criterion::Bic => "bic",
        },
        "best": results.best(criterion),
        "ranking": ranked,
        "results": entries,
    })
}

fn cmd_compare(
    input: &PathBuf,
    column: Option<&str>,
    dists: &[String],
    criterion: Criterion,
    threads: usize,
    output: Option<&PathBuf>,
) -> Result<()> {
    let sample = input::read_sample(input, column)?;
    let names: Vec<String> = if dists.is_empty() {
        DEFAULT_DISTRIBUTIONS.iter().map(|s| s.to_string()).collect()
    } else {
        dists.to_vec()
    };

    let mle = MaximumLikelihoodEstimator::new();
    let results = if threads == 1 {
        mle.try_many(&sample, &names)
    } else {
        if threads > 0 {
            // Best-effort; if a global pool already exists, keep going.
            let _ = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global();
        }
        mle.try_many_parallel(&sample, &names)
    };

    let n_failed = results.failures().count();
    tracing::info!(requested = results.len(), failed = n_failed, "comparison complete");
    if let Some(best) = results.best(criterion) {
        log_fit(best);
    }

    write_json(output, trial_json(&results, criterion))
}

fn cmd_block_maxima(
    input: &PathBuf,
    column: Option<&str>,
    block_size: usize,
    return_period: Option<f64>,
    output: Option<&PathBuf>,
) -> Result<()> {
    let sample = input::read_sample(input, column)?;
    let fit = MaximumLikelihoodEstimator::new().fit_block_maxima(&sample, block_size)?;
    log_fit(&fit);

    let mut value = serde_json::json!({ "block_size": block_size, "fit": fit });
    if let Some(period) = return_period {
        let level = pl_inference::return_level(&fit, period)?;
        tracing::info!(period, level, "return level");
        value["return_period"] = serde_json::json!(period);
        value["return_level"] = serde_json::json!(level);
    }
    write_json(output, value)
}

fn cmd_pot(
    input: &PathBuf,
    column: Option<&str>,
    threshold: f64,
    excess_quantile: Option<f64>,
    output: Option<&PathBuf>,
) -> Result<()> {
    let sample = input::read_sample(input, column)?;
    let policy = Threshold::from_config(threshold);
    let u = policy.resolve(&sample)?;
    tracing::info!(requested = threshold, resolved = u, "threshold resolved");

    let fit = MaximumLikelihoodEstimator::new().fit_peaks_over_threshold(&sample, Threshold::Value(u))?;
    log_fit(&fit);

    let mut value = serde_json::json!({ "threshold": u, "fit": fit });
    if let Some(p) = excess_quantile {
        let excess = pl_inference::excess_quantile(&fit, p)?;
        tracing::info!(p, excess, "excess quantile");
        value["excess_quantile_p"] = serde_json::json!(p);
        value["excess_quantile"] = serde_json::json!(excess);
        value["level"] = serde_json::json!(u + excess);
    }
    write_json(output, value)
}

fn cmd_synth(n: usize, shape: f64, scale: f64, seed: u64, output: Option<&PathBuf>) -> Result<()> {
    let sample = pl_inference::toys::weibull_sample(n, shape, scale, seed)?;
    let mut text = String::with_capacity(n * 20);
    for x in &sample {
        text.push_str(&format!("{}\n", x));
    }
    if let Some(path) = output {
        std::fs::write(path, text)?;
        tracing::info!(n, path = %path.display(), "sample written");
    } else {
        print!("{}", text);
    }
    Ok(())
}

pub(crate) fn write_json(output: Option<&PathBuf>, value: serde_json::Value) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
