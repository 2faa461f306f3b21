//! Runs a single trial and writes its score (and plot) to the save directory.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use line_trials::cli::{init_tracing, EvaluateCli};
use line_trials::settings::TrialConfig;
use line_trials::trial::{run_trial, write_trial};

fn main() -> Result<()> {
    let args = EvaluateCli::parse();
    init_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => TrialConfig::from_file(path)
            .with_context(|| format!("loading trial config {}", path.display()))?,
        None => TrialConfig::default(),
    };

    let outcome = run_trial(args.seed, args.approach, &config)
        .with_context(|| format!("trial {} with {} failed", args.seed, args.approach))?;
    let artifacts = write_trial(&args.savedir, &outcome, !args.no_plot)
        .with_context(|| format!("writing results to {}", args.savedir.display()))?;

    info!(
        mse = outcome.record.mean_squared_error,
        score = %artifacts.score.display(),
        "done"
    );
    Ok(())
}
