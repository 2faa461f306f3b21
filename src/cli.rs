//! Command-line arguments for the trial runner and the aggregator.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::aggregate::OutputKind;
use crate::trial::Approach;

/// Directory both binaries default to.
pub const DEFAULT_SAVEDIR: &str = "/results/";

#[derive(Parser, Debug)]
#[command(name = "evaluate-approach")]
#[command(version)]
#[command(about = "Run one randomized line-fitting trial and write its score", long_about = None)]
pub struct EvaluateCli {
    /// Seed for the trial's random number generator
    #[arg(long, value_name = "SEED")]
    pub seed: u64,

    /// Fitting approach to evaluate
    #[arg(long, value_enum)]
    pub approach: Approach,

    /// Directory to write results_{approach}_{seed}.csv/.png into
    #[arg(long, value_name = "DIR", default_value = DEFAULT_SAVEDIR)]
    pub savedir: PathBuf,

    /// TOML file overriding the trial configuration
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip rendering the fit plot
    #[arg(long = "no-plot")]
    pub no_plot: bool,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(name = "process-results")]
#[command(version)]
#[command(about = "Aggregate per-trial scores into summary statistics or a scatter plot", long_about = None)]
pub struct ProcessCli {
    /// Directory holding the per-trial score files
    #[arg(long, value_name = "DIR", default_value = DEFAULT_SAVEDIR)]
    pub savedir: PathBuf,

    /// What to produce
    #[arg(long, value_enum)]
    pub output: OutputKind,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default level.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definitions_are_consistent() {
        EvaluateCli::command().debug_assert();
        ProcessCli::command().debug_assert();
    }

    #[test]
    fn evaluate_defaults() {
        let cli = EvaluateCli::parse_from(["evaluate-approach", "--seed", "4", "--approach", "ransac"]);
        assert_eq!(cli.seed, 4);
        assert_eq!(cli.approach, Approach::Ransac);
        assert_eq!(cli.savedir, PathBuf::from("/results/"));
        assert!(cli.config.is_none());
        assert!(!cli.no_plot);
    }

    #[test]
    fn evaluate_rejects_unknown_approach() {
        let err = EvaluateCli::try_parse_from(["evaluate-approach", "--seed", "1", "--approach", "huber"])
            .unwrap_err();
        assert!(err.to_string().contains("huber"));
    }

    #[test]
    fn process_accepts_results_data() {
        let cli = ProcessCli::parse_from(["process-results", "--savedir", "out", "--output", "results_data"]);
        assert_eq!(cli.output, OutputKind::ResultsData);
        assert_eq!(cli.savedir, PathBuf::from("out"));
    }

    #[test]
    fn process_rejects_unknown_output_kind() {
        let err = ProcessCli::try_parse_from(["process-results", "--output", "histogram"]).unwrap_err();
        assert!(err.to_string().contains("histogram"));
    }

    #[test]
    fn process_requires_output() {
        assert!(ProcessCli::try_parse_from(["process-results"]).is_err());
    }
}
