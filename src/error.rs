//! Error type shared by the estimators, the trial runner and the aggregator.

use std::path::PathBuf;
use thiserror::Error;

use crate::trial::Approach;

/// Errors raised anywhere in the crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    #[error("x and y have different lengths ({xs} vs {ys})")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("singular design matrix: all x-values are identical")]
    SingularDesign,

    #[error("least-squares solve failed: {0}")]
    Solve(&'static str),

    #[error("no consensus found after {rounds} rounds")]
    NoConsensus { rounds: usize },

    #[error("cannot score against an empty point set")]
    EmptyPointSet,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("cannot derive seed and approach from trial file {}", .0.display())]
    UnrecognizedTrialFile(PathBuf),

    #[error("invalid score in {}: {source}", .path.display())]
    InvalidScore {
        path: PathBuf,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("seed {seed} has no {approach} result")]
    MissingTrial { seed: u64, approach: Approach },

    #[error("seed {seed} has more than one {approach} result")]
    DuplicateTrial { seed: u64, approach: Approach },

    #[error("no trial results found")]
    NoTrials,

    #[error("failed to read config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("plotting failed: {0}")]
    Plot(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
