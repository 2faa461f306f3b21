//! One randomized trial: draw data for a seed, fit it with one approach and
//! score the fit on held-out points.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::{estimate_line_lstsq, estimate_line_ransac};
use crate::error::Result;
use crate::generator::{generate, uniform_in};
use crate::models::Line;
use crate::plotting::plot_trial_fit;
use crate::scoring::mean_squared_error;
use crate::settings::TrialConfig;
use crate::types::PointSet;

/// Line-fitting approach under comparison.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Approach {
    /// Ordinary least squares over every training point
    Lstsq,
    /// Random sample consensus
    Ransac,
}

impl Approach {
    pub const ALL: [Approach; 2] = [Approach::Lstsq, Approach::Ransac];

    /// Token used on the command line and in result file names.
    pub fn token(self) -> &'static str {
        match self {
            Approach::Lstsq => "lstsq",
            Approach::Ransac => "ransac",
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Persisted outcome of one trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub seed: u64,
    pub approach: Approach,
    pub mean_squared_error: f64,
}

impl TrialRecord {
    /// File name stem shared by the score and the plot of this trial.
    pub fn file_stem(&self) -> String {
        format!("results_{}_{}", self.approach, self.seed)
    }
}

/// Everything a trial produced, including the data it ran on.
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    pub record: TrialRecord,
    pub truth: Line,
    pub fitted: Line,
    pub train: PointSet,
    pub eval: PointSet,
    /// Inlier count of the RANSAC winner; `None` for least squares.
    pub inlier_count: Option<usize>,
}

/// Paths written by [`write_trial`].
#[derive(Debug, Clone)]
pub struct TrialArtifacts {
    pub score: PathBuf,
    pub plot: Option<PathBuf>,
}

/// Run one trial.
///
/// The RNG is seeded once from `seed` and used for the true line, the
/// training draw, the evaluation draw and finally the RANSAC sampling, in
/// that order. Both approaches therefore see identical data for a seed.
pub fn run_trial(seed: u64, approach: Approach, config: &TrialConfig) -> Result<TrialOutcome> {
    let mut rng = StdRng::seed_from_u64(seed);

    let slope = uniform_in(&mut rng, config.slope_range);
    let intercept = uniform_in(&mut rng, config.intercept_range);
    let truth = Line::new(intercept, slope);

    let train = generate(&mut rng, &config.train_signal(truth))?;
    let eval = generate(&mut rng, &config.eval_signal(truth))?;

    let (fitted, inlier_count) = match approach {
        Approach::Lstsq => (estimate_line_lstsq(&train)?, None),
        Approach::Ransac => {
            let result = estimate_line_ransac(&train, &mut rng, &config.ransac)?;
            (result.model, Some(result.inliers.len()))
        }
    };

    let mse = mean_squared_error(&eval, &fitted)?;
    info!(
        seed,
        %approach,
        true_slope = truth.slope,
        true_intercept = truth.intercept,
        slope = fitted.slope,
        intercept = fitted.intercept,
        mse,
        inliers = ?inlier_count,
        "trial finished"
    );

    Ok(TrialOutcome {
        record: TrialRecord {
            seed,
            approach,
            mean_squared_error: mse,
        },
        truth,
        fitted,
        train,
        eval,
        inlier_count,
    })
}

/// Write `results_{approach}_{seed}.csv` and, when `plot` is set, the
/// matching `.png` into `dir`, creating `dir` if needed.
pub fn write_trial(dir: &Path, outcome: &TrialOutcome, plot: bool) -> Result<TrialArtifacts> {
    fs::create_dir_all(dir)?;
    let stem = outcome.record.file_stem();

    let score = dir.join(format!("{stem}.csv"));
    fs::write(&score, outcome.record.mean_squared_error.to_string())?;

    let plot = if plot {
        let path = dir.join(format!("{stem}.png"));
        plot_trial_fit(&path, &outcome.train, &outcome.eval, &outcome.fitted)?;
        Some(path)
    } else {
        None
    };

    info!(score = %score.display(), "wrote trial artifacts");
    Ok(TrialArtifacts { score, plot })
}
