//! High-level line-fitting API.
//!
//! These functions wire the generic pieces from [`crate::core`] together for
//! the two approaches compared by the trial runner.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::core::{LeastSquaresOptimizer, Ransac};
use crate::error::{Error, Result};
use crate::estimators::LineEstimator;
use crate::models::Line;
use crate::samplers::UniformRandomSampler;
use crate::scoring::{line_residual, InlierCountScoring, Score};
use crate::settings::RansacSettings;
use crate::types::PointSet;

/// Result of a RANSAC estimation.
#[derive(Debug, Clone, Serialize)]
pub struct EstimationResult<M> {
    /// The estimated model.
    pub model: M,
    /// Indices of inlier points.
    pub inliers: Vec<usize>,
    /// Score of the estimated model.
    pub score: Score,
    /// Number of rounds performed.
    pub iterations: usize,
    /// Rounds skipped because their sample was degenerate.
    pub skipped_rounds: usize,
}

/// Ordinary least-squares fit over every point.
pub fn estimate_line_lstsq(points: &PointSet) -> Result<Line> {
    LineEstimator::new().fit_all(points.data())
}

/// Least-squares fit of `(xs[i], ys[i])`.
///
/// # Example
///
/// ```rust
/// use line_trials::api::fit_least_squares;
///
/// let line = fit_least_squares(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
/// assert!((line.slope - 2.0).abs() < 1e-12);
/// assert!((line.intercept - 1.0).abs() < 1e-12);
/// ```
pub fn fit_least_squares(xs: &[f64], ys: &[f64]) -> Result<Line> {
    estimate_line_lstsq(&PointSet::from_columns(xs, ys)?)
}

/// Robust RANSAC fit.
///
/// Runs exactly `settings.rounds` rounds and returns the minimal-sample
/// model with the largest inlier count (the refit on its inliers when
/// `settings.final_refit` is set). Fails with [`Error::NoConsensus`] if no
/// round produced a model with at least one inlier.
pub fn estimate_line_ransac<R: Rng + ?Sized>(
    points: &PointSet,
    rng: &mut R,
    settings: &RansacSettings,
) -> Result<EstimationResult<Line>> {
    let estimator = LineEstimator::new();
    if settings.sample_size < 2 {
        return Err(Error::InvalidParameter(format!(
            "RANSAC sample size must be at least 2, got {}",
            settings.sample_size
        )));
    }

    let scoring = InlierCountScoring::chi_squared(
        settings.chi_sq_thresh,
        settings.noise_sigma,
        line_residual,
    );
    let final_optimizer = settings
        .final_refit
        .then(|| LeastSquaresOptimizer::new(LineEstimator::new()));

    let mut ransac = Ransac::new(
        settings.clone(),
        estimator,
        UniformRandomSampler::new(),
        scoring,
        final_optimizer,
    );
    ransac.run(points.data(), rng);

    debug!(
        rounds = ransac.iteration,
        skipped = ransac.skipped_rounds,
        inliers = ransac.best_score.inlier_count,
        "ransac finished"
    );

    match ransac.best_model {
        Some(model) => Ok(EstimationResult {
            model,
            inliers: ransac.best_inliers,
            score: ransac.best_score,
            iterations: ransac.iteration,
            skipped_rounds: ransac.skipped_rounds,
        }),
        None => Err(Error::NoConsensus {
            rounds: settings.rounds,
        }),
    }
}

/// RANSAC fit of `(xs[i], ys[i])`, returning only the line.
pub fn fit_ransac<R: Rng + ?Sized>(
    xs: &[f64],
    ys: &[f64],
    rng: &mut R,
    settings: &RansacSettings,
) -> Result<Line> {
    let points = PointSet::from_columns(xs, ys)?;
    Ok(estimate_line_ransac(&points, rng, settings)?.model)
}
