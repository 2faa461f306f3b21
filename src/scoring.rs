//! Scoring primitives.
//!
//! [`InlierCountScoring`] ranks RANSAC candidates by their number of inliers;
//! [`mean_squared_error`] grades a finished fit on held-out points.

use std::marker::PhantomData;

use serde::Serialize;

use crate::core::Scoring;
use crate::error::{Error, Result};
use crate::models::Line;
use crate::types::{DataMatrix, PointSet};

/// Support of a candidate model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Score {
    pub inlier_count: usize,
}

impl Score {
    pub fn new(inlier_count: usize) -> Self {
        Self { inlier_count }
    }
}

/// Counts rows whose squared residual is strictly below a threshold.
///
/// The residual function takes `(data, model, row_index)`.
pub struct InlierCountScoring<M, F>
where
    F: Fn(&DataMatrix, &M, usize) -> f64,
{
    threshold_sq: f64,
    residual_fn: F,
    _marker: PhantomData<M>,
}

impl<M, F> InlierCountScoring<M, F>
where
    F: Fn(&DataMatrix, &M, usize) -> f64,
{
    /// Threshold given directly on the squared residual.
    pub fn new(threshold_sq: f64, residual_fn: F) -> Self {
        Self {
            threshold_sq,
            residual_fn,
            _marker: PhantomData,
        }
    }

    /// Threshold `chi_sq * noise_sigma^2`, i.e. a chi-squared test on the
    /// normalized residual.
    pub fn chi_squared(chi_sq: f64, noise_sigma: f64, residual_fn: F) -> Self {
        Self::new(chi_sq * noise_sigma * noise_sigma, residual_fn)
    }

    pub fn threshold_sq(&self) -> f64 {
        self.threshold_sq
    }
}

impl<M, F> Scoring<M> for InlierCountScoring<M, F>
where
    F: Fn(&DataMatrix, &M, usize) -> f64,
{
    type Score = Score;

    fn score(&self, data: &DataMatrix, model: &M, inliers_out: &mut Vec<usize>) -> Score {
        inliers_out.clear();
        for i in 0..data.nrows() {
            let r = (self.residual_fn)(data, model, i);
            if r * r < self.threshold_sq {
                inliers_out.push(i);
            }
        }
        Score::new(inliers_out.len())
    }
}

/// Vertical residual of row `idx` against a line.
pub fn line_residual(data: &DataMatrix, line: &Line, idx: usize) -> f64 {
    line.residual(data[(idx, 0)], data[(idx, 1)])
}

/// Mean of the squared vertical residuals of `points` against `line`.
pub fn mean_squared_error(points: &PointSet, line: &Line) -> Result<f64> {
    if points.is_empty() {
        return Err(Error::EmptyPointSet);
    }
    let total: f64 = points
        .iter()
        .map(|(x, y)| {
            let r = line.residual(x, y);
            r * r
        })
        .sum();
    Ok(total / points.len() as f64)
}
