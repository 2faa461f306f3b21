//! Least-squares estimator for lines in slope-intercept form.

use nalgebra::{DMatrix, DVector};

use crate::core::Estimator;
use crate::error::{Error, Result};
use crate::models::Line;
use crate::types::DataMatrix;

/// Ordinary least-squares line estimator.
///
/// Minimizes the sum of squared vertical residuals over the selected rows by
/// solving the `[1, x] * [b, m]^T = y` system with an SVD. Two rows with
/// distinct x-values give the interpolating line; more rows give the usual
/// regression fit.
pub struct LineEstimator;

impl Default for LineEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl LineEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Fit every row of `data`.
    pub fn fit_all(&self, data: &DataMatrix) -> Result<Line> {
        let rows: Vec<usize> = (0..data.nrows()).collect();
        self.estimate_model(data, &rows)
    }
}

/// Spread between the largest and smallest x among `rows`.
fn x_spread(data: &DataMatrix, rows: &[usize]) -> f64 {
    let (lo, hi) = rows
        .iter()
        .map(|&r| data[(r, 0)])
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
    hi - lo
}

impl Estimator for LineEstimator {
    type Model = Line;

    fn sample_size(&self) -> usize {
        2
    }

    fn is_valid_sample(&self, data: &DataMatrix, sample: &[usize]) -> bool {
        if sample.len() < self.sample_size() || data.ncols() < 2 {
            return false;
        }
        if sample.iter().any(|&r| r >= data.nrows()) {
            return false;
        }
        // Repeated rows or equal x-values leave the slope undetermined.
        x_spread(data, sample) > 0.0
    }

    fn estimate_model(&self, data: &DataMatrix, sample: &[usize]) -> Result<Line> {
        let n = sample.len();
        if n < self.sample_size() {
            return Err(Error::InsufficientPoints {
                required: self.sample_size(),
                actual: n,
            });
        }
        if !(x_spread(data, sample) > 0.0) {
            return Err(Error::SingularDesign);
        }

        let design = DMatrix::from_fn(n, 2, |r, c| if c == 0 { 1.0 } else { data[(sample[r], 0)] });
        let target = DVector::from_iterator(n, sample.iter().map(|&r| data[(r, 1)]));

        let betas = design
            .svd(true, true)
            .solve(&target, f64::EPSILON)
            .map_err(Error::Solve)?;

        let line = Line::new(betas[0], betas[1]);
        if !line.is_finite() {
            return Err(Error::SingularDesign);
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_from(points: &[(f64, f64)]) -> DataMatrix {
        DataMatrix::from_fn(points.len(), 2, |r, c| if c == 0 { points[r].0 } else { points[r].1 })
    }

    #[test]
    fn two_points_give_interpolating_line() {
        let data = data_from(&[(1.0, 3.0), (4.0, 9.0)]);
        let line = LineEstimator::new().estimate_model(&data, &[0, 1]).unwrap();
        assert!((line.slope - 2.0).abs() < 1e-12);
        assert!((line.intercept - 1.0).abs() < 1e-12);
        assert!(line.residual(1.0, 3.0).abs() < 1e-12);
        assert!(line.residual(4.0, 9.0).abs() < 1e-12);
    }

    #[test]
    fn noise_free_points_are_recovered() {
        let points: Vec<(f64, f64)> = (0..12)
            .map(|i| {
                let x = i as f64 * 1.5 - 4.0;
                (x, -0.75 * x + 2.5)
            })
            .collect();
        let data = data_from(&points);
        let line = LineEstimator::new().fit_all(&data).unwrap();
        assert!((line.slope + 0.75).abs() < 1e-10);
        assert!((line.intercept - 2.5).abs() < 1e-10);
    }

    #[test]
    fn regression_matches_closed_form() {
        // slope = cov(x, y) / var(x) = 6 / 5, intercept = mean(y) - slope * mean(x).
        let data = data_from(&[(0.0, 0.0), (1.0, 2.0), (2.0, 2.0), (3.0, 4.0)]);
        let line = LineEstimator::new().fit_all(&data).unwrap();
        assert!((line.slope - 1.2).abs() < 1e-12);
        assert!((line.intercept - 0.2).abs() < 1e-12);
    }

    #[test]
    fn identical_x_values_are_singular() {
        let data = data_from(&[(2.0, 1.0), (2.0, 5.0), (2.0, -3.0)]);
        let estimator = LineEstimator::new();
        assert!(!estimator.is_valid_sample(&data, &[0, 1, 2]));
        assert!(matches!(
            estimator.fit_all(&data),
            Err(Error::SingularDesign)
        ));
    }

    #[test]
    fn repeated_row_is_not_a_valid_sample() {
        let data = data_from(&[(0.0, 1.0), (3.0, 2.0)]);
        let estimator = LineEstimator::new();
        assert!(!estimator.is_valid_sample(&data, &[1, 1]));
        assert!(estimator.is_valid_sample(&data, &[0, 1]));
        assert!(!estimator.is_valid_sample(&data, &[0, 2]));
    }

    #[test]
    fn fewer_than_two_points_is_an_error() {
        let data = data_from(&[(1.0, 1.0)]);
        assert!(matches!(
            LineEstimator::new().fit_all(&data),
            Err(Error::InsufficientPoints { required: 2, actual: 1 })
        ));
    }
}
