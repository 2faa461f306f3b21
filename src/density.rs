//! Two-dimensional Gaussian kernel density estimate.
//!
//! Used to colour the per-seed MSE scatter plot by how crowded each point's
//! neighbourhood is. The kernel covariance is the sample covariance scaled by
//! Scott's factor `n^(-1/6)` squared.

use std::f64::consts::PI;

use nalgebra::{Matrix2, Vector2};

/// Density of the sample `(xs[i], ys[i])` evaluated at each of its own points.
///
/// Fewer than two points, or a sample whose covariance is singular (all
/// points collinear or identical), yields a flat density of `1.0`.
pub fn gaussian_kde_2d(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return vec![1.0; n];
    }
    let points: Vec<Vector2<f64>> = (0..n).map(|i| Vector2::new(xs[i], ys[i])).collect();

    let mean = points.iter().sum::<Vector2<f64>>() / n as f64;
    let scatter = points
        .iter()
        .map(|p| (p - mean) * (p - mean).transpose())
        .sum::<Matrix2<f64>>();
    let covariance = scatter / (n - 1) as f64;

    let factor = (n as f64).powf(-1.0 / 6.0);
    let kernel_cov = covariance * (factor * factor);
    let det = kernel_cov.determinant();
    let inverse = match kernel_cov.try_inverse() {
        Some(inv) if det > 0.0 && det.is_finite() => inv,
        _ => return vec![1.0; n],
    };
    let norm = 1.0 / (2.0 * PI * det.sqrt() * n as f64);

    points
        .iter()
        .map(|p| {
            let total: f64 = points
                .iter()
                .map(|q| {
                    let d = p - q;
                    (-0.5 * (d.transpose() * inverse * d)[(0, 0)]).exp()
                })
                .sum();
            total * norm
        })
        .collect()
}

/// Rescale values linearly onto `[0, 1]`; a constant input maps to `0.5`.
pub fn normalize_unit(values: &[f64]) -> Vec<f64> {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = hi - lo;
    if !(span > 0.0) {
        return vec![0.5; values.len()];
    }
    values.iter().map(|v| (v - lo) / span).collect()
}
