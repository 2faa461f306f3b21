//! Synthetic noisy line data with outliers.
//!
//! All randomness comes from the caller's RNG, so one seeded generator per
//! trial makes the whole trial reproducible.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{Error, Result};
use crate::settings::SignalSettings;
use crate::types::PointSet;

/// Outlier noise is this many times wider than the inlier noise.
pub const OUTLIER_NOISE_SCALE: f64 = 6.0;

/// Uniform draw from the half-open interval spanned by `range`.
pub fn uniform_in<R: Rng + ?Sized>(rng: &mut R, range: [f64; 2]) -> f64 {
    let lo = range[0].min(range[1]);
    let hi = range[0].max(range[1]);
    lo + (hi - lo) * rng.gen::<f64>()
}

fn normal(std_dev: f64) -> Result<Normal<f64>> {
    // `Normal::new` accepts a negative deviation and mirrors the noise.
    if !(std_dev >= 0.0) {
        return Err(Error::InvalidParameter(format!(
            "noise standard deviation must be non-negative, got {std_dev}"
        )));
    }
    Normal::new(0.0, std_dev)
        .map_err(|e| Error::InvalidParameter(format!("noise standard deviation {std_dev}: {e}")))
}

/// Draw `num_inliers + num_outliers` points around the configured line.
///
/// Every point gets `slope * x + intercept` plus Gaussian noise. The first
/// `num_outliers` points are then pushed off the line by a random slope
/// deviation proportional to their own x, the constant `outlier_offset`,
/// and extra Gaussian noise six times wider than the base noise. Outliers
/// far from the origin are therefore the most disruptive.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, signal: &SignalSettings) -> Result<PointSet> {
    let n = signal.num_inliers + signal.num_outliers;
    let noise = normal(signal.noise_sigma)?;
    let outlier_noise = normal(OUTLIER_NOISE_SCALE * signal.noise_sigma)?;

    let xs: Vec<f64> = (0..n).map(|_| uniform_in(rng, signal.x_range)).collect();
    let mut ys: Vec<f64> = xs
        .iter()
        .map(|&x| signal.slope * x + signal.intercept + noise.sample(rng))
        .collect();

    for (x, y) in xs.iter().zip(ys.iter_mut()).take(signal.num_outliers) {
        let deviation = signal.slope * (2.0 * rng.gen::<f64>() - 1.0) * x;
        *y += deviation + signal.outlier_offset + outlier_noise.sample(rng);
    }

    PointSet::from_columns(&xs, &ys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Line;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn noise_free(num_inliers: usize, num_outliers: usize) -> SignalSettings {
        SignalSettings {
            num_inliers,
            num_outliers,
            slope: 1.5,
            intercept: -2.0,
            noise_sigma: 0.0,
            outlier_offset: 0.0,
            x_range: [0.0, 20.0],
        }
    }

    #[test]
    fn generates_requested_number_of_points_in_range() {
        let mut rng = StdRng::seed_from_u64(0);
        let points = generate(&mut rng, &SignalSettings::default()).unwrap();
        assert_eq!(points.len(), 50);
        assert!(points.iter().all(|(x, _)| (0.0..20.0).contains(&x)));
    }

    #[test]
    fn reversed_range_is_accepted() {
        let mut rng = StdRng::seed_from_u64(2);
        let signal = SignalSettings {
            x_range: [5.0, -5.0],
            ..SignalSettings::default()
        };
        let points = generate(&mut rng, &signal).unwrap();
        assert!(points.iter().all(|(x, _)| (-5.0..5.0).contains(&x)));
    }

    #[test]
    fn inliers_without_noise_lie_on_the_line() {
        let mut rng = StdRng::seed_from_u64(3);
        let points = generate(&mut rng, &noise_free(25, 0)).unwrap();
        let line = Line::new(-2.0, 1.5);
        assert!(points.iter().all(|(x, y)| line.residual(x, y).abs() < 1e-12));
    }

    #[test]
    fn outliers_are_the_leading_points() {
        let mut rng = StdRng::seed_from_u64(4);
        let signal = SignalSettings {
            outlier_offset: 100.0,
            ..noise_free(10, 5)
        };
        let points = generate(&mut rng, &signal).unwrap();
        let line = Line::new(-2.0, 1.5);

        // With zero noise every outlier sits at offset + slope * (2U - 1) * x,
        // and |slope * (2U - 1) * x| < 30 on [0, 20).
        for (i, (x, y)) in points.iter().enumerate() {
            let r = line.residual(x, y).abs();
            if i < 5 {
                assert!(r > 69.0, "point {i} should be an outlier, residual {r}");
            } else {
                assert!(r < 1e-12, "point {i} should be clean, residual {r}");
            }
        }
    }

    #[test]
    fn outlier_deviation_scales_with_x() {
        let mut rng = StdRng::seed_from_u64(5);
        let signal = SignalSettings {
            x_range: [0.0, 1e-9],
            ..noise_free(0, 20)
        };
        let points = generate(&mut rng, &signal).unwrap();
        let line = Line::new(-2.0, 1.5);
        assert!(points.iter().all(|(x, y)| line.residual(x, y).abs() < 1e-8));
    }

    #[test]
    fn same_seed_same_points() {
        let draw = || generate(&mut StdRng::seed_from_u64(11), &SignalSettings::default()).unwrap();
        assert_eq!(draw(), draw());
    }

    #[test]
    fn negative_sigma_is_rejected() {
        let signal = SignalSettings {
            noise_sigma: -1.0,
            ..SignalSettings::default()
        };
        let err = generate(&mut StdRng::seed_from_u64(0), &signal).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn nan_and_infinite_sigma_are_rejected() {
        for sigma in [f64::NAN, f64::INFINITY, -0.0001] {
            let signal = SignalSettings {
                noise_sigma: sigma,
                ..SignalSettings::default()
            };
            assert!(
                matches!(
                    generate(&mut StdRng::seed_from_u64(0), &signal),
                    Err(Error::InvalidParameter(_))
                ),
                "sigma {sigma} accepted"
            );
        }
    }

    #[test]
    fn uniform_in_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let v = uniform_in(&mut rng, [-4.0, 4.0]);
            assert!((-4.0..4.0).contains(&v));
        }
    }
}
