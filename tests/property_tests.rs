//! Property-based tests for the line estimators and the MSE scorer.

use line_trials::{fit_least_squares, fit_ransac, mean_squared_error, Line, PointSet, RansacSettings};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_two_points_interpolated_exactly(
        x0 in -50.0f64..50.0,
        gap in 0.5f64..30.0,
        y0 in -100.0f64..100.0,
        y1 in -100.0f64..100.0,
    ) {
        let xs = [x0, x0 + gap];
        let ys = [y0, y1];
        let line = fit_least_squares(&xs, &ys).unwrap();
        let points = PointSet::from_columns(&xs, &ys).unwrap();

        let mse = mean_squared_error(&points, &line).unwrap();
        prop_assert!(mse < 1e-12, "mse {}", mse);
    }

    #[test]
    fn prop_noise_free_line_recovered_by_ransac(
        slope in -5.0f64..5.0,
        intercept in -20.0f64..20.0,
        n in 3usize..30,
        seed in any::<u64>(),
    ) {
        let xs: Vec<f64> = (0..n).map(|i| i as f64 * 0.75 - 3.0).collect();
        let truth = Line::new(intercept, slope);
        let ys: Vec<f64> = xs.iter().map(|&x| truth.predict(x)).collect();

        let mut rng = StdRng::seed_from_u64(seed);
        let line = fit_ransac(&xs, &ys, &mut rng, &RansacSettings::default()).unwrap();
        prop_assert!((line.slope - slope).abs() < 1e-8);
        prop_assert!((line.intercept - intercept).abs() < 1e-8);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_mse_non_negative_and_zero_on_line(
        slope in -10.0f64..10.0,
        intercept in -10.0f64..10.0,
        xs in prop::collection::vec(-100.0f64..100.0, 1..40),
        offsets in prop::collection::vec(-5.0f64..5.0, 40),
    ) {
        let line = Line::new(intercept, slope);
        let on: Vec<f64> = xs.iter().map(|&x| line.predict(x)).collect();
        let off: Vec<f64> = on.iter().zip(&offsets).map(|(y, d)| y + d).collect();

        let exact = PointSet::from_columns(&xs, &on).unwrap();
        prop_assert_eq!(mean_squared_error(&exact, &line).unwrap(), 0.0);

        let noisy = PointSet::from_columns(&xs, &off).unwrap();
        let mse = mean_squared_error(&noisy, &line).unwrap();
        let expected = offsets[..xs.len()].iter().map(|d| d * d).sum::<f64>() / xs.len() as f64;
        prop_assert!(mse >= 0.0);
        prop_assert!((mse - expected).abs() <= 1e-9 * (1.0 + expected));
    }
}
