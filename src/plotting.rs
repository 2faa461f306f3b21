//! PNG diagnostics: the fit of a single trial and the per-seed comparison of
//! the two approaches.

use std::path::Path;

use plotters::prelude::*;

use crate::density::{gaussian_kde_2d, normalize_unit};
use crate::error::{Error, Result};
use crate::models::Line;
use crate::types::PointSet;

const TRAIN_COLOR: RGBColor = RGBColor(31, 119, 180);
const EVAL_COLOR: RGBColor = RGBColor(255, 127, 14);

fn plot_err<E: std::fmt::Display>(err: E) -> Error {
    Error::Plot(err.to_string())
}

/// Pad a possibly empty interval so it can back a chart axis.
fn padded(lo: f64, hi: f64, frac: f64) -> (f64, f64) {
    let span = hi - lo;
    if span > 0.0 {
        (lo - frac * span, hi + frac * span)
    } else {
        (lo - 1.0, hi + 1.0)
    }
}

/// Colour for a normalized density in `[0, 1]`: dark blue through green to yellow.
fn density_color(t: f64) -> HSLColor {
    let t = t.clamp(0.0, 1.0);
    HSLColor(0.72 - 0.56 * t, 0.75, 0.3 + 0.25 * t)
}

/// Scatter of training and evaluation points with the fitted line drawn
/// across the training x-range extended by 10% on each side.
pub fn plot_trial_fit(path: &Path, train: &PointSet, eval: &PointSet, line: &Line) -> Result<()> {
    let (lo, hi) = train.x_bounds().ok_or(Error::EmptyPointSet)?;
    let (x0, x1) = padded(lo, hi, 0.1);

    let ys = train
        .iter()
        .chain(eval.iter())
        .map(|(_, y)| y)
        .chain([line.predict(x0), line.predict(x1)]);
    let (y_lo, y_hi) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(a, b), y| (a.min(y), b.max(y)));
    let (y0, y1) = padded(y_lo, y_hi, 0.05);

    let root = BitMapBackend::new(path, (800, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("y = {:.3}x + {:.3}", line.slope, line.intercept),
            ("sans-serif", 28).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(plot_err)?;

    chart.configure_mesh().draw().map_err(plot_err)?;

    chart
        .draw_series(train.iter().map(|p| Circle::new(p, 3, TRAIN_COLOR.filled())))
        .map_err(plot_err)?
        .label("train")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, TRAIN_COLOR.filled()));

    chart
        .draw_series(eval.iter().map(|p| Circle::new(p, 3, EVAL_COLOR.filled())))
        .map_err(plot_err)?
        .label("eval")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, EVAL_COLOR.filled()));

    chart
        .draw_series(LineSeries::new(
            vec![(x0, line.predict(x0)), (x1, line.predict(x1))],
            BLACK.stroke_width(2),
        ))
        .map_err(plot_err)?
        .label("fit")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

/// Scatter of per-seed least-squares MSE (x) against RANSAC MSE (y).
///
/// Both axes span `[0, hi + 5% of the value range]`, a faint `y = x` line
/// marks equal error, and points are coloured by kernel density. Points below
/// the line are seeds where RANSAC did better.
pub fn plot_mse_scatter(path: &Path, lstsq: &[f64], ransac: &[f64]) -> Result<()> {
    let (lo, hi) = lstsq
        .iter()
        .chain(ransac)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(a, b), &v| (a.min(v), b.max(v)));
    if !lo.is_finite() || !hi.is_finite() {
        return Err(Error::NoTrials);
    }
    let mut limit = hi + 0.05 * (hi - lo);
    if !(limit > 0.0) {
        limit = 1.0;
    }

    let density = normalize_unit(&gaussian_kde_2d(lstsq, ransac));

    let root = BitMapBackend::new(path, (800, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Per-seed MSE (colour: low to high data density)",
            ("sans-serif", 24).into_font(),
        )
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..limit, 0.0..limit)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("least-squares MSE")
        .y_desc("RANSAC MSE")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            vec![(0.0, 0.0), (limit, limit)],
            BLACK.mix(0.3).stroke_width(1),
        ))
        .map_err(plot_err)?;

    chart
        .draw_series(
            lstsq
                .iter()
                .zip(ransac)
                .zip(&density)
                .map(|((&x, &y), &t)| Circle::new((x, y), 3, density_color(t).filled())),
        )
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}
