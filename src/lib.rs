//! # line-trials - least squares vs. RANSAC on contaminated lines
//!
//! Each trial draws a random true line, generates a training set with
//! outliers and a clean evaluation set from it, fits the training set with
//! one approach and scores the fit by its mean squared error on the
//! evaluation set. Trials are run one seed at a time by the
//! `evaluate-approach` binary; `process-results` aggregates a directory of
//! their score files.
//!
//! ## Quick Start
//!
//! ```rust
//! use line_trials::{fit_least_squares, fit_ransac, RansacSettings};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
//! let ys = [1.0, 3.0, 5.0, 40.0, 9.0, 11.0];
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let robust = fit_ransac(&xs, &ys, &mut rng, &RansacSettings::default()).unwrap();
//! assert!((robust.slope - 2.0).abs() < 1e-9);
//!
//! let plain = fit_least_squares(&xs, &ys).unwrap();
//! assert!((plain.slope - 2.0).abs() > 0.5);
//! ```
//!
//! ## Extending
//!
//! The RANSAC loop in [`core`](crate::core) is generic over the
//! [`Estimator`](crate::core::Estimator), [`Sampler`](crate::core::Sampler),
//! [`Scoring`](crate::core::Scoring) and [`LocalOptimizer`](crate::core::LocalOptimizer)
//! traits; the line fit is just one instantiation.
//!
//! ## Modules
//!
//! - **[`api`]**: least-squares and RANSAC line fits
//! - **[`core`](crate::core)**: core traits and the RANSAC loop
//! - **[`generator`]**: synthetic point sets around a line
//! - **[`trial`]**: one seeded trial and its score file
//! - **[`aggregate`]**: summaries over a directory of trials
//! - **[`plotting`]**: PNG output for trials and summaries

pub mod aggregate;
pub mod api;
pub mod cli;
pub mod core;
pub mod density;
pub mod error;
pub mod estimators;
pub mod generator;
pub mod models;
pub mod plotting;
pub mod samplers;
pub mod scoring;
pub mod settings;
pub mod trial;
pub mod types;

pub use aggregate::{load_trials, summarize, OutputKind, Summary, TrialTable};
pub use api::{estimate_line_lstsq, estimate_line_ransac, fit_least_squares, fit_ransac, EstimationResult};
pub use crate::core::{Estimator, LocalOptimizer, Sampler, Scoring};
pub use error::{Error, Result};
pub use generator::generate;
pub use models::Line;
pub use scoring::mean_squared_error;
pub use settings::{RansacSettings, SignalSettings, TrialConfig};
pub use trial::{run_trial, write_trial, Approach, TrialRecord};
pub use types::PointSet;
