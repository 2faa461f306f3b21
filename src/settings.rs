//! Configuration types for the estimators, the data generator and a trial.
//!
//! Every struct has a `Default` carrying the values the trial runner uses out
//! of the box. `TrialConfig` can additionally be read from a TOML file where
//! any omitted field keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Line;

/// Chi-squared quantile for one degree of freedom at 95% confidence.
pub const CHI_SQ_95_1DOF: f64 = 3.84;

/// Settings for the RANSAC line fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RansacSettings {
    /// Number of hypothesize-and-verify rounds. Always run in full.
    pub rounds: usize,
    /// Expected standard deviation of inlier noise.
    pub noise_sigma: f64,
    /// Number of points drawn (with replacement) per round.
    pub sample_size: usize,
    /// Inlier if the squared residual is below `chi_sq_thresh * noise_sigma^2`.
    pub chi_sq_thresh: f64,
    /// Refit the winning model on its inliers once all rounds are done.
    pub final_refit: bool,
}

impl RansacSettings {
    /// Squared-residual cut-off separating inliers from outliers.
    pub fn inlier_threshold_sq(&self) -> f64 {
        self.chi_sq_thresh * self.noise_sigma * self.noise_sigma
    }
}

impl Default for RansacSettings {
    fn default() -> Self {
        Self {
            rounds: 100,
            noise_sigma: 0.8,
            sample_size: 2,
            chi_sq_thresh: CHI_SQ_95_1DOF,
            final_refit: false,
        }
    }
}

/// Parameters of one synthetic draw from a noisy line with outliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalSettings {
    pub num_inliers: usize,
    /// The first `num_outliers` generated points are corrupted.
    pub num_outliers: usize,
    pub slope: f64,
    pub intercept: f64,
    pub noise_sigma: f64,
    /// Constant shift added to every outlier on top of its perturbation.
    pub outlier_offset: f64,
    /// Interval x-values are drawn from; bounds may be given in either order.
    pub x_range: [f64; 2],
}

impl Default for SignalSettings {
    fn default() -> Self {
        Self {
            num_inliers: 40,
            num_outliers: 10,
            slope: 2.0,
            intercept: -1.5,
            noise_sigma: 0.8,
            outlier_offset: 0.0,
            x_range: [0.0, 20.0],
        }
    }
}

/// Everything a single trial needs apart from its seed and approach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialConfig {
    pub train_inliers: usize,
    pub train_outliers: usize,
    pub eval_inliers: usize,
    pub noise_sigma: f64,
    pub outlier_offset: f64,
    pub x_range: [f64; 2],
    /// The true slope is drawn uniformly from this interval.
    pub slope_range: [f64; 2],
    /// The true intercept is drawn uniformly from this interval.
    pub intercept_range: [f64; 2],
    pub ransac: RansacSettings,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            train_inliers: 30,
            train_outliers: 15,
            eval_inliers: 20,
            noise_sigma: 0.8,
            outlier_offset: 0.0,
            x_range: [0.0, 20.0],
            slope_range: [-1.0, 1.0],
            intercept_range: [-4.0, 4.0],
            ransac: RansacSettings::default(),
        }
    }
}

impl TrialConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Contaminated training draw around `truth`.
    pub fn train_signal(&self, truth: Line) -> SignalSettings {
        self.signal(truth, self.train_inliers, self.train_outliers)
    }

    /// Clean held-out draw around `truth`.
    pub fn eval_signal(&self, truth: Line) -> SignalSettings {
        self.signal(truth, self.eval_inliers, 0)
    }

    fn signal(&self, truth: Line, num_inliers: usize, num_outliers: usize) -> SignalSettings {
        SignalSettings {
            num_inliers,
            num_outliers,
            slope: truth.slope,
            intercept: truth.intercept,
            noise_sigma: self.noise_sigma,
            outlier_offset: self.outlier_offset,
            x_range: self.x_range,
        }
    }
}
