//! Line model produced by the estimators.

use serde::{Deserialize, Serialize};

/// Line in slope-intercept form, `y = slope * x + intercept`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub intercept: f64,
    pub slope: f64,
}

impl Line {
    pub fn new(intercept: f64, slope: f64) -> Self {
        Self { intercept, slope }
    }

    /// Predicted y at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Signed vertical residual `prediction - y`.
    pub fn residual(&self, x: f64, y: f64) -> f64 {
        self.predict(x) - y
    }

    pub fn is_finite(&self) -> bool {
        self.intercept.is_finite() && self.slope.is_finite()
    }
}
