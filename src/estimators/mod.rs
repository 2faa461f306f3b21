//! Estimators for the line model.

pub mod line;

pub use line::LineEstimator;
