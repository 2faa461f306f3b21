//! Sampling strategies for the RANSAC loop.

pub mod uniform;

pub use uniform::UniformRandomSampler;
