//! Core traits and the RANSAC loop.
//!
//! The loop is generic over three pluggable pieces:
//! - an [`Estimator`] fitting a model to a set of row indices,
//! - a [`Sampler`] choosing which rows form a minimal sample,
//! - a [`Scoring`] strategy counting the support of a model.
//!
//! An optional [`LocalOptimizer`] can polish the winner once every round has
//! run. Randomness is never owned by the pipeline: the caller passes the RNG
//! into [`Ransac::run`] so a trial seeded once is reproducible end to end.

use rand::Rng;
use tracing::{debug, trace};

use crate::error::Result;
use crate::settings::RansacSettings;
use crate::types::DataMatrix;

/// Fits a model to a subset of the rows in a data matrix.
pub trait Estimator {
    /// Model type produced by this estimator.
    type Model: Clone;

    /// Smallest number of rows that determines a model.
    fn sample_size(&self) -> usize;

    /// Check whether the rows in `sample` can produce a well-defined model.
    fn is_valid_sample(&self, data: &DataMatrix, sample: &[usize]) -> bool;

    /// Fit a model to the rows in `sample`.
    fn estimate_model(&self, data: &DataMatrix, sample: &[usize]) -> Result<Self::Model>;
}

/// Draws the row indices of a sample.
pub trait Sampler {
    /// Fill `out_indices[..sample_size]` with row indices.
    ///
    /// Returns `false` if no sample can be drawn from `data`.
    fn sample<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        data: &DataMatrix,
        sample_size: usize,
        out_indices: &mut [usize],
    ) -> bool;
}

/// Scoring strategy used to rank models and determine inliers.
pub trait Scoring<M> {
    /// Score type. `Default` must be the score of a model with no support.
    type Score: Clone + Default + PartialOrd;

    /// Score `model` against every row and collect its inliers.
    fn score(&self, data: &DataMatrix, model: &M, inliers_out: &mut Vec<usize>) -> Self::Score;
}

/// Refines a model using its inlier rows.
pub trait LocalOptimizer<M> {
    /// Returns `None` if no refinement could be computed.
    fn run(&mut self, data: &DataMatrix, inliers: &[usize], model: &M) -> Option<M>;
}

/// Optimizer that leaves the model untouched.
pub struct NoopLocalOptimizer;

impl<M: Clone> LocalOptimizer<M> for NoopLocalOptimizer {
    fn run(&mut self, _data: &DataMatrix, _inliers: &[usize], model: &M) -> Option<M> {
        Some(model.clone())
    }
}

/// Refits the model on all of its inliers with a non-minimal estimate.
pub struct LeastSquaresOptimizer<E>
where
    E: Estimator,
{
    estimator: E,
}

impl<E> LeastSquaresOptimizer<E>
where
    E: Estimator,
{
    pub fn new(estimator: E) -> Self {
        Self { estimator }
    }
}

impl<E> LocalOptimizer<E::Model> for LeastSquaresOptimizer<E>
where
    E: Estimator,
{
    fn run(&mut self, data: &DataMatrix, inliers: &[usize], _model: &E::Model) -> Option<E::Model> {
        if inliers.len() < self.estimator.sample_size()
            || !self.estimator.is_valid_sample(data, inliers)
        {
            return None;
        }
        self.estimator.estimate_model(data, inliers).ok()
    }
}

/// RANSAC pipeline with a fixed round budget.
///
/// Every round draws one sample, fits one candidate and scores it. A
/// candidate replaces the current best only if its score is strictly
/// higher, so the earliest of several equally good candidates wins. Rounds
/// whose sample is degenerate are skipped but still count toward the budget.
pub struct Ransac<E, Sa, Sc, LO>
where
    E: Estimator,
    Sa: Sampler,
    Sc: Scoring<E::Model>,
    LO: LocalOptimizer<E::Model>,
{
    pub settings: RansacSettings,
    pub estimator: E,
    pub sampler: Sa,
    pub scoring: Sc,
    pub final_optimizer: Option<LO>,

    // Outputs / diagnostics
    pub best_model: Option<E::Model>,
    pub best_inliers: Vec<usize>,
    pub best_score: Sc::Score,
    pub iteration: usize,
    pub skipped_rounds: usize,
}

impl<E, Sa, Sc, LO> Ransac<E, Sa, Sc, LO>
where
    E: Estimator,
    Sa: Sampler,
    Sc: Scoring<E::Model>,
    LO: LocalOptimizer<E::Model>,
{
    pub fn new(
        settings: RansacSettings,
        estimator: E,
        sampler: Sa,
        scoring: Sc,
        final_optimizer: Option<LO>,
    ) -> Self {
        Self {
            settings,
            estimator,
            sampler,
            scoring,
            final_optimizer,
            best_model: None,
            best_inliers: Vec::new(),
            best_score: Sc::Score::default(),
            iteration: 0,
            skipped_rounds: 0,
        }
    }

    /// Run all rounds on `data`, drawing randomness from `rng`.
    ///
    /// `best_model` stays `None` if no candidate ever gained support.
    pub fn run<R: Rng + ?Sized>(&mut self, data: &DataMatrix, rng: &mut R) {
        let sample_size = self.settings.sample_size.max(self.estimator.sample_size());
        let mut sample = vec![0usize; sample_size];
        let mut tmp_inliers = Vec::new();

        self.best_model = None;
        self.best_inliers.clear();
        self.best_score = Sc::Score::default();
        self.iteration = 0;
        self.skipped_rounds = 0;

        while self.iteration < self.settings.rounds {
            let round = self.iteration;
            self.iteration += 1;

            if !self.sampler.sample(rng, data, sample_size, &mut sample) {
                self.skipped_rounds += 1;
                continue;
            }

            if !self.estimator.is_valid_sample(data, &sample) {
                trace!(round, ?sample, "degenerate sample");
                self.skipped_rounds += 1;
                continue;
            }

            let model = match self.estimator.estimate_model(data, &sample) {
                Ok(model) => model,
                Err(err) => {
                    trace!(round, %err, "candidate fit failed");
                    self.skipped_rounds += 1;
                    continue;
                }
            };

            let score = self.scoring.score(data, &model, &mut tmp_inliers);
            if score > self.best_score {
                debug!(round, inliers = tmp_inliers.len(), "new best model");
                self.best_score = score;
                self.best_model = Some(model);
                std::mem::swap(&mut self.best_inliers, &mut tmp_inliers);
            }
        }

        if let (Some(final_opt), Some(best_model)) = (&mut self.final_optimizer, &self.best_model) {
            if let Some(refined) = final_opt.run(data, &self.best_inliers, best_model) {
                let score = self.scoring.score(data, &refined, &mut tmp_inliers);
                if score >= self.best_score {
                    debug!(inliers = tmp_inliers.len(), "kept refined model");
                    self.best_score = score;
                    self.best_model = Some(refined);
                    std::mem::swap(&mut self.best_inliers, &mut tmp_inliers);
                }
            }
        }
    }
}
