//! Uniform random sampler drawing indices with replacement.

use rand::Rng;

use crate::core::Sampler;
use crate::types::DataMatrix;

/// Draws every index independently and uniformly from all rows.
///
/// Indices may repeat within one sample; the estimator rejects such
/// samples when they leave the model undetermined.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformRandomSampler;

impl UniformRandomSampler {
    pub fn new() -> Self {
        Self
    }
}

impl Sampler for UniformRandomSampler {
    fn sample<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        data: &DataMatrix,
        sample_size: usize,
        out_indices: &mut [usize],
    ) -> bool {
        let n = data.nrows();
        if sample_size == 0 || n == 0 || out_indices.len() < sample_size {
            return false;
        }

        for slot in &mut out_indices[..sample_size] {
            *slot = rng.gen_range(0..n);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn indices_stay_in_range() {
        let data = DataMatrix::zeros(5, 2);
        let mut sampler = UniformRandomSampler::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut sample = [0usize; 3];
        for _ in 0..200 {
            assert!(sampler.sample(&mut rng, &data, 3, &mut sample));
            assert!(sample.iter().all(|&i| i < 5));
        }
    }

    #[test]
    fn draws_with_replacement() {
        // Two rows, many pairs: repeats are practically certain.
        let data = DataMatrix::zeros(2, 2);
        let mut sampler = UniformRandomSampler::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut sample = [0usize; 2];
        let repeats = (0..100)
            .filter(|_| {
                sampler.sample(&mut rng, &data, 2, &mut sample);
                sample[0] == sample[1]
            })
            .count();
        assert!(repeats > 0);
    }

    #[test]
    fn sample_larger_than_data_is_allowed() {
        let data = DataMatrix::zeros(1, 2);
        let mut sample = [9usize; 4];
        let ok = UniformRandomSampler::new().sample(&mut StdRng::seed_from_u64(3), &data, 4, &mut sample);
        assert!(ok);
        assert_eq!(sample, [0, 0, 0, 0]);
    }

    #[test]
    fn same_seed_same_samples() {
        let data = DataMatrix::zeros(50, 2);
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut sample = [0usize; 2];
            UniformRandomSampler::new().sample(&mut rng, &data, 2, &mut sample);
            sample
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn empty_data_cannot_be_sampled() {
        let data = DataMatrix::zeros(0, 2);
        let mut sample = [0usize; 2];
        assert!(!UniformRandomSampler::new().sample(&mut StdRng::seed_from_u64(0), &data, 2, &mut sample));
    }
}
