//! Shuffled mini-batch index iteration

use rand::seq::SliceRandom;
use rand::Rng;

/// Index batches over one epoch of a split
///
/// The order is shuffled once at construction; the last batch may be short.
#[derive(Debug, Clone)]
pub struct BatchIterator {
    indices: Vec<usize>,
    position: usize,
    batch_size: usize,
}

impl BatchIterator {
    /// Batches over `0..size` in a fresh random order
    pub fn shuffled<R: Rng + ?Sized>(size: usize, batch_size: usize, rng: &mut R) -> Self {
        let mut indices: Vec<usize> = (0..size).collect();
        indices.shuffle(rng);
        Self {
            indices,
            position: 0,
            batch_size: batch_size.max(1),
        }
    }

    /// Batches over `0..size` in order
    pub fn sequential(size: usize, batch_size: usize) -> Self {
        Self {
            indices: (0..size).collect(),
            position: 0,
            batch_size: batch_size.max(1),
        }
    }

    /// Number of batches in the epoch
    pub fn num_batches(&self) -> usize {
        self.indices.len().div_ceil(self.batch_size)
    }
}

impl Iterator for BatchIterator {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.indices.len() {
            return None;
        }
        let end = (self.position + self.batch_size).min(self.indices.len());
        let batch = self.indices[self.position..end].to_vec();
        self.position = end;
        Some(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sequential_batches() {
        let batches: Vec<_> = BatchIterator::sequential(5, 2).collect();
        assert_eq!(batches, vec![vec![0, 1], vec![2, 3], vec![4]]);
    }

    #[test]
    fn test_shuffled_covers_every_index_once() {
        let mut rng = StdRng::seed_from_u64(4);
        let iter = BatchIterator::shuffled(103, 10, &mut rng);
        assert_eq!(iter.num_batches(), 11);
        let mut seen: Vec<usize> = iter.flatten().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..103).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffled_is_seed_deterministic() {
        let a: Vec<_> = BatchIterator::shuffled(50, 7, &mut StdRng::seed_from_u64(1)).collect();
        let b: Vec<_> = BatchIterator::shuffled(50, 7, &mut StdRng::seed_from_u64(1)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_split_yields_nothing() {
        assert_eq!(BatchIterator::sequential(0, 4).count(), 0);
    }
}
