//! Reference rows for attribution

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::data::Split;

/// Background set drawn from the training split
///
/// With `size = None`, or a size at least the split length, every row is used.
/// Otherwise `size` distinct rows are drawn with a seeded RNG and kept in
/// split order, so the same seed always yields the same background.
pub fn select_background(split: &Split, size: Option<usize>, seed: u64) -> Array2<f32> {
    match size {
        Some(size) if size < split.len() => {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut indices = rand::seq::index::sample(&mut rng, split.len(), size).into_vec();
            indices.sort_unstable();
            split.rows(&indices)
        }
        _ => split.x().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split() -> Split {
        let x = Array2::from_shape_fn((20, 3), |(i, j)| (i * 3 + j) as f32);
        Split::new(x, vec![0; 20]).unwrap()
    }

    #[test]
    fn test_all_rows_by_default() {
        let split = split();
        assert_eq!(select_background(&split, None, 0), split.x().clone());
        assert_eq!(select_background(&split, Some(50), 0).nrows(), 20);
    }

    #[test]
    fn test_subsample_is_seeded_and_distinct() {
        let split = split();
        let a = select_background(&split, Some(5), 9);
        let b = select_background(&split, Some(5), 9);
        assert_eq!(a, b);
        assert_eq!(a.nrows(), 5);

        let firsts: Vec<f32> = a.column(0).to_vec();
        let mut sorted = firsts.clone();
        sorted.sort_by(f32::total_cmp);
        sorted.dedup();
        assert_eq!(firsts, sorted);
    }
}
