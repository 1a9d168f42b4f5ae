//! Classification error rate

use crate::error::{Error, Result};

/// Percentage of mismatched predictions: `100 * (pred != true) / count`
///
/// An empty input has an error rate of 0.
///
/// # Example
///
/// ```
/// use descenso::train::error_rate;
///
/// let err = error_rate(&[0, 1, 2, 3], &[0, 1, 2, 0]).unwrap();
/// assert_eq!(err, 25.0);
/// ```
pub fn error_rate(predicted: &[usize], truth: &[usize]) -> Result<f32> {
    if predicted.len() != truth.len() {
        return Err(Error::ShapeMismatch {
            context: "error rate predictions",
            expected: truth.len(),
            actual: predicted.len(),
        });
    }
    if truth.is_empty() {
        return Ok(0.0);
    }
    let wrong = predicted.iter().zip(truth).filter(|(p, t)| p != t).count();
    Ok(100.0 * wrong as f32 / truth.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    #[test]
    fn test_error_rate_length_mismatch() {
        assert!(matches!(
            error_rate(&[0, 1], &[0]),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_error_rate_all_wrong() {
        assert_eq!(error_rate(&[1, 1], &[0, 0]).unwrap(), 100.0);
    }

    #[test]
    fn test_error_rate_keeps_fraction() {
        // 1 of 3 wrong must not truncate to an integer
        let err = error_rate(&[0, 1, 2], &[0, 1, 0]).unwrap();
        assert!((err - 100.0 / 3.0).abs() < 1e-4);
    }

    fn label_pair() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
        (1usize..200).prop_flat_map(|l| (vec(0usize..10, l), vec(0usize..10, l)))
    }

    proptest! {
        #[test]
        fn prop_error_rate_bounded((pred, truth) in label_pair()) {
            let err = error_rate(&pred, &truth).unwrap();
            prop_assert!((0.0..=100.0).contains(&err), "error {} out of range", err);
        }

        #[test]
        fn prop_error_rate_zero_iff_all_match((pred, truth) in label_pair()) {
            let err = error_rate(&pred, &truth).unwrap();
            prop_assert_eq!(err == 0.0, pred == truth);
        }

        #[test]
        fn prop_perfect_predictions(truth in vec(0usize..10, 1..200)) {
            prop_assert_eq!(error_rate(&truth, &truth).unwrap(), 0.0);
        }
    }
}
