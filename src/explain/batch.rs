//! Deterministic selection of the explained test batch

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The `batch_index`-th unshuffled batch of the test split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainBatch {
    /// Examples per batch
    pub batch_size: usize,
    /// Which batch to take, starting at 0
    pub batch_index: usize,
}

impl Default for ExplainBatch {
    fn default() -> Self {
        Self {
            batch_size: 12,
            batch_index: 1,
        }
    }
}

impl ExplainBatch {
    /// First test position of the batch
    pub fn start(&self) -> usize {
        self.batch_index * self.batch_size
    }

    /// Test positions covered by the batch in a split of `available` examples
    ///
    /// The last batch of a split may be short, as with an unshuffled loader.
    pub fn positions(&self, available: usize) -> Result<Range<usize>> {
        let start = self.start();
        if self.batch_size == 0 || start >= available {
            return Err(Error::Data(format!(
                "explain batch {} of size {} is outside a test split of {} examples",
                self.batch_index, self.batch_size, available
            )));
        }
        Ok(start..(start + self.batch_size).min(available))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_batch_positions() {
        let batch = ExplainBatch::default();
        assert_eq!(batch.positions(4000).unwrap(), 12..24);
    }

    #[test]
    fn test_last_batch_is_short() {
        let batch = ExplainBatch {
            batch_size: 12,
            batch_index: 3,
        };
        assert_eq!(batch.positions(40).unwrap(), 36..40);
    }

    #[test]
    fn test_batch_past_end_is_rejected() {
        let batch = ExplainBatch {
            batch_size: 12,
            batch_index: 4,
        };
        assert!(matches!(batch.positions(40), Err(Error::Data(_))));
    }
}
