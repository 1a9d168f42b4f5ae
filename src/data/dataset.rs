//! Labeled signal dataset with disjoint train/test splits

use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One partition of a dataset: a matrix of signals and their class labels
///
/// Row `i` of `x` is the signal whose label is `y[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    x: Array2<f32>,
    y: Vec<usize>,
}

impl Split {
    /// Create a split, rejecting a row/label count mismatch
    pub fn new(x: Array2<f32>, y: Vec<usize>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(Error::ShapeMismatch {
                context: "split labels",
                expected: x.nrows(),
                actual: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    /// Signals, one per row
    pub fn x(&self) -> &Array2<f32> {
        &self.x
    }

    /// Class labels
    pub fn y(&self) -> &[usize] {
        &self.y
    }

    /// Number of examples
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Whether the split has no examples
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Signal length
    pub fn num_features(&self) -> usize {
        self.x.ncols()
    }

    /// Signal at `index`
    pub fn signal(&self, index: usize) -> ArrayView1<'_, f32> {
        self.x.row(index)
    }

    /// Gather the rows at `indices` into a new matrix
    pub fn rows(&self, indices: &[usize]) -> Array2<f32> {
        self.x.select(Axis(0), indices)
    }

    /// Gather the labels at `indices`
    pub fn labels(&self, indices: &[usize]) -> Vec<usize> {
        indices.iter().map(|&i| self.y[i]).collect()
    }

    pub(crate) fn y_mut(&mut self) -> &mut [usize] {
        &mut self.y
    }
}

/// A complete dataset: train and test splits plus the sample grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    train: Split,
    test: Split,
    t: Array1<f32>,
    num_classes: usize,
}

impl Dataset {
    /// Assemble a dataset and check its invariants
    ///
    /// Both splits must be non-empty, share a signal length equal to the grid
    /// length, and carry labels below `num_classes`.
    pub fn new(train: Split, test: Split, t: Array1<f32>, num_classes: usize) -> Result<Self> {
        if train.is_empty() || test.is_empty() {
            return Err(Error::Data(format!(
                "splits must be non-empty (train={}, test={})",
                train.len(),
                test.len()
            )));
        }
        if train.num_features() != test.num_features() {
            return Err(Error::ShapeMismatch {
                context: "test signal length",
                expected: train.num_features(),
                actual: test.num_features(),
            });
        }
        if t.len() != train.num_features() {
            return Err(Error::ShapeMismatch {
                context: "sample grid length",
                expected: train.num_features(),
                actual: t.len(),
            });
        }
        if let Some(&label) = train.y().iter().chain(test.y()).find(|&&l| l >= num_classes) {
            return Err(Error::Data(format!(
                "label {label} out of range for {num_classes} classes"
            )));
        }
        Ok(Self {
            train,
            test,
            t,
            num_classes,
        })
    }

    /// Training split
    pub fn train(&self) -> &Split {
        &self.train
    }

    /// Test split
    pub fn test(&self) -> &Split {
        &self.test
    }

    /// Sample grid used as the vertical axis of rendered signals
    pub fn t(&self) -> &Array1<f32> {
        &self.t
    }

    /// Number of classes
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Signal length
    pub fn num_features(&self) -> usize {
        self.train.num_features()
    }

    pub(crate) fn train_mut(&mut self) -> &mut Split {
        &mut self.train
    }
}
