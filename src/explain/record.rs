use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Attribution of one explained test example
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionRecord {
    /// Position in the test split
    pub sample_index: usize,
    /// Ground-truth class
    pub true_label: usize,
    /// Class predicted by the trained model
    pub predicted_label: usize,
    /// Raw class scores of the example
    pub logits: Array1<f32>,
    /// Mean class scores over the background
    pub expected_value: Array1<f32>,
    /// Attribution per feature (rows) and class (columns)
    pub scores: Array2<f32>,
}

impl AttributionRecord {
    /// Whether the prediction matches the label
    pub fn is_correct(&self) -> bool {
        self.true_label == self.predicted_label
    }

    /// Per-feature scores toward `class`
    pub fn class_scores(&self, class: usize) -> ArrayView1<'_, f32> {
        self.scores.column(class)
    }

    /// Per-feature scores toward the predicted class
    pub fn predicted_scores(&self) -> ArrayView1<'_, f32> {
        self.class_scores(self.predicted_label)
    }

    /// Largest deviation, over classes, between `expected + Σ scores` and the
    /// logit
    pub fn additivity_gap(&self) -> f32 {
        self.scores
            .columns()
            .into_iter()
            .zip(self.expected_value.iter().zip(&self.logits))
            .map(|(column, (&expected, &logit))| (expected + column.sum() - logit).abs())
            .fold(0.0, f32::max)
    }
}
