//! Additive feature attribution for trained classifiers
//!
//! After each width is trained, a fixed batch of test examples is explained
//! against a background drawn from the training split. Scores satisfy
//! `expected_value[c] + Σ_j scores[j][c] == logits[c]`.

mod background;
mod batch;
mod deep;
mod record;

pub use background::select_background;
pub use batch::ExplainBatch;
pub use deep::DeepExplainer;
pub use record::AttributionRecord;
