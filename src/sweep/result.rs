//! Double-descent curve produced by a sweep

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Final errors of one width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepEntry {
    /// Hidden width
    pub width: usize,
    /// Trainable parameters of the model
    pub num_parameters: usize,
    /// Final training error in percent
    pub train_error: f32,
    /// Final test error in percent
    pub test_error: f32,
}

/// Stage in which a width failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStage {
    /// Model construction or training; no entry was recorded
    Training,
    /// Downstream hook (attribution, filing); the entry was recorded
    Hook,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::Training => write!(f, "training"),
            FailureStage::Hook => write!(f, "hook"),
        }
    }
}

/// A width that did not complete cleanly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepFailure {
    /// Hidden width
    pub width: usize,
    /// Where it failed
    pub stage: FailureStage,
    /// Error message
    pub reason: String,
}

/// Entries in ascending width order plus isolated failures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    /// One entry per successfully trained width
    pub entries: Vec<SweepEntry>,
    /// Widths that failed
    #[serde(default)]
    pub failures: Vec<SweepFailure>,
}

impl SweepResult {
    /// Widths with a recorded entry
    pub fn widths(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.width).collect()
    }

    /// Entry for `width`, if it was trained
    pub fn entry(&self, width: usize) -> Option<&SweepEntry> {
        self.entries.iter().find(|e| e.width == width)
    }

    /// Entry with the highest test error, the interpolation peak when the
    /// curve shows double descent
    pub fn peak_test_error(&self) -> Option<&SweepEntry> {
        self.entries
            .iter()
            .max_by(|a, b| a.test_error.total_cmp(&b.test_error))
    }

    /// Whether the sweep finished without failures
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Append the entries and failures of a resumed sweep
    ///
    /// Widths rerun by `other` replace both their old entry and old failure.
    pub fn merge(&mut self, other: SweepResult) {
        let rerun: Vec<usize> = other
            .entries
            .iter()
            .map(|e| e.width)
            .chain(other.failures.iter().map(|f| f.width))
            .collect();
        self.failures.retain(|f| !rerun.contains(&f.width));
        for entry in other.entries {
            self.entries.retain(|e| e.width != entry.width);
            self.entries.push(entry);
        }
        self.entries.sort_by_key(|e| e.width);
        self.failures.extend(other.failures);
    }

    /// Save as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Load from JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
