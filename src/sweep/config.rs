//! Width schedule of a sweep

use serde::{Deserialize, Serialize};

use crate::config::ValidationError;

/// Hidden widths used by the reference double-descent run
pub const DEFAULT_WIDTHS: [usize; 33] = [
    2, 4, 6, 8, 10, 14, 18, 22, 26, 30, 35, 40, 45, 50, 55, 60, 70, 80, 90, 100, 120, 140, 160,
    180, 200, 250, 300, 400, 500, 600, 700, 800, 900,
];

/// Ordered widths, resume position and base seed of a sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Hidden widths, strictly ascending
    pub widths: Vec<usize>,
    /// Position in `widths` to start from (resume)
    pub start_index: usize,
    /// Base seed; each width derives its own stream from it
    pub seed: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            widths: DEFAULT_WIDTHS.to_vec(),
            start_index: 0,
            seed: 1,
        }
    }
}

impl SweepConfig {
    /// Check the width schedule
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.widths.is_empty() {
            return Err(ValidationError::EmptyWidths);
        }
        if let Some(&zero) = self.widths.iter().find(|&&w| w == 0) {
            return Err(ValidationError::NonPositiveWidth(zero));
        }
        if let Some(pair) = self.widths.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(ValidationError::WidthsNotAscending {
                previous: pair[0],
                next: pair[1],
            });
        }
        if self.start_index >= self.widths.len() {
            return Err(ValidationError::StartIndexOutOfRange {
                start: self.start_index,
                len: self.widths.len(),
            });
        }
        Ok(())
    }

    /// Widths that will actually be trained
    pub fn scheduled(&self) -> &[usize] {
        self.widths.get(self.start_index..).unwrap_or(&[])
    }

    /// Seed of the run for `width`
    ///
    /// Depends only on the base seed and the width, so a resumed sweep
    /// reproduces the runs of a full one.
    pub fn width_seed(&self, width: usize) -> u64 {
        self.seed
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .wrapping_add(width as u64)
    }
}
