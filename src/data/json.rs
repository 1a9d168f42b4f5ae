//! JSON dataset import and export
//!
//! The file layout mirrors a pickled MNIST-1D dictionary: `x`, `y`, `x_test`,
//! `y_test` and an optional sample grid `t`.

use std::fs;
use std::path::{Path, PathBuf};

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::dataset::{Dataset, Split};
use super::DatasetProvider;
use crate::error::{Error, Result};

/// On-disk representation of a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetFile {
    /// Training signals
    pub x: Vec<Vec<f32>>,
    /// Training labels
    pub y: Vec<usize>,
    /// Test signals
    pub x_test: Vec<Vec<f32>>,
    /// Test labels
    pub y_test: Vec<usize>,
    /// Sample grid; defaults to an evenly spaced grid on [-1, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<Vec<f32>>,
}

impl DatasetFile {
    /// Convert into a validated dataset with `num_classes` classes
    pub fn into_dataset(self, num_classes: usize) -> Result<Dataset> {
        let train = Split::new(to_matrix(&self.x, "train signals")?, self.y)?;
        let test = Split::new(to_matrix(&self.x_test, "test signals")?, self.y_test)?;
        let t = match self.t {
            Some(t) => Array1::from(t),
            None => Array1::linspace(-1.0, 1.0, train.num_features()),
        };
        Dataset::new(train, test, t, num_classes)
    }
}

impl From<&Dataset> for DatasetFile {
    fn from(ds: &Dataset) -> Self {
        Self {
            x: to_rows(ds.train().x()),
            y: ds.train().y().to_vec(),
            x_test: to_rows(ds.test().x()),
            y_test: ds.test().y().to_vec(),
            t: Some(ds.t().to_vec()),
        }
    }
}

fn to_rows(x: &Array2<f32>) -> Vec<Vec<f32>> {
    x.outer_iter().map(|r| r.to_vec()).collect()
}

fn to_matrix(rows: &[Vec<f32>], context: &'static str) -> Result<Array2<f32>> {
    let width = rows.first().map_or(0, Vec::len);
    if let Some(bad) = rows.iter().find(|r| r.len() != width) {
        return Err(Error::ShapeMismatch {
            context,
            expected: width,
            actual: bad.len(),
        });
    }
    let flat: Vec<f32> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((rows.len(), width), flat).map_err(|e| Error::Data(e.to_string()))
}

/// Dataset provider reading a [`DatasetFile`] from disk
#[derive(Debug, Clone)]
pub struct JsonDataset {
    path: PathBuf,
    num_classes: usize,
}

impl JsonDataset {
    /// Create a provider for the file at `path`
    pub fn new(path: impl AsRef<Path>, num_classes: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            num_classes,
        }
    }
}

impl DatasetProvider for JsonDataset {
    fn provide(&self) -> Result<Dataset> {
        let content = fs::read_to_string(&self.path)?;
        let file: DatasetFile = serde_json::from_str(&content)?;
        let ds = file.into_dataset(self.num_classes)?;
        info!(
            path = %self.path.display(),
            train = ds.train().len(),
            test = ds.test().len(),
            "Loaded dataset"
        );
        Ok(ds)
    }

    fn name(&self) -> &str {
        "json"
    }
}

/// Write `dataset` to `path` as JSON
pub fn save_json(dataset: &Dataset, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string(&DatasetFile::from(dataset))?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SignalArgs, SyntheticSignals};

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let ds = SyntheticSignals::new(SignalArgs {
            num_samples: 20,
            ..Default::default()
        })
        .provide()
        .unwrap();

        save_json(&ds, &path).unwrap();
        let loaded = JsonDataset::new(&path, 10).provide().unwrap();

        assert_eq!(loaded.train().y(), ds.train().y());
        assert_eq!(loaded.test().len(), ds.test().len());
        assert_eq!(loaded.num_features(), 40);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let file = DatasetFile {
            x: vec![vec![0.0, 1.0], vec![0.0]],
            y: vec![0, 1],
            x_test: vec![vec![0.0, 1.0]],
            y_test: vec![0],
            t: None,
        };
        assert!(matches!(
            file.into_dataset(2),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_label_count_mismatch_rejected() {
        let file = DatasetFile {
            x: vec![vec![0.0, 1.0], vec![1.0, 0.0]],
            y: vec![0],
            x_test: vec![vec![0.0, 1.0]],
            y_test: vec![0],
            t: None,
        };
        assert!(matches!(
            file.into_dataset(2),
            Err(Error::ShapeMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_default_grid() {
        let file = DatasetFile {
            x: vec![vec![0.0, 1.0, 2.0]],
            y: vec![1],
            x_test: vec![vec![2.0, 1.0, 0.0]],
            y_test: vec![0],
            t: None,
        };
        let ds = file.into_dataset(2).unwrap();
        assert_eq!(ds.t().to_vec(), vec![-1.0, 0.0, 1.0]);
    }
}
