//! Writes attribution plots into outcome buckets

use std::fs;
use std::path::{Path, PathBuf};

use ndarray::ArrayView1;
use tracing::{debug, info};

use super::manifest::{Manifest, ManifestEntry};
use super::naming::{ArtifactName, Bucket};
use super::render::{encode_jpeg, render, RenderConfig};
use crate::data::Dataset;
use crate::error::{Error, Result};
use crate::explain::AttributionRecord;

/// Files written for one record
#[derive(Debug, Clone, PartialEq)]
pub struct FiledArtifact {
    /// Parsed name
    pub name: ArtifactName,
    /// Every path written, `ALL` first
    pub paths: Vec<PathBuf>,
}

/// Remove every artifact file and the manifest under `root`
///
/// Subdirectories of the buckets are left alone. Returns the number of files
/// removed.
pub fn clear_artifacts(root: impl AsRef<Path>) -> Result<usize> {
    let root = root.as_ref();
    let mut removed = 0;
    for bucket in Bucket::ALL {
        let dir = root.join(bucket.dir_name());
        if !dir.is_dir() {
            continue;
        }
        for item in fs::read_dir(&dir)? {
            let item = item?;
            if item.file_type()?.is_file() {
                fs::remove_file(item.path())?;
                removed += 1;
            }
        }
    }
    let manifest = Manifest::in_root(root);
    if manifest.path().exists() {
        fs::remove_file(manifest.path())?;
    }
    if removed > 0 {
        info!(root = %root.display(), removed, "Cleared previous artifacts");
    }
    Ok(removed)
}

/// Renders records and files them under `CP`, `WP` and `ALL`
///
/// Every artifact goes to `ALL` and to exactly one of `CP` (correct
/// prediction) or `WP` (wrong prediction). A `(sample, width)` pair has at
/// most one artifact: filing it again replaces the earlier files, whatever
/// labels they carried.
#[derive(Debug, Clone)]
pub struct ArtifactFiler {
    root: PathBuf,
    render: RenderConfig,
    manifest: Manifest,
}

impl ArtifactFiler {
    /// Create the bucket directories under `root`
    pub fn new(root: impl AsRef<Path>, render: RenderConfig) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        for bucket in Bucket::ALL {
            fs::create_dir_all(root.join(bucket.dir_name()))?;
        }
        Ok(Self {
            manifest: Manifest::in_root(&root),
            root,
            render,
        })
    }

    /// Artifact root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sidecar manifest
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Path of `name` inside `bucket`
    pub fn path_for(&self, bucket: Bucket, name: &ArtifactName) -> PathBuf {
        self.root.join(bucket.dir_name()).join(name.file_name())
    }

    /// Remove earlier files of the same sample and width from every bucket
    fn remove_previous(&self, sample_index: usize, width: usize) -> Result<()> {
        for true_label in 0..10 {
            for predicted_label in 0..10 {
                let name = ArtifactName::new(sample_index, true_label, predicted_label, width)?;
                for bucket in Bucket::ALL {
                    let path = self.path_for(bucket, &name);
                    if path.is_file() {
                        debug!(path = %path.display(), "Replacing artifact");
                        fs::remove_file(&path)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Render and file one record
    pub fn file(
        &self,
        record: &AttributionRecord,
        signal: ArrayView1<'_, f32>,
        t: ArrayView1<'_, f32>,
        width: usize,
    ) -> Result<FiledArtifact> {
        let name = ArtifactName::new(
            record.sample_index,
            record.true_label,
            record.predicted_label,
            width,
        )?;
        let image = render(signal, t, record.predicted_scores(), &self.render)?;
        let bytes = encode_jpeg(&image, self.render.quality)?;

        self.remove_previous(name.sample_index, width)?;
        let buckets = vec![Bucket::All, name.outcome_bucket()];
        let mut paths = Vec::with_capacity(buckets.len());
        for &bucket in &buckets {
            let path = self.path_for(bucket, &name);
            fs::write(&path, &bytes)?;
            debug!(path = %path.display(), "Wrote artifact");
            paths.push(path);
        }

        self.manifest.append(&ManifestEntry::new(name, buckets))?;
        Ok(FiledArtifact { name, paths })
    }

    /// File every record of a batch explained on the test split of `dataset`
    pub fn file_batch(
        &self,
        records: &[AttributionRecord],
        dataset: &Dataset,
        width: usize,
    ) -> Result<Vec<FiledArtifact>> {
        let test = dataset.test();
        records
            .iter()
            .map(|record| {
                if record.sample_index >= test.len() {
                    return Err(Error::ShapeMismatch {
                        context: "artifact sample index",
                        expected: test.len(),
                        actual: record.sample_index,
                    });
                }
                self.file(record, test.signal(record.sample_index), dataset.t().view(), width)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    fn record(sample_index: usize, true_label: usize, predicted_label: usize) -> AttributionRecord {
        AttributionRecord {
            sample_index,
            true_label,
            predicted_label,
            logits: Array1::zeros(10),
            expected_value: Array1::zeros(10),
            scores: Array2::from_shape_fn((40, 10), |(j, c)| (j as f32 - 20.0) * (c as f32 + 1.0)),
        }
    }

    fn grid() -> (Array1<f32>, Array1<f32>) {
        (
            Array1::from_shape_fn(40, |i| (i as f32 * 0.3).sin()),
            Array1::linspace(-1.0, 1.0, 40),
        )
    }

    #[test]
    fn test_correct_prediction_goes_to_all_and_cp() {
        let dir = tempfile::tempdir().unwrap();
        let filer = ArtifactFiler::new(dir.path(), RenderConfig::default()).unwrap();
        let (signal, t) = grid();

        let filed = filer.file(&record(7, 3, 3), signal.view(), t.view(), 50).unwrap();
        assert_eq!(filed.paths.len(), 2);
        assert!(dir.path().join("ALL/7th_smpl_33_50_nn.jpg").is_file());
        assert!(dir.path().join("CP/7th_smpl_33_50_nn.jpg").is_file());
        assert!(!dir.path().join("WP/7th_smpl_33_50_nn.jpg").exists());
    }

    #[test]
    fn test_wrong_prediction_goes_to_wp() {
        let dir = tempfile::tempdir().unwrap();
        let filer = ArtifactFiler::new(dir.path(), RenderConfig::default()).unwrap();
        let (signal, t) = grid();

        filer.file(&record(12, 4, 9), signal.view(), t.view(), 6).unwrap();
        assert!(dir.path().join("WP/12th_smpl_49_6_nn.jpg").is_file());
        assert!(!dir.path().join("CP/12th_smpl_49_6_nn.jpg").exists());

        let manifest = filer.manifest().read().unwrap();
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest[0].buckets, vec![Bucket::All, Bucket::Wrong]);
    }

    #[test]
    fn test_overwrite_keeps_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let filer = ArtifactFiler::new(dir.path(), RenderConfig::default()).unwrap();
        let (signal, t) = grid();
        filer.file(&record(1, 2, 2), signal.view(), t.view(), 4).unwrap();
        filer.file(&record(1, 2, 2), signal.view(), t.view(), 4).unwrap();
        assert_eq!(fs::read_dir(dir.path().join("ALL")).unwrap().count(), 1);
    }

    #[test]
    fn test_changed_prediction_replaces_earlier_file() {
        let dir = tempfile::tempdir().unwrap();
        let filer = ArtifactFiler::new(dir.path(), RenderConfig::default()).unwrap();
        let (signal, t) = grid();
        filer.file(&record(3, 5, 5), signal.view(), t.view(), 4).unwrap();
        filer.file(&record(3, 5, 1), signal.view(), t.view(), 4).unwrap();
        filer.file(&record(3, 5, 5), signal.view(), t.view(), 40).unwrap();

        assert!(!dir.path().join("CP/3th_smpl_55_4_nn.jpg").exists());
        assert!(!dir.path().join("ALL/3th_smpl_55_4_nn.jpg").exists());
        assert!(dir.path().join("WP/3th_smpl_51_4_nn.jpg").is_file());
        assert!(dir.path().join("CP/3th_smpl_55_40_nn.jpg").is_file());
        assert_eq!(fs::read_dir(dir.path().join("ALL")).unwrap().count(), 2);
    }

    #[test]
    fn test_clear_artifacts_empties_buckets_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let filer = ArtifactFiler::new(dir.path(), RenderConfig::default()).unwrap();
        let (signal, t) = grid();
        filer.file(&record(1, 2, 2), signal.view(), t.view(), 4).unwrap();
        filer.file(&record(2, 2, 7), signal.view(), t.view(), 4).unwrap();
        fs::create_dir_all(dir.path().join("CP/keep")).unwrap();

        assert_eq!(clear_artifacts(dir.path()).unwrap(), 4);
        assert!(!filer.manifest().path().exists());
        assert!(dir.path().join("CP/keep").is_dir());
        assert_eq!(clear_artifacts(dir.path()).unwrap(), 0);
    }

    #[test]
    fn test_unencodable_label_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let filer = ArtifactFiler::new(dir.path(), RenderConfig::default()).unwrap();
        let (signal, t) = grid();
        let mut bad = record(0, 1, 1);
        bad.true_label = 11;
        assert!(matches!(
            filer.file(&bad, signal.view(), t.view(), 4),
            Err(Error::LabelNotEncodable(11))
        ));
        assert_eq!(fs::read_dir(dir.path().join("ALL")).unwrap().count(), 0);
    }
}
