//! End-to-end double-descent experiment
//!
//! Wires the dataset provider, label corruption, sweep controller,
//! attribution and artifact filing together from one [`ExperimentSpec`], and
//! writes everything under the output root:
//!
//! ```text
//! <root>/sweep_result.json
//! <root>/curve.jpg
//! <root>/label_noise.json
//! <root>/runs/width_<w>.json
//! <root>/{CP,WP,ALL}/*.jpg
//! <root>/manifest.jsonl
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::artifact::{clear_artifacts, encode_jpeg, render_curve, ArtifactFiler};
use crate::config::{validate_spec, DataSource, Device, ExperimentSpec};
use crate::data::{Dataset, DatasetProvider, JsonDataset, LabelCorruption, SyntheticSignals};
use crate::error::Result;
use crate::explain::{select_background, DeepExplainer};
use crate::sweep::{SweepController, SweepResult};

/// Sweep curve file name under the output root
pub const SWEEP_RESULT_FILE: &str = "sweep_result.json";
/// Train and test error against width
pub const CURVE_FILE: &str = "curve.jpg";
/// Label corruption record file name under the output root
pub const LABEL_NOISE_FILE: &str = "label_noise.json";
/// Directory of per-width training histories
pub const RUNS_DIR: &str = "runs";

/// Summary of a finished experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Output root
    pub output_root: PathBuf,
    /// Curve, including entries of earlier runs when resuming
    pub result: SweepResult,
    /// Artifacts filed by this run (each counted once, not per bucket)
    pub artifacts_written: usize,
    /// Training labels whose value was changed by corruption
    pub labels_corrupted: usize,
}

/// A validated experiment ready to run
#[derive(Debug, Clone)]
pub struct Experiment {
    spec: ExperimentSpec,
    device: Device,
}

impl Experiment {
    /// Validate `spec` and resolve the compute device
    pub fn from_spec(spec: ExperimentSpec) -> Result<Self> {
        validate_spec(&spec)?;
        let device = Device::from_spec(&spec)?;
        Ok(Self { spec, device })
    }

    /// Experiment specification
    pub fn spec(&self) -> &ExperimentSpec {
        &self.spec
    }

    /// Resolved compute device
    pub fn device(&self) -> Device {
        self.device
    }

    /// Dataset provider for the configured source
    pub fn provider(&self) -> Box<dyn DatasetProvider> {
        match &self.spec.data.source {
            DataSource::Synthetic => {
                Box::new(SyntheticSignals::new(self.spec.data.signals.clone()))
            }
            DataSource::Json { path } => {
                Box::new(JsonDataset::new(path, self.spec.model.output_dim))
            }
        }
    }

    /// Load the dataset and corrupt its training labels when configured
    pub fn load_dataset(&self) -> Result<(Dataset, Option<LabelCorruption>)> {
        let provider = self.provider();
        info!(provider = provider.name(), "Loading dataset");
        let mut dataset = provider.provide()?;
        let corruption = self
            .spec
            .data
            .label_noise
            .as_ref()
            .map(|noise| noise.apply(&mut dataset));
        Ok((dataset, corruption))
    }

    /// Run the sweep with attribution and filing after every width
    ///
    /// A run starting at the first width replaces every artifact under the
    /// root; a resumed run keeps the artifacts of the widths before it.
    pub fn run(&self) -> Result<ExperimentReport> {
        let spec = &self.spec;
        let root = spec.output.root.as_path();
        fs::create_dir_all(root)?;
        info!(root = %root.display(), device = ?self.device, "Starting experiment");

        let (dataset, corruption) = self.load_dataset()?;
        if let Some(corruption) = &corruption {
            corruption.save(root.join(LABEL_NOISE_FILE))?;
        }

        let controller = SweepController::new(spec.sweep.clone(), spec.model, spec.training)?;
        let runs_dir = root.join(RUNS_DIR);
        if spec.output.save_runs {
            fs::create_dir_all(&runs_dir)?;
        }
        if spec.sweep.start_index == 0 {
            clear_artifacts(root)?;
        }
        let filer = if spec.explain.enabled {
            Some(ArtifactFiler::new(root, spec.output.render)?)
        } else {
            None
        };
        let background = select_background(
            dataset.train(),
            spec.explain.background_size,
            spec.explain.background_seed,
        );
        let batch = spec.explain.batch();

        let mut artifacts_written = 0;
        let result = controller.run_with(&dataset, |outcome| {
            if spec.output.save_runs {
                outcome
                    .run
                    .save(runs_dir.join(format!("width_{}.json", outcome.width)))?;
            }
            if let Some(filer) = &filer {
                let explainer = DeepExplainer::new(outcome.model, background.clone())?;
                let records =
                    explainer.explain_batch(dataset.test(), &batch, &outcome.run.test_predictions)?;
                let filed = filer.file_batch(&records, &dataset, outcome.width)?;
                info!(
                    width = outcome.width,
                    background = explainer.background_size(),
                    artifacts = filed.len(),
                    "Filed attributions"
                );
                artifacts_written += filed.len();
            }
            Ok(())
        });

        let result = merge_with_previous(root, spec.sweep.start_index, result)?;
        result.save(root.join(SWEEP_RESULT_FILE))?;
        let curve = render_curve(&result.entries, &spec.output.render)?;
        fs::write(root.join(CURVE_FILE), encode_jpeg(&curve, spec.output.render.quality)?)?;
        info!(
            widths = result.entries.len(),
            failures = result.failures.len(),
            artifacts = artifacts_written,
            "Experiment complete"
        );

        Ok(ExperimentReport {
            output_root: root.to_path_buf(),
            result,
            artifacts_written,
            labels_corrupted: corruption.as_ref().map_or(0, LabelCorruption::changed),
        })
    }
}

/// A resumed sweep extends the curve already on disk
fn merge_with_previous(root: &Path, start_index: usize, result: SweepResult) -> Result<SweepResult> {
    let path = root.join(SWEEP_RESULT_FILE);
    if start_index == 0 || !path.exists() {
        return Ok(result);
    }
    let mut previous = SweepResult::load(&path)?;
    previous.merge(result);
    Ok(previous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;
    use crate::error::Error;
    use crate::sweep::SweepEntry;

    #[test]
    fn test_invalid_spec_is_rejected() {
        let mut spec = ExperimentSpec::default();
        spec.sweep.widths = vec![];
        let err = Experiment::from_spec(spec).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfig(ValidationError::EmptyWidths)
        ));
    }

    #[test]
    fn test_merge_with_previous_only_when_resuming() {
        let dir = tempfile::tempdir().unwrap();
        let entry = |width| SweepEntry {
            width,
            num_parameters: 1,
            train_error: 0.0,
            test_error: 50.0,
        };
        let previous = SweepResult {
            entries: vec![entry(2)],
            failures: vec![],
        };
        previous.save(dir.path().join(SWEEP_RESULT_FILE)).unwrap();

        let fresh = SweepResult {
            entries: vec![entry(10)],
            failures: vec![],
        };
        let merged = merge_with_previous(dir.path(), 1, fresh.clone()).unwrap();
        assert_eq!(merged.widths(), vec![2, 10]);
        let restarted = merge_with_previous(dir.path(), 0, fresh).unwrap();
        assert_eq!(restarted.widths(), vec![10]);
    }
}
