//! CLI command tests

use super::*;
use crate::cli::LogLevel;
use crate::artifact::{ArtifactIndex, Bucket, WidthRange};
use crate::config::cli::{GenerateArgs, OutputFormat, QueryArgs, SweepArgs, ValidateArgs};
use crate::data::{DatasetProvider, JsonDataset};
use crate::sweep::SweepResult;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write a small, fast experiment config
fn create_test_config(dir: &TempDir) -> PathBuf {
    let config_path = dir.path().join("experiment.yaml");
    let config = format!(
        r#"
data:
  signals:
    num_samples: 80
    train_split: 0.5
    seed: 3
  label_noise: null
training:
  batch_size: 20
  epochs: 2
  lr: 0.05
  eval_every: 1
  log_every: 1
sweep:
  widths: [2, 10]
  seed: 7
explain:
  batch_size: 4
  batch_index: 1
  background_size: 8
output:
  root: {}
  save_runs: true
  render:
    width: 160
    height: 120
"#,
        dir.path().join("results").display()
    );
    std::fs::write(&config_path, config).unwrap();
    config_path
}

fn sweep_args(config: PathBuf) -> SweepArgs {
    SweepArgs {
        config,
        output_dir: None,
        start_index: None,
        epochs: None,
        seed: None,
        no_explain: false,
        dry_run: false,
    }
}

fn results(dir: &TempDir) -> PathBuf {
    dir.path().join("results")
}

#[test]
fn test_validate_command_basic() {
    let dir = TempDir::new().unwrap();
    let args = ValidateArgs {
        config: create_test_config(&dir),
        detailed: false,
    };
    assert!(validate::run_validate(args, LogLevel::Quiet).is_ok());
}

#[test]
fn test_validate_command_detailed() {
    let dir = TempDir::new().unwrap();
    let args = ValidateArgs {
        config: create_test_config(&dir),
        detailed: true,
    };
    assert!(validate::run_validate(args, LogLevel::Normal).is_ok());
}

#[test]
fn test_validate_command_rejects_bad_widths() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "sweep:\n  widths: [10, 2]\n").unwrap();
    let err = validate::run_validate(
        ValidateArgs {
            config: path,
            detailed: false,
        },
        LogLevel::Quiet,
    )
    .unwrap_err();
    assert!(err.starts_with("Config error"));
}

#[test]
fn test_validate_command_missing_file() {
    let args = ValidateArgs {
        config: PathBuf::from("/nonexistent/experiment.yaml"),
        detailed: false,
    };
    assert!(validate::run_validate(args, LogLevel::Quiet).is_err());
}

#[test]
fn test_sweep_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut args = sweep_args(create_test_config(&dir));
    args.dry_run = true;
    sweep::run_sweep(args, LogLevel::Verbose).unwrap();
    assert!(!results(&dir).exists());
}

#[test]
fn test_sweep_rejects_out_of_range_start_index() {
    let dir = TempDir::new().unwrap();
    let mut args = sweep_args(create_test_config(&dir));
    args.start_index = Some(2);
    args.dry_run = true;
    assert!(sweep::run_sweep(args, LogLevel::Quiet).is_err());
}

#[test]
fn test_sweep_then_query() {
    let dir = TempDir::new().unwrap();
    sweep::run_sweep(sweep_args(create_test_config(&dir)), LogLevel::Quiet).unwrap();

    let root = results(&dir);
    let result = SweepResult::load(root.join("sweep_result.json")).unwrap();
    assert_eq!(result.widths(), vec![2, 10]);
    assert!(root.join("runs/width_2.json").is_file());
    assert!(root.join("manifest.jsonl").is_file());

    // 4 explained samples per width, each in ALL plus one outcome bucket
    let index = ArtifactIndex::scan(&root).unwrap();
    assert_eq!(index.len(), 16);
    assert_eq!(index.samples(Bucket::All, WidthRange::new(2, 10)).len(), 4);

    for manifest in [false, true] {
        let args = QueryArgs {
            root: root.clone(),
            selections: vec!["all:2-10".parse().unwrap()],
            sample: None,
            manifest,
            format: OutputFormat::Json,
        };
        assert!(query::run_query(args, LogLevel::Quiet).is_ok());
    }

    let args = QueryArgs {
        root,
        selections: vec!["all:2-2".parse().unwrap()],
        sample: Some(4),
        manifest: false,
        format: OutputFormat::Text,
    };
    assert!(query::run_query(args, LogLevel::Normal).is_ok());
}

#[test]
fn test_sweep_without_explain_files_nothing() {
    let dir = TempDir::new().unwrap();
    let mut args = sweep_args(create_test_config(&dir));
    args.no_explain = true;
    args.epochs = Some(1);
    sweep::run_sweep(args, LogLevel::Quiet).unwrap();
    assert!(results(&dir).join("sweep_result.json").is_file());
    assert!(!results(&dir).join("ALL").exists());
}

#[test]
fn test_query_missing_manifest_is_an_error() {
    let dir = TempDir::new().unwrap();
    let args = QueryArgs {
        root: dir.path().to_path_buf(),
        selections: vec!["cp:2-22".parse().unwrap()],
        sample: None,
        manifest: true,
        format: OutputFormat::Text,
    };
    assert!(query::run_query(args, LogLevel::Quiet).is_err());
}

#[test]
fn test_query_malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("CP")).unwrap();
    std::fs::write(dir.path().join("CP/notes.txt"), b"x").unwrap();
    let args = QueryArgs {
        root: dir.path().to_path_buf(),
        selections: vec!["cp:2-22".parse().unwrap()],
        sample: None,
        manifest: false,
        format: OutputFormat::Text,
    };
    let err = query::run_query(args, LogLevel::Quiet).unwrap_err();
    assert!(err.contains("notes.txt"));
}

#[test]
fn test_generate_with_overrides() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("data.json");
    let args = GenerateArgs {
        output: output.clone(),
        num_samples: Some(30),
        seed: Some(11),
        config: None,
    };
    generate::run_generate(args, LogLevel::Quiet).unwrap();

    let dataset = JsonDataset::new(&output, 10).provide().unwrap();
    assert_eq!(dataset.train().len() + dataset.test().len(), 30);
    assert_eq!(dataset.num_features(), 40);
}

#[test]
fn test_generate_signal_args_from_config() {
    let dir = TempDir::new().unwrap();
    let args = GenerateArgs {
        output: dir.path().join("data.json"),
        num_samples: None,
        seed: None,
        config: Some(create_test_config(&dir)),
    };
    let signals = generate::signal_args(&args).unwrap();
    assert_eq!(signals.num_samples, 80);
    assert_eq!(signals.seed, 3);
}

#[test]
fn test_log_level_directives() {
    assert_eq!(LogLevel::Quiet.directive(), "error");
    assert_eq!(LogLevel::Normal.directive(), "info");
    assert_eq!(LogLevel::Verbose.directive(), "debug");
}
