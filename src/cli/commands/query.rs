//! Query command implementation

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::artifact::{ArtifactIndex, Selection, MANIFEST_FILE};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::cli::{OutputFormat, QueryArgs};

/// Files of one sample matched by one selection
#[derive(Debug, Serialize)]
struct SampleFiles {
    selection: String,
    widths: Vec<usize>,
    paths: Vec<PathBuf>,
}

fn load_index(args: &QueryArgs) -> Result<ArtifactIndex, String> {
    let index = if args.manifest {
        ArtifactIndex::from_manifest(args.root.join(MANIFEST_FILE))
    } else {
        ArtifactIndex::scan(&args.root)
    };
    index.map_err(|e| format!("Index error: {e}"))
}

fn sample_files(
    index: &ArtifactIndex,
    sample: usize,
    selections: &[Selection],
) -> Vec<SampleFiles> {
    selections
        .iter()
        .map(|selection| {
            let files = index.files_for_sample(sample, selection.bucket, &[selection.widths]);
            SampleFiles {
                selection: selection.to_string(),
                widths: files.iter().map(|e| e.name.width).collect(),
                paths: files.iter().map(|e| e.path.clone()).collect(),
            }
        })
        .collect()
}

/// Format matching sample positions as text
pub fn format_samples(selections: &[Selection], samples: &BTreeSet<usize>) -> String {
    let query: Vec<String> = selections.iter().map(ToString::to_string).collect();
    let mut lines = vec![format!("{} samples match {}", samples.len(), query.join(" & "))];
    if !samples.is_empty() {
        let listed: Vec<String> = samples.iter().map(ToString::to_string).collect();
        lines.push(format!("  {}", listed.join(", ")));
    }
    lines.join("\n")
}

pub fn run_query(args: QueryArgs, level: LogLevel) -> Result<(), String> {
    let index = load_index(&args)?;
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "Indexed {} artifact files under {}",
            index.len(),
            args.root.display()
        ),
    );

    if let Some(sample) = args.sample {
        let files = sample_files(&index, sample, &args.selections);
        match args.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&files)
                    .map_err(|e| format!("JSON error: {e}"))?;
                println!("{json}");
            }
            OutputFormat::Text => {
                for group in &files {
                    log(
                        level,
                        LogLevel::Normal,
                        &format!("Sample {sample} in {}:", group.selection),
                    );
                    for path in &group.paths {
                        log(level, LogLevel::Normal, &format!("  {}", path.display()));
                    }
                }
            }
        }
        return Ok(());
    }

    let samples = index.intersect(&args.selections);
    match args.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&samples).map_err(|e| format!("JSON error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Text => {
            log(
                level,
                LogLevel::Normal,
                &format_samples(&args.selections, &samples),
            );
        }
    }
    Ok(())
}
