//! Sidecar JSON-lines record of every filed artifact

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::naming::{ArtifactName, Bucket};
use crate::error::Result;

/// Manifest file name under the artifact root
pub const MANIFEST_FILE: &str = "manifest.jsonl";

/// One filed artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// File name shared by every bucket copy
    pub file_name: String,
    /// Buckets the file was written to
    pub buckets: Vec<Bucket>,
    /// Parsed name fields
    #[serde(flatten)]
    pub name: ArtifactName,
    /// When the artifact was written
    pub created_at: DateTime<Utc>,
}

impl ManifestEntry {
    /// Entry for `name` written to `buckets` now
    pub fn new(name: ArtifactName, buckets: Vec<Bucket>) -> Self {
        Self {
            file_name: name.file_name(),
            buckets,
            name,
            created_at: Utc::now(),
        }
    }
}

/// Append-only manifest
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
}

impl Manifest {
    /// Manifest at `<root>/manifest.jsonl`
    pub fn in_root(root: impl AsRef<Path>) -> Self {
        Self {
            path: root.as_ref().join(MANIFEST_FILE),
        }
    }

    /// Manifest file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry as a JSON line
    pub fn append(&self, entry: &ManifestEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(entry)?)?;
        Ok(())
    }

    /// Read every entry; blank lines are skipped
    pub fn read(&self) -> Result<Vec<ManifestEntry>> {
        read_manifest(&self.path)
    }
}

/// Read a manifest file
pub fn read_manifest(path: impl AsRef<Path>) -> Result<Vec<ManifestEntry>> {
    let content = fs::read_to_string(path)?;
    let mut entries = Vec::new();
    for line in content.lines().filter(|line| !line.trim().is_empty()) {
        entries.push(serde_json::from_str(line)?);
    }
    Ok(entries)
}
