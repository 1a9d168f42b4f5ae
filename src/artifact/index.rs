//! Cross-width queries over filed artifacts
//!
//! An [`ArtifactIndex`] is built either by scanning the bucket directories
//! (every file must follow the name grammar) or from the sidecar manifest.
//! Queries answer which test samples land in a bucket over a width range,
//! and intersect such sets across buckets to find samples whose correctness
//! changes with width.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::manifest::read_manifest;
use super::naming::{ArtifactName, Bucket};
use crate::error::{Error, Result};

/// Inclusive range of hidden widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidthRange {
    /// Smallest width
    pub min: usize,
    /// Largest width
    pub max: usize,
}

impl WidthRange {
    /// Range `min..=max`
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Whether `width` lies in the range
    pub fn contains(&self, width: usize) -> bool {
        (self.min..=self.max).contains(&width)
    }
}

impl fmt::Display for WidthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl FromStr for WidthRange {
    type Err = String;

    /// `50` or `2-22`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parse = |v: &str| {
            v.trim()
                .parse::<usize>()
                .map_err(|e| format!("Invalid width '{v}': {e}"))
        };
        let range = match s.split_once('-') {
            Some((min, max)) => WidthRange::new(parse(min)?, parse(max)?),
            None => {
                let width = parse(s)?;
                WidthRange::new(width, width)
            }
        };
        if range.min > range.max {
            return Err(format!("Empty width range: {s}"));
        }
        Ok(range)
    }
}

/// A bucket restricted to a width range, written `cp:2-22`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Bucket to look in
    pub bucket: Bucket,
    /// Widths to consider
    pub widths: WidthRange,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.bucket, self.widths)
    }
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (bucket, widths) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected BUCKET:MIN-MAX, got '{s}'"))?;
        Ok(Self {
            bucket: bucket.parse()?,
            widths: widths.parse()?,
        })
    }
}

/// One artifact file known to the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactEntry {
    /// Bucket holding the file
    pub bucket: Bucket,
    /// Parsed name
    pub name: ArtifactName,
    /// File location
    pub path: PathBuf,
}

/// Parsed view of the artifact buckets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactIndex {
    entries: Vec<ArtifactEntry>,
}

impl ArtifactIndex {
    /// Scan `CP`, `WP` and `ALL` under `root`
    ///
    /// Missing bucket directories count as empty and subdirectories are
    /// ignored. Any other file whose name does not follow the grammar is an
    /// error.
    pub fn scan(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let mut entries = Vec::new();

        for bucket in Bucket::ALL {
            let dir = root.join(bucket.dir_name());
            if !dir.is_dir() {
                debug!(dir = %dir.display(), "Bucket directory missing");
                continue;
            }

            let mut paths = Vec::new();
            for item in fs::read_dir(&dir)? {
                let item = item?;
                if item.file_type()?.is_dir() {
                    continue;
                }
                paths.push(item.path());
            }
            paths.sort();

            for path in paths {
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .and_then(ArtifactName::parse)
                    .ok_or_else(|| Error::MalformedArtifactName(path.clone()))?;
                entries.push(ArtifactEntry { bucket, name, path });
            }
        }

        Ok(Self { entries })
    }

    /// Build the index from the manifest at `path`
    ///
    /// File locations are resolved against the manifest's directory.
    pub fn from_manifest(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        let mut lines = read_manifest(path)?;
        // a later line for the same sample and width replaces earlier ones
        let mut seen = BTreeSet::new();
        lines.reverse();
        lines.retain(|e| seen.insert((e.name.sample_index, e.name.width)));
        lines.reverse();

        let mut entries = Vec::new();
        for entry in lines {
            for &bucket in &entry.buckets {
                entries.push(ArtifactEntry {
                    bucket,
                    name: entry.name,
                    path: root.join(bucket.dir_name()).join(&entry.file_name),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Every indexed file
    pub fn entries(&self) -> &[ArtifactEntry] {
        &self.entries
    }

    /// Number of indexed files
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was indexed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn matching(&self, selection: Selection) -> impl Iterator<Item = &ArtifactEntry> + '_ {
        self.entries
            .iter()
            .filter(move |e| {
                e.bucket == selection.bucket && selection.widths.contains(e.name.width)
            })
    }

    /// Test samples with an artifact in `bucket` at any width of `widths`
    pub fn samples(&self, bucket: Bucket, widths: WidthRange) -> BTreeSet<usize> {
        self.matching(Selection { bucket, widths })
            .map(|e| e.name.sample_index)
            .collect()
    }

    /// Samples present in every selection; empty for no selections
    pub fn intersect(&self, selections: &[Selection]) -> BTreeSet<usize> {
        let mut sets = selections.iter().map(|s| self.samples(s.bucket, s.widths));
        let Some(first) = sets.next() else {
            return BTreeSet::new();
        };
        sets.fold(first, |acc, set| acc.intersection(&set).copied().collect())
    }

    /// Samples predicted correctly at small widths, wrongly at medium widths
    /// and correctly again at large widths
    pub fn non_monotonic(
        &self,
        small: WidthRange,
        medium: WidthRange,
        large: WidthRange,
    ) -> BTreeSet<usize> {
        self.intersect(&[
            Selection {
                bucket: Bucket::Correct,
                widths: small,
            },
            Selection {
                bucket: Bucket::Wrong,
                widths: medium,
            },
            Selection {
                bucket: Bucket::Correct,
                widths: large,
            },
        ])
    }

    /// Files of `sample` in `bucket` within any of `ranges`, by ascending width
    pub fn files_for_sample(
        &self,
        sample: usize,
        bucket: Bucket,
        ranges: &[WidthRange],
    ) -> Vec<&ArtifactEntry> {
        let mut files: Vec<&ArtifactEntry> = self
            .entries
            .iter()
            .filter(|e| {
                e.bucket == bucket
                    && e.name.sample_index == sample
                    && ranges.iter().any(|r| r.contains(e.name.width))
            })
            .collect();
        files.sort_by_key(|e| e.name.width);
        files
    }
}
