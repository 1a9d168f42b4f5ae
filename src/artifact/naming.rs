//! Outcome buckets and the artifact file-name grammar
//!
//! `<index>th_smpl_<true><pred>_<width>_nn.jpg`, e.g. `7th_smpl_33_50_nn.jpg`
//! for test sample 7, true class 3, predicted class 3, hidden width 50.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static ARTIFACT_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)th_smpl_(\d)(\d)_(\d+)_nn\.jpg$").expect("Invalid artifact name regex")
});

/// Directory an artifact is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bucket {
    /// Correct prediction
    #[serde(rename = "CP")]
    Correct,
    /// Wrong prediction
    #[serde(rename = "WP")]
    Wrong,
    /// Every artifact
    #[serde(rename = "ALL")]
    All,
}

impl Bucket {
    /// Every bucket, in directory order
    pub const ALL: [Bucket; 3] = [Bucket::Correct, Bucket::Wrong, Bucket::All];

    /// Directory name under the artifact root
    pub fn dir_name(self) -> &'static str {
        match self {
            Bucket::Correct => "CP",
            Bucket::Wrong => "WP",
            Bucket::All => "ALL",
        }
    }

    /// Outcome bucket for a prediction
    pub fn for_outcome(correct: bool) -> Self {
        if correct {
            Bucket::Correct
        } else {
            Bucket::Wrong
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cp" => Ok(Bucket::Correct),
            "wp" => Ok(Bucket::Wrong),
            "all" => Ok(Bucket::All),
            _ => Err(format!("Unknown bucket: {s}. Valid buckets: cp, wp, all")),
        }
    }
}

/// Fields encoded in an artifact file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtifactName {
    /// Position in the test split
    pub sample_index: usize,
    /// Ground-truth class, a single digit
    pub true_label: usize,
    /// Predicted class, a single digit
    pub predicted_label: usize,
    /// Hidden width of the model that produced it
    pub width: usize,
}

impl ArtifactName {
    /// Create a name, rejecting labels that do not fit one digit
    pub fn new(
        sample_index: usize,
        true_label: usize,
        predicted_label: usize,
        width: usize,
    ) -> Result<Self> {
        for label in [true_label, predicted_label] {
            if label > 9 {
                return Err(Error::LabelNotEncodable(label));
            }
        }
        Ok(Self {
            sample_index,
            true_label,
            predicted_label,
            width,
        })
    }

    /// Parse a file name; `None` if it does not follow the grammar
    pub fn parse(file_name: &str) -> Option<Self> {
        let caps = ARTIFACT_NAME_REGEX.captures(file_name)?;
        Some(Self {
            sample_index: caps[1].parse().ok()?,
            true_label: caps[2].parse().ok()?,
            predicted_label: caps[3].parse().ok()?,
            width: caps[4].parse().ok()?,
        })
    }

    /// File name for these fields
    pub fn file_name(&self) -> String {
        format!(
            "{}th_smpl_{}{}_{}_nn.jpg",
            self.sample_index, self.true_label, self.predicted_label, self.width
        )
    }

    /// Whether the prediction was correct
    pub fn is_correct(&self) -> bool {
        self.true_label == self.predicted_label
    }

    /// `CP` or `WP`
    pub fn outcome_bucket(&self) -> Bucket {
        Bucket::for_outcome(self.is_correct())
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_format() {
        let name = ArtifactName::new(7, 3, 3, 50).unwrap();
        assert_eq!(name.file_name(), "7th_smpl_33_50_nn.jpg");
        assert_eq!(name.outcome_bucket(), Bucket::Correct);
    }

    #[test]
    fn test_parse_fields() {
        let name = ArtifactName::parse("123th_smpl_49_900_nn.jpg").unwrap();
        assert_eq!(name, ArtifactName::new(123, 4, 9, 900).unwrap());
        assert_eq!(name.outcome_bucket(), Bucket::Wrong);
    }

    #[test]
    fn test_parse_rejects_other_names() {
        for bad in [
            "7th_smpl_33_50nn.jpg",
            "7th_smpl_333_50_nn.jpg",
            "7th_smpl_33_50_nn.png",
            "th_smpl_33_50_nn.jpg",
            ".DS_Store",
            "7th_smpl_33_50_nn.jpg.tmp",
        ] {
            assert!(ArtifactName::parse(bad).is_none(), "{bad}");
        }
    }

    #[test]
    fn test_two_digit_label_not_encodable() {
        assert!(matches!(
            ArtifactName::new(0, 10, 1, 2),
            Err(Error::LabelNotEncodable(10))
        ));
    }

    #[test]
    fn test_bucket_names() {
        assert_eq!("Cp".parse::<Bucket>(), Ok(Bucket::Correct));
        assert_eq!("ALL".parse::<Bucket>(), Ok(Bucket::All));
        assert!("xx".parse::<Bucket>().is_err());
        assert_eq!(Bucket::Wrong.to_string(), "WP");
        assert_eq!(serde_json::to_string(&Bucket::Wrong).unwrap(), "\"WP\"");
    }
}
