//! Detection file parsing and per-batch report output

use anyhow::{Context, Result};
use cbs_core::ConstraintWords;
use cbs_filter::{Constraints, DetectionBatch};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DetectionsFile {
    Many(Vec<DetectionBatch>),
    One(DetectionBatch),
}

/// Load every detection batch from a JSON file
pub fn load_batches(path: &Path) -> Result<Vec<DetectionBatch>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read detections file: {:?}", path))?;

    parse_batches(&json).with_context(|| format!("Failed to parse detections file: {:?}", path))
}

fn parse_batches(json: &str) -> Result<Vec<DetectionBatch>> {
    let batches = match serde_json::from_str(json)? {
        DetectionsFile::Many(batches) => batches,
        DetectionsFile::One(batch) => vec![batch],
    };

    for (index, batch) in batches.iter().enumerate() {
        batch
            .validate()
            .with_context(|| format!("Invalid detection batch {}", index))?;
    }

    Ok(batches)
}

/// Constraints selected for one batch, with their word forms when known
#[derive(Debug, Serialize, PartialEq)]
pub struct ConstraintReport {
    pub constraints: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub words: BTreeMap<String, Vec<String>>,
}

impl ConstraintReport {
    pub fn new(constraints: Constraints, words: Option<&ConstraintWords>) -> Self {
        let words = words
            .map(|words| {
                constraints
                    .iter()
                    .filter_map(|label| {
                        words
                            .words_for(label)
                            .map(|forms| (label.clone(), forms.to_vec()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            constraints: constraints.into_iter().collect(),
            words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_batch() {
        let json = r#"{"boxes": [[0, 0, 10, 10]], "class_names": ["dog"], "scores": [0.9]}"#;
        let batches = parse_batches(json).unwrap();

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].class_names, ["dog"]);
    }

    #[test]
    fn test_parse_batch_array() {
        let json = r#"[
            {"boxes": [], "class_names": [], "scores": []},
            {"boxes": [[0, 0, 1, 1]], "class_names": ["cat"], "scores": [0.2]}
        ]"#;
        let batches = parse_batches(json).unwrap();

        assert_eq!(batches.len(), 2);
        assert!(batches[0].is_empty());
    }

    #[test]
    fn test_mismatched_batch_rejected() {
        let json = r#"{"boxes": [[0, 0, 10, 10]], "class_names": [], "scores": [0.9]}"#;
        let err = parse_batches(json).unwrap_err();

        assert!(err.to_string().contains("batch 0"));
    }

    #[test]
    fn test_report_words() {
        let words = ConstraintWords::from_reader("dog\tdog,dogs\n".as_bytes()).unwrap();
        let constraints: Constraints = ["cat".to_string(), "dog".to_string()].into();

        let report = ConstraintReport::new(constraints, Some(&words));
        assert_eq!(report.constraints, ["cat", "dog"]);
        assert_eq!(report.words.len(), 1);
        assert_eq!(report.words["dog"], ["dog", "dogs"]);
    }
}
