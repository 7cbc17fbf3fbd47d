use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::HierarchyError;

/// Nested category description as shipped with the Open Images hierarchy file.
///
/// Only the label and the `Subcategory` children are read; other keys such as
/// `Part` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyNode {
    #[serde(rename = "LabelName")]
    pub label: String,
    #[serde(rename = "Subcategory", default, skip_serializing_if = "Vec::is_empty")]
    pub subcategory: Vec<TaxonomyNode>,
}

impl TaxonomyNode {
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            subcategory: Vec::new(),
        }
    }

    pub fn with_children(label: impl Into<String>, children: Vec<TaxonomyNode>) -> Self {
        Self {
            label: label.into(),
            subcategory: children,
        }
    }

    /// Parse a description from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, HierarchyError> {
        serde_json::from_str(json).map_err(|e| HierarchyError::MalformedTaxonomy(e.to_string()))
    }

    /// Read and parse a hierarchy JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read taxonomy file: {:?}", path))?;

        Self::from_json_str(&json)
            .with_context(|| format!("Failed to parse taxonomy file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_open_images_layout() {
        let json = r#"{
            "LabelName": "entity",
            "Subcategory": [
                {"LabelName": "animal", "Subcategory": [{"LabelName": "dog"}]},
                {"LabelName": "toy", "Part": [{"LabelName": "wheel"}]}
            ]
        }"#;

        let node = TaxonomyNode::from_json_str(json).unwrap();
        assert_eq!(node.label, "entity");
        assert_eq!(node.subcategory.len(), 2);
        assert_eq!(node.subcategory[0].subcategory[0], TaxonomyNode::leaf("dog"));
        assert!(node.subcategory[1].subcategory.is_empty());
    }

    #[test]
    fn test_missing_label_is_malformed() {
        let json = r#"{"Subcategory": [{"LabelName": "dog"}]}"#;
        assert!(matches!(
            TaxonomyNode::from_json_str(json),
            Err(HierarchyError::MalformedTaxonomy(_))
        ));
    }

    #[test]
    fn test_wrong_children_type_is_malformed() {
        let json = r#"{"LabelName": "entity", "Subcategory": {"LabelName": "dog"}}"#;
        assert!(matches!(
            TaxonomyNode::from_json_str(json),
            Err(HierarchyError::MalformedTaxonomy(_))
        ));
    }
}
