//! Constraint selection configuration

use anyhow::Context;
use cbs_core::{Blacklist, LabelMatch, Replacements};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::FilterError;
use crate::Result;

/// Main filter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// IoU above which a coarser class is suppressed by a finer one
    pub nms_threshold: f64,
    /// Maximum number of constraints per batch
    pub topk: usize,
    /// Lookup mode used when the filter builds its own hierarchy
    pub label_match: LabelMatch,
    /// Lowercase labels before replacement
    pub lowercase: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            nms_threshold: 0.85,
            topk: 3,
            label_match: LabelMatch::Substring,
            lowercase: true,
        }
    }
}

impl FilterConfig {
    /// Configuration keeping only the single most confident constraint
    pub fn single_constraint() -> Self {
        Self {
            topk: 1,
            ..Default::default()
        }
    }

    /// Configuration matching labels exactly instead of by substring
    pub fn exact_match() -> Self {
        Self {
            label_match: LabelMatch::Exact,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.nms_threshold.is_finite() || !(0.0..=1.0).contains(&self.nms_threshold) {
            return Err(FilterError::InvalidConfig {
                field: "nms_threshold".to_string(),
                value: self.nms_threshold.to_string(),
            });
        }

        if self.topk == 0 {
            return Err(FilterError::InvalidConfig {
                field: "topk".to_string(),
                value: self.topk.to_string(),
            });
        }

        Ok(())
    }

    /// Load a JSON configuration file; missing fields take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {:?}", path))?;

        Ok(config)
    }
}

/// Fixed label tables injected into the filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterTables {
    pub blacklist: Blacklist,
    pub replacements: Replacements,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FilterConfig::default();
        assert_eq!(config.nms_threshold, 0.85);
        assert_eq!(config.topk, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: FilterConfig = serde_json::from_str(r#"{"topk": 5, "label_match": "exact"}"#).unwrap();
        assert_eq!(config.topk, 5);
        assert_eq!(config.label_match, LabelMatch::Exact);
        assert_eq!(config.nms_threshold, 0.85);
    }

    #[test]
    fn test_invalid_values() {
        let config = FilterConfig {
            topk: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FilterError::InvalidConfig { ref field, .. }) if field == "topk"
        ));

        let config = FilterConfig {
            nms_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = FilterConfig {
            nms_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
