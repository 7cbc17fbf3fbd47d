use cbs_core::HierarchyError;
use thiserror::Error;

/// Errors returned by constraint selection
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("dimension mismatch: {boxes} boxes, {class_names} class names, {scores} scores")]
    DimensionMismatch {
        boxes: usize,
        class_names: usize,
        scores: usize,
    },

    #[error("dimension mismatch: {boxes} boxes, {class_names} class names")]
    BoxLabelMismatch { boxes: usize, class_names: usize },

    #[error("invalid configuration value: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}
