//! Constraint selection from object detections
//!
//! Turns a noisy batch of detections into a short list of class labels for
//! constrained beam search, using the category hierarchy to prefer specific
//! classes over generic ones.

pub mod bbox;
pub mod constraint;
pub mod error;
pub mod utils;

// Re-export commonly used types
pub use bbox::{BBox, DetectionBatch};
pub use constraint::{ConstraintFilter, Constraints, FilterConfig, FilterTables};
pub use error::FilterError;
pub use utils::HierarchyNms;

pub type Result<T> = std::result::Result<T, FilterError>;

/// Core traits for constraint selection
pub mod traits {
    use super::*;

    /// Trait for non-maximum suppression implementations
    pub trait NonMaxSuppression {
        /// Indices of the boxes that survive, in the order they were kept
        fn suppress(&self, boxes: &[BBox], class_names: &[String]) -> Result<Vec<usize>>;
    }
}
