//! Category hierarchy for constrained caption decoding
//!
//! Builds an immutable taxonomy tree from a nested category description and
//! answers "how specific is this class" queries for hierarchy-aware NMS.

pub mod error;
pub mod hierarchy;
pub mod tables;
pub mod words;

pub use error::HierarchyError;
pub use hierarchy::{CategoryHierarchy, CategoryNode, LabelMatch, TaxonomyNode};
pub use tables::{Blacklist, Replacements, BLACKLIST, REPLACEMENTS};
pub use words::ConstraintWords;

pub type Result<T> = std::result::Result<T, HierarchyError>;
