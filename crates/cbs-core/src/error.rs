use thiserror::Error;

/// Failures raised while building or querying a [`crate::CategoryHierarchy`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("malformed taxonomy: {0}")]
    MalformedTaxonomy(String),

    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
}
