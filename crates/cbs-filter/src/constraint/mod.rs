//! High-level constraint selection

pub mod config;
pub mod filter;

pub use config::{FilterConfig, FilterTables};
pub use filter::{ConstraintFilter, Constraints};
