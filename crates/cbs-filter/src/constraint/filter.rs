//! Constraint filter: detections in, constraint labels out

use cbs_core::{CategoryHierarchy, TaxonomyNode};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

use super::config::{FilterConfig, FilterTables};
use crate::bbox::{BBox, DetectionBatch};
use crate::traits::NonMaxSuppression;
use crate::utils::HierarchyNms;
use crate::Result;

/// Distinct normalized constraint labels, at most `topk` of them
pub type Constraints = BTreeSet<String>;

/// Selects constraint labels from detections using the category hierarchy.
///
/// Immutable after construction; share it across threads freely.
#[derive(Debug, Clone)]
pub struct ConstraintFilter {
    hierarchy: Arc<CategoryHierarchy>,
    config: FilterConfig,
    tables: FilterTables,
}

impl ConstraintFilter {
    /// Create a filter over an existing hierarchy with the default tables
    pub fn new(hierarchy: Arc<CategoryHierarchy>, config: FilterConfig) -> Result<Self> {
        Self::with_tables(hierarchy, config, FilterTables::default())
    }

    pub fn with_tables(
        hierarchy: Arc<CategoryHierarchy>,
        config: FilterConfig,
        tables: FilterTables,
    ) -> Result<Self> {
        config.validate()?;

        if hierarchy.match_mode() != config.label_match {
            warn!(
                hierarchy = ?hierarchy.match_mode(),
                config = ?config.label_match,
                "hierarchy label matching differs from configuration, using the hierarchy's"
            );
        }

        Ok(Self {
            hierarchy,
            config,
            tables,
        })
    }

    /// Build the hierarchy from a description, pruned with the default blacklist
    pub fn from_taxonomy(taxonomy: &TaxonomyNode, config: FilterConfig) -> Result<Self> {
        let tables = FilterTables::default();
        let hierarchy =
            CategoryHierarchy::build_with_match(taxonomy, &tables.blacklist, config.label_match)?;

        Self::with_tables(Arc::new(hierarchy), config, tables)
    }

    pub fn hierarchy(&self) -> &CategoryHierarchy {
        &self.hierarchy
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn tables(&self) -> &FilterTables {
        &self.tables
    }

    /// Select constraints from parallel boxes, class names and scores
    pub fn filter<S: AsRef<str>>(
        &self,
        boxes: &[BBox],
        class_names: &[S],
        scores: &[f64],
    ) -> Result<Constraints> {
        let batch = DetectionBatch::new(
            boxes.to_vec(),
            class_names.iter().map(|name| name.as_ref().to_string()).collect(),
            scores.to_vec(),
        )?;

        self.filter_batch(&batch)
    }

    pub fn filter_batch(&self, batch: &DetectionBatch) -> Result<Constraints> {
        batch.validate()?;

        // Padding boxes and blacklisted classes never become constraints
        let valid = batch.retain_valid(&self.tables.blacklist);

        let nms = HierarchyNms::new(&self.hierarchy, self.config.nms_threshold);
        let mut ranked = nms.suppress(&valid.boxes, &valid.class_names)?;

        // Descending score; stable, so ties keep NMS order (finer classes first)
        ranked.sort_by(|&a, &b| valid.scores[b].total_cmp(&valid.scores[a]));
        ranked.truncate(self.config.topk);

        let constraints: Constraints = ranked
            .iter()
            .map(|&i| self.normalize(&valid.class_names[i]))
            .collect();

        debug!(
            detections = batch.len(),
            valid = valid.len(),
            constraints = ?constraints,
            "selected constraints"
        );

        Ok(constraints)
    }

    /// Filter many independent batches; results follow input order
    #[cfg(feature = "parallel")]
    pub fn filter_many(&self, batches: &[DetectionBatch]) -> Vec<Result<Constraints>> {
        use rayon::prelude::*;
        batches
            .par_iter()
            .map(|batch| self.filter_batch(batch))
            .collect()
    }

    /// Filter many independent batches; results follow input order
    #[cfg(not(feature = "parallel"))]
    pub fn filter_many(&self, batches: &[DetectionBatch]) -> Vec<Result<Constraints>> {
        batches.iter().map(|batch| self.filter_batch(batch)).collect()
    }

    fn normalize(&self, class_name: &str) -> String {
        let label = if self.config.lowercase {
            class_name.to_lowercase()
        } else {
            class_name.to_string()
        };

        self.tables.replacements.apply(&label).to_string()
    }
}
