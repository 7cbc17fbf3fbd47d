//! Non-maximum suppression ranked by category specificity

use cbs_core::CategoryHierarchy;

use crate::bbox::BBox;
use crate::error::FilterError;
use crate::traits::NonMaxSuppression;
use crate::Result;

/// Greedy NMS where rank comes from hierarchy height instead of confidence.
///
/// Finer classes (lower height) are visited first and suppress overlapping
/// boxes of the same or coarser classes. A box is never suppressed by a class
/// coarser than its own.
#[derive(Debug, Clone, Copy)]
pub struct HierarchyNms<'h> {
    hierarchy: &'h CategoryHierarchy,
    threshold: f64,
}

impl<'h> HierarchyNms<'h> {
    pub fn new(hierarchy: &'h CategoryHierarchy, threshold: f64) -> Self {
        Self {
            hierarchy,
            threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl NonMaxSuppression for HierarchyNms<'_> {
    fn suppress(&self, boxes: &[BBox], class_names: &[String]) -> Result<Vec<usize>> {
        if boxes.len() != class_names.len() {
            return Err(FilterError::BoxLabelMismatch {
                boxes: boxes.len(),
                class_names: class_names.len(),
            });
        }

        let heights = class_names
            .iter()
            .map(|name| self.hierarchy.height_of(name))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        // Stable, so equal heights keep their input order
        let mut order: Vec<usize> = (0..boxes.len()).collect();
        order.sort_by_key(|&i| heights[i]);

        let mut keep = Vec::with_capacity(order.len());

        while let Some((&current, rest)) = order.split_first() {
            keep.push(current);

            order = rest
                .iter()
                .copied()
                .filter(|&j| {
                    heights[j] < heights[current]
                        || boxes[current].iou(&boxes[j]) <= self.threshold
                })
                .collect();
        }

        Ok(keep)
    }
}
