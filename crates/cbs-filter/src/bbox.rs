//! Bounding boxes and detection batches
//!
//! Boxes use inclusive integer-like pixel bounds, so a box spanning
//! `x1..=x2` is `x2 - x1 + 1` pixels wide.

use cbs_core::Blacklist;
use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::Result;

/// Axis-aligned box as `(x1, y1, x2, y2)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Area with the +1 pixel convention, never zero for a point box
    pub fn area(&self) -> f64 {
        (self.x2 - self.x1 + 1.0) * (self.y2 - self.y1 + 1.0)
    }

    /// Overlap area, each axis clamped at zero before multiplying
    pub fn intersection(&self, other: &BBox) -> f64 {
        let xx1 = self.x1.max(other.x1);
        let yy1 = self.y1.max(other.y1);
        let xx2 = self.x2.min(other.x2);
        let yy2 = self.y2.min(other.y2);

        (xx2 - xx1 + 1.0).max(0.0) * (yy2 - yy1 + 1.0).max(0.0)
    }

    /// Calculate intersection over union (IoU) with another box
    pub fn iou(&self, other: &BBox) -> f64 {
        let intersection = self.intersection(other);
        let union = self.area() + other.area() - intersection;

        intersection / union
    }
}

impl From<[f64; 4]> for BBox {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl From<BBox> for [f64; 4] {
    fn from(bbox: BBox) -> Self {
        [bbox.x1, bbox.y1, bbox.x2, bbox.y2]
    }
}

/// Detector output for one image: parallel boxes, class names and scores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionBatch {
    pub boxes: Vec<BBox>,
    pub class_names: Vec<String>,
    pub scores: Vec<f64>,
}

impl DetectionBatch {
    pub fn new(boxes: Vec<BBox>, class_names: Vec<String>, scores: Vec<f64>) -> Result<Self> {
        let batch = Self {
            boxes,
            class_names,
            scores,
        };
        batch.validate()?;
        Ok(batch)
    }

    /// Check that the three sequences have the same length
    pub fn validate(&self) -> Result<()> {
        let n = self.boxes.len();
        if self.class_names.len() != n || self.scores.len() != n {
            return Err(FilterError::DimensionMismatch {
                boxes: n,
                class_names: self.class_names.len(),
                scores: self.scores.len(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Co-select the given indices, in the given order
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            boxes: indices.iter().map(|&i| self.boxes[i]).collect(),
            class_names: indices.iter().map(|&i| self.class_names[i].clone()).collect(),
            scores: indices.iter().map(|&i| self.scores[i]).collect(),
        }
    }

    /// Drop padding detections (score not above zero) and blacklisted classes
    pub fn retain_valid(&self, blacklist: &Blacklist) -> Self {
        let keep: Vec<usize> = (0..self.len())
            .filter(|&i| self.scores[i] > 0.0 && !blacklist.contains(&self.class_names[i]))
            .collect();

        self.select(&keep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_area_inclusive() {
        assert_eq!(BBox::new(0.0, 0.0, 10.0, 10.0).area(), 121.0);
        assert_eq!(BBox::new(5.0, 5.0, 5.0, 5.0).area(), 1.0);
    }

    #[test]
    fn test_bbox_iou() {
        let box1 = BBox::new(0.0, 0.0, 10.0, 10.0);
        let box2 = BBox::new(0.0, 0.0, 10.0, 9.0);

        assert_eq!(box1.intersection(&box2), 110.0);
        let iou = box1.iou(&box2);
        assert!((iou - 110.0 / 121.0).abs() < 1e-12);
        assert_eq!(box1.iou(&box1), 1.0);
    }

    #[test]
    fn test_disjoint_boxes() {
        let box1 = BBox::new(0.0, 0.0, 10.0, 10.0);
        let box2 = BBox::new(50.0, 50.0, 60.0, 60.0);

        assert_eq!(box1.intersection(&box2), 0.0);
        assert_eq!(box1.iou(&box2), 0.0);
    }

    #[test]
    fn test_batch_dimension_mismatch() {
        let result = DetectionBatch::new(
            vec![BBox::new(0.0, 0.0, 1.0, 1.0)],
            vec!["dog".to_string(), "cat".to_string()],
            vec![0.5],
        );

        assert_eq!(
            result,
            Err(FilterError::DimensionMismatch {
                boxes: 1,
                class_names: 2,
                scores: 1,
            })
        );
    }

    #[test]
    fn test_retain_valid() {
        let batch = DetectionBatch::new(
            vec![BBox::new(0.0, 0.0, 1.0, 1.0); 4],
            vec!["dog".into(), "person".into(), "cat".into(), "Human face".into()],
            vec![0.9, 0.8, 0.0, 0.7],
        )
        .unwrap();

        let kept = batch.retain_valid(&Blacklist::default());
        assert_eq!(kept.class_names, ["dog"]);
        assert_eq!(kept.scores, [0.9]);
    }

    #[test]
    fn test_batch_from_json() {
        let json = r#"{"boxes": [[0, 0, 10, 10]], "class_names": ["dog"], "scores": [0.9]}"#;
        let batch: DetectionBatch = serde_json::from_str(json).unwrap();

        assert_eq!(batch.boxes[0], BBox::new(0.0, 0.0, 10.0, 10.0));
        assert!(batch.validate().is_ok());
    }
}
