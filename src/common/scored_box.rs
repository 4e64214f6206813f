use serde::{Deserialize, Serialize};
use crate::common::CornerBox;
use crate::detection_runners::grid_detector::nms::Nms;

/// A corner box tagged with its best class and `score = confidence * class_prob`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredBox {
    pub bbox: CornerBox,
    pub class_index: usize,
    pub score: f32,
}

impl ScoredBox {
    pub fn new(bbox: CornerBox, class_index: usize, score: f32) -> Self {
        Self { bbox, class_index, score }
    }
}

impl Nms for ScoredBox {
    fn iou(&self, other: &Self) -> f32 {
        self.bbox.iou(&other.bbox)
    }

    fn score(&self) -> f32 {
        self.score
    }
}
