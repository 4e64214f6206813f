use serde::{Deserialize, Serialize};
use crate::common::CornerBox;
use crate::detection_runners::grid_detector::nms::Nms;

/// Pixel rectangle `(x, y)` top-left plus size.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn to_corners(&self) -> CornerBox {
        CornerBox::new(self.y, self.x, self.y + self.height, self.x + self.width)
    }

    pub fn as_xy_wh_i32(&self) -> (i32, i32, i32, i32) {
        (self.x.round() as i32,
         self.y.round() as i32,
         self.width.round() as i32,
         self.height.round() as i32)
    }
}

impl From<CornerBox> for Rect {
    fn from(bbox: CornerBox) -> Self {
        let (x, y, width, height) = bbox.xy_wh();
        Self { x, y, width, height }
    }
}

/// Final labeled box handed to the rendering side.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_name: String,
    pub class_index: usize,
    pub probability: f32,
    pub rect: Rect,
}

impl Nms for Detection {
    fn iou(&self, other: &Self) -> f32 {
        self.rect.to_corners().iou(&other.rect.to_corners())
    }

    fn score(&self) -> f32 {
        self.probability
    }
}

impl Detection {
    pub fn new(class_name: &str, class_index: usize, probability: f32, rect: Rect) -> Self {
        Self {
            class_name: class_name.to_string(),
            class_index,
            probability,
            rect,
        }
    }

    /// Clamps the rectangle into an image of the given size.
    pub fn clamped(&self, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::from(self.rect.to_corners().clamp(width, height)),
            ..self.clone()
        }
    }
}

/// Display-side filter, distinct from the coarse pre-filter run inside the pipeline.
///
/// Keeps detections with `probability >= threshold` in their original order,
/// truncated to `max_detections` when given.
pub fn apply_display_threshold(detections: &[Detection], threshold: f32, max_detections: Option<usize>) -> Vec<Detection> {
    let kept = detections
        .iter()
        .filter(|d| d.probability >= threshold)
        .cloned();

    match max_detections {
        Some(max) => kept.take(max).collect(),
        None => kept.collect(),
    }
}
