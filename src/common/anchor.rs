use serde::{Deserialize, Serialize};
use crate::common::DetectError;

/// YOLOv2 COCO anchor priors, in grid-cell units.
pub const YOLO_V2_COCO_ANCHORS: [(f32, f32); 5] = [
    (0.57273, 0.677385),
    (1.87446, 2.06253),
    (3.33843, 5.47434),
    (7.88282, 3.52778),
    (9.77052, 9.16828),
];

/// A fixed reference box shape `(width, height)` in grid-cell units.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub width: f32,
    pub height: f32,
}

impl Anchor {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Builds anchors from the flat `[w0, h0, w1, h1, ...]` form found in model configs.
    pub fn from_flat(values: &[f32]) -> Result<Vec<Anchor>, DetectError> {
        if values.len() % 2 != 0 {
            return Err(DetectError::shape(format!(
                "flat anchor list must hold (width, height) pairs, got {} values",
                values.len()
            )));
        }

        Ok(values
            .chunks_exact(2)
            .map(|pair| Anchor::new(pair[0], pair[1]))
            .collect())
    }

    pub fn yolo_v2_coco() -> Vec<Anchor> {
        YOLO_V2_COCO_ANCHORS
            .iter()
            .map(|&(w, h)| Anchor::new(w, h))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0. && self.height > 0.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_anchor_pairs() {
        let anchors = Anchor::from_flat(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(anchors, vec![Anchor::new(1.0, 2.0), Anchor::new(3.0, 4.0)]);
    }

    #[test]
    fn odd_flat_anchor_list_is_a_shape_error() {
        assert!(matches!(
            Anchor::from_flat(&[1.0, 2.0, 3.0]),
            Err(DetectError::Shape(_))
        ));
    }
}
