use serde::{Deserialize, Serialize};

/// A box decoded from one grid cell and anchor, in grid-relative normalized units.
///
/// `class_probs` are squashed independently per class and need not sum to one.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedBox {
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
    pub confidence: f32,
    pub class_probs: Vec<f32>,
}

impl DecodedBox {
    /// Returns the box geometry as `(cx, cy, w, h)`.
    pub fn cxcy_wh(&self) -> (f32, f32, f32, f32) {
        (self.center_x, self.center_y, self.width, self.height)
    }

    /// Index of the most probable class, ties resolved towards the lowest index.
    pub fn best_class(&self) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (i, &p) in self.class_probs.iter().enumerate() {
            match best {
                Some((_, bp)) if p <= bp => {}
                Some(_) if p.is_nan() => {}
                _ => best = Some((i, p)),
            }
        }
        best
    }
}
