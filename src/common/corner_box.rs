use serde::{Deserialize, Serialize};

/// Union areas below this are treated as empty when computing IoU.
pub const AREA_EPSILON: f32 = 1e-9;

/// Corner-form box `(top, left, bottom, right)`.
///
/// Normalized (`0..1`) straight out of the coordinate mapper, absolute pixels once scaled.
/// A box with `top > bottom` or `left > right` is treated as having zero area.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize, PartialOrd)]
pub struct CornerBox {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl CornerBox {
    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self { top, left, bottom, right }
    }

    /// Builds a corner box from `(cx, cy, w, h)`.
    pub fn from_cxcy_wh(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self {
            top: cy - h / 2.,
            left: cx - w / 2.,
            bottom: cy + h / 2.,
            right: cx + w / 2.,
        }
    }

    /// Returns the width of the box, zero for inverted boxes.
    pub fn width(&self) -> f32 {
        (self.right - self.left).max(0.)
    }

    /// Returns the height of the box, zero for inverted boxes.
    pub fn height(&self) -> f32 {
        (self.bottom - self.top).max(0.)
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Computes the intersection area between this box and another.
    pub fn intersect(&self, other: &CornerBox) -> f32 {
        if self.area() <= 0. || other.area() <= 0. {
            return 0.;
        }
        let top = self.top.max(other.top);
        let left = self.left.max(other.left);
        let bottom = self.bottom.min(other.bottom);
        let right = self.right.min(other.right);
        (bottom - top).max(0.) * (right - left).max(0.)
    }

    /// Computes the union area between this box and another.
    pub fn union(&self, other: &CornerBox) -> f32 {
        self.area() + other.area() - self.intersect(other)
    }

    /// Intersection over union, `0.0` whenever the union is (near) empty.
    pub fn iou(&self, other: &CornerBox) -> f32 {
        let union = self.union(other);
        if !(union >= AREA_EPSILON) {
            return 0.;
        }
        self.intersect(other) / union
    }

    /// Multiplies the vertical fields by `height` and the horizontal fields by `width`.
    pub fn scale(&self, width: f32, height: f32) -> Self {
        Self {
            top: self.top * height,
            left: self.left * width,
            bottom: self.bottom * height,
            right: self.right * width,
        }
    }

    /// Clamps the box into `[0, width] x [0, height]`, restoring `top <= bottom` and `left <= right`.
    pub fn clamp(&self, width: f32, height: f32) -> Self {
        let top = self.top.clamp(0., height);
        let left = self.left.clamp(0., width);
        Self {
            top,
            left,
            bottom: self.bottom.clamp(0., height).max(top),
            right: self.right.clamp(0., width).max(left),
        }
    }

    /// Returns the box as `(x, y, w, h)` with `(x, y)` the top-left corner.
    pub fn xy_wh(&self) -> (f32, f32, f32, f32) {
        (self.left, self.top, self.right - self.left, self.bottom - self.top)
    }
}
