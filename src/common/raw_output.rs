use half::f16;
use ndarray::{Array4, ArrayD, ArrayView4};
use crate::common::DetectError;

/// Number of leading values per anchor before the class logits:
/// `tx, ty, tw, th, objectness`.
pub const BOX_ATTRS: usize = 5;

/// Raw detector output of shape `[grid_height, grid_width, num_anchors, 5 + num_classes]`.
///
/// The last axis is laid out as `[tx, ty, tw, th, objectness, class_logit_0 ..]`,
/// all values are un-normalized logits.
#[derive(Debug, Clone, PartialEq)]
pub struct RawOutput {
    data: Array4<f32>,
}

impl RawOutput {
    pub fn new(data: Array4<f32>) -> Self {
        Self { data }
    }

    /// Wraps a flat, row-major buffer with the declared `[gh, gw, na, attrs]` shape.
    pub fn from_shape_vec(shape: (usize, usize, usize, usize), values: Vec<f32>) -> Result<Self, DetectError> {
        let expected = shape.0 * shape.1 * shape.2 * shape.3;
        if values.len() != expected {
            return Err(DetectError::shape(format!(
                "buffer holds {} values but shape {:?} needs {}",
                values.len(), shape, expected
            )));
        }

        Array4::from_shape_vec(shape, values)
            .map(Self::new)
            .map_err(|e| DetectError::shape(e.to_string()))
    }

    /// Same as [`RawOutput::from_shape_vec`] for half-precision engine outputs.
    pub fn from_f16(shape: (usize, usize, usize, usize), values: &[f16]) -> Result<Self, DetectError> {
        Self::from_shape_vec(shape, values.iter().map(|v| v.to_f32()).collect())
    }

    /// Reshapes a typical engine output `[1, gh, gw, na * attrs]` (or `[gh, gw, na * attrs]`)
    /// into the four-axis layout, given the number of anchors.
    ///
    /// A four-axis `[1, x, num_anchors, y]` shape reads both as a batch of one and as a
    /// grid of height one, so it is rejected; build such tensors with [`RawOutput::new`].
    pub fn from_engine_output(output: &ArrayD<f32>, num_anchors: usize) -> Result<Self, DetectError> {
        let shape = output.shape();
        if let [1, _, na, _] = shape {
            if *na == num_anchors {
                return Err(DetectError::shape(format!(
                    "engine output of shape {:?} is ambiguous with {} anchors: batch-first or grid height 1",
                    shape, num_anchors
                )));
            }
        }
        let (gh, gw, cell) = match shape {
            [1, gh, gw, cell] => (*gh, *gw, *cell),
            [gh, gw, cell] => (*gh, *gw, *cell),
            [gh, gw, na, attrs] if *na == num_anchors => (*gh, *gw, na * attrs),
            _ => {
                return Err(DetectError::shape(format!(
                    "cannot interpret engine output of shape {:?} as a detection grid",
                    shape
                )))
            }
        };

        if num_anchors == 0 || cell % num_anchors != 0 {
            return Err(DetectError::shape(format!(
                "{} values per cell do not split evenly across {} anchors",
                cell, num_anchors
            )));
        }

        let values: Vec<f32> = output.iter().copied().collect();
        Self::from_shape_vec((gh, gw, num_anchors, cell / num_anchors), values)
    }

    pub fn view(&self) -> ArrayView4<'_, f32> {
        self.data.view()
    }

    pub fn grid_height(&self) -> usize {
        self.data.shape()[0]
    }

    pub fn grid_width(&self) -> usize {
        self.data.shape()[1]
    }

    pub fn num_anchors(&self) -> usize {
        self.data.shape()[2]
    }

    /// Length of the last axis, `5 + num_classes` for a well-formed tensor.
    pub fn attrs(&self) -> usize {
        self.data.shape()[3]
    }

    pub fn shape(&self) -> (usize, usize, usize, usize) {
        (self.grid_height(), self.grid_width(), self.num_anchors(), self.attrs())
    }
}

impl From<Array4<f32>> for RawOutput {
    fn from(data: Array4<f32>) -> Self {
        Self::new(data)
    }
}
