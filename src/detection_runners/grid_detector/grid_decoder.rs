use ndarray::{ArrayView1, Axis};
use rayon::prelude::*;
use crate::common::{Anchor, DecodedBox, DetectError, RawOutput, BOX_ATTRS};

#[inline]
pub fn sigmoid(x: f32) -> f32 {
    1. / (1. + (-x).exp())
}

/// Checks the tensor against the declared anchors and class count.
pub fn check_shape(raw: &RawOutput, anchors: &[Anchor], num_classes: usize) -> Result<(), DetectError> {
    if raw.attrs() != BOX_ATTRS + num_classes {
        return Err(DetectError::shape(format!(
            "last axis holds {} values, expected {} (5 + {} classes)",
            raw.attrs(),
            BOX_ATTRS + num_classes,
            num_classes
        )));
    }
    if raw.num_anchors() != anchors.len() {
        return Err(DetectError::shape(format!(
            "tensor carries {} anchors per cell but {} anchors are configured",
            raw.num_anchors(),
            anchors.len()
        )));
    }
    Ok(())
}

/// Decodes one anchor's prediction `[tx, ty, tw, th, obj, logits..]` in cell `(row, col)`.
fn decode_cell(
    preds: ArrayView1<f32>,
    row: usize,
    col: usize,
    anchor: &Anchor,
    grid_width: f32,
    grid_height: f32,
) -> DecodedBox {
    DecodedBox {
        center_x: (sigmoid(preds[0]) + col as f32) / grid_width,
        center_y: (sigmoid(preds[1]) + row as f32) / grid_height,
        width: anchor.width * preds[2].exp() / grid_width,
        height: anchor.height * preds[3].exp() / grid_height,
        confidence: sigmoid(preds[4]),
        // independent per-class squashing, no softmax across classes
        class_probs: preds
            .iter()
            .skip(BOX_ATTRS)
            .map(|&logit| sigmoid(logit))
            .collect(),
    }
}

/// Turns a raw output tensor into one [`DecodedBox`] per `(row, col, anchor)`,
/// in row-major order.
pub fn decode(raw: &RawOutput, anchors: &[Anchor], num_classes: usize) -> Result<Vec<DecodedBox>, DetectError> {
    check_shape(raw, anchors, num_classes)?;

    let view = raw.view();
    let grid_width = raw.grid_width() as f32;
    let grid_height = raw.grid_height() as f32;

    let rows: Vec<Vec<DecodedBox>> = view
        .axis_iter(Axis(0))
        .into_par_iter()
        .enumerate()
        .map(|(row, cells)| {
            let mut boxes = Vec::with_capacity(cells.len_of(Axis(0)) * anchors.len());
            for (col, cell) in cells.axis_iter(Axis(0)).enumerate() {
                for (anchor, preds) in anchors.iter().zip(cell.axis_iter(Axis(0))) {
                    boxes.push(decode_cell(preds, row, col, anchor, grid_width, grid_height));
                }
            }
            boxes
        })
        .collect();

    Ok(rows.into_iter().flatten().collect())
}
