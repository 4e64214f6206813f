use crate::common::CornerBox;

pub trait Nms {
    fn iou(&self, other: &Self) -> f32;
    fn score(&self) -> f32;
}

/// Intersection over union of two corner boxes. Zero-area or inverted boxes yield `0.0`.
pub fn iou(a: &CornerBox, b: &CornerBox) -> f32 {
    a.iou(b)
}

/// Order in which boxes are visited: score descending, input index ascending on ties.
pub fn selection_order<T: Nms>(boxes: &[T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..boxes.len()).collect();
    // stable sort, equal scores keep their input order
    order.sort_by(|&a, &b| boxes[b].score().total_cmp(&boxes[a].score()));
    order
}

/// Greedy, class-agnostic non-maximum suppression.
///
/// Repeatedly keeps the best remaining box and drops every remaining box whose IoU with
/// it is strictly greater than `iou_threshold`, whatever its class. The result is a
/// subsequence of `boxes` in selection order.
pub fn suppress<T: Nms + Clone>(boxes: &[T], iou_threshold: f32) -> Vec<T> {
    let order = selection_order(boxes);
    let mut suppressed = vec![false; boxes.len()];
    let mut kept = Vec::new();

    for (pos, &i) in order.iter().enumerate() {
        if suppressed[i] {
            continue;
        }
        kept.push(boxes[i].clone());

        for &j in &order[(pos + 1)..] {
            if !suppressed[j] && boxes[i].iou(&boxes[j]) > iou_threshold {
                suppressed[j] = true;
            }
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ScoredBox;

    #[test]
    fn selection_order_breaks_ties_by_index() {
        let boxes = [
            ScoredBox::new(CornerBox::default(), 0, 0.5),
            ScoredBox::new(CornerBox::default(), 0, 0.9),
            ScoredBox::new(CornerBox::default(), 0, 0.5),
        ];
        assert_eq!(selection_order(&boxes), vec![1, 0, 2]);
    }
}
