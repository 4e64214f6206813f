use crate::common::{CornerBox, DecodedBox, ScoredBox};

/// Scores each box by its best class and drops those under `min_score`.
///
/// `min_score` is a coarse pre-filter meant to shrink the candidate set before
/// suppression; keep it at or below the display threshold. Boxes with no class
/// probabilities are skipped. An empty result simply means no candidates.
pub fn filter(candidates: &[(DecodedBox, CornerBox)], min_score: f32) -> Vec<ScoredBox> {
    candidates
        .iter()
        .filter_map(|(decoded, corners)| {
            let (class_index, class_prob) = decoded.best_class()?;
            let score = decoded.confidence * class_prob;
            (score >= min_score).then(|| ScoredBox::new(*corners, class_index, score))
        })
        .collect()
}
