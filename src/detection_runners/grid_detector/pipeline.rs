use std::time::Instant;
use crate::common::{Anchor, CornerBox, DecodedBox, DetectError, Detection, ModelConfig, RawOutput, Rect, ScoredBox};
use crate::data::label_table;
use crate::detection_runners::grid_detector::{coordinate_mapper, grid_decoder, nms, score_filter};
use crate::utils;

/// Decode, map, filter and suppress in one call.
///
/// Returns every surviving box as a [`Detection`] in pixels of an
/// `image_width x image_height` image, best first. An empty vector means nothing was detected.
#[allow(clippy::too_many_arguments)]
pub fn run(
    raw: &RawOutput,
    anchors: &[Anchor],
    num_classes: usize,
    min_score: f32,
    iou_threshold: f32,
    image_width: u32,
    image_height: u32,
    class_names: &[String],
) -> Result<Vec<Detection>, DetectError> {
    let detect_time = Instant::now();
    let mut elapsed = detect_time.elapsed();

    let decoded = grid_decoder::decode(raw, anchors, num_classes)?;
    elapsed = utils::trace("Decode", detect_time, elapsed);

    let candidates: Vec<(DecodedBox, CornerBox)> = decoded
        .into_iter()
        .map(|bbox| {
            let corners = coordinate_mapper::to_corners(&bbox);
            let corners = coordinate_mapper::scale_to_image(corners, image_width as f32, image_height as f32);
            (bbox, corners)
        })
        .collect();
    elapsed = utils::trace("Map coordinates", detect_time, elapsed);

    let scored = score_filter::filter(&candidates, min_score);
    elapsed = utils::trace("Score filter", detect_time, elapsed);

    let kept = nms::suppress(&scored, iou_threshold);
    utils::trace("NMS", detect_time, elapsed);

    log::debug!(
        "Decoded {} boxes, {} passed the pre-filter, {} kept after NMS",
        candidates.len(),
        scored.len(),
        kept.len()
    );

    kept.iter()
        .map(|scored| label_box(scored, class_names))
        .collect()
}

fn label_box(scored: &ScoredBox, class_names: &[String]) -> Result<Detection, DetectError> {
    let class_name = class_names
        .get(scored.class_index)
        .ok_or(DetectError::Index {
            index: scored.class_index,
            len: class_names.len(),
        })?;

    Ok(Detection::new(class_name, scored.class_index, scored.score, Rect::from(scored.bbox)))
}

/// A configured pipeline holding anchors, label table and thresholds.
///
/// Holds no mutable state, a single instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct DetectionPipeline {
    anchors: Vec<Anchor>,
    class_names: Vec<String>,
    num_classes: usize,
    min_score: f32,
    iou_threshold: f32,
}

impl DetectionPipeline {
    pub fn new(config: &ModelConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let class_names = if config.class_names.is_empty() {
            log::warn!("No label table configured, naming classes by index");
            label_table::placeholder_names(config.num_classes)
        } else {
            config.class_names.clone()
        };

        log::info!(
            "Detection pipeline: {} anchors, {} classes, pre-filter {}, IoU {}",
            config.anchors.len(),
            config.num_classes,
            config.min_score,
            config.iou_threshold
        );

        Ok(Self {
            anchors: config.anchors.clone(),
            class_names,
            num_classes: config.num_classes,
            min_score: config.min_score,
            iou_threshold: config.iou_threshold,
        })
    }

    pub fn run(&self, raw: &RawOutput, image_width: u32, image_height: u32) -> Result<Vec<Detection>, DetectError> {
        run(
            raw,
            &self.anchors,
            self.num_classes,
            self.min_score,
            self.iou_threshold,
            image_width,
            image_height,
            &self.class_names,
        )
    }
}
