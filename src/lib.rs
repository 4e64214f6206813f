mod utils;
pub mod common;
pub mod data;
pub mod detection_runners;

use crate::common::{DetectError, Detection, ModelConfig, RawOutput};
use crate::detection_runners::DetectionPipeline;

pub type Result<T, E = DetectError> = std::result::Result<T, E>;

pub fn init_pipeline(model_details: &ModelConfig) -> anyhow::Result<DetectionPipeline> {
    log::info!("Initializing detection pipeline\n{}", model_details.to_string());
    DetectionPipeline::new(model_details)
}

/// Runs the pipeline and applies the configured display threshold.
pub fn run_detection(pipeline: &DetectionPipeline, raw: &RawOutput, image_width: u32, image_height: u32,
                     model_details: &ModelConfig) -> Result<Vec<Detection>> {
    let detections = pipeline.run(raw, image_width, image_height)?;
    Ok(common::apply_display_threshold(&detections, model_details.display_threshold, model_details.max_detections))
}
