use std::time::Instant;
use image::DynamicImage;
use ndarray::Array4;
use crate::common::{apply_display_threshold, Detection, ModelConfig, RawOutput};
use crate::detection_runners::grid_detector::{prepare_input, CropRegion, DetectionPipeline};
use crate::utils;

/// The external neural network: normalized NHWC crop in, raw detection grid out.
pub trait InferenceEngine {
    fn infer(&mut self, input: &Array4<f32>) -> anyhow::Result<RawOutput>;
}

/// Full image-to-detections flow around an [`InferenceEngine`].
pub struct Detector<E> {
    engine: E,
    pipeline: DetectionPipeline,
    input_size: u32,
    display_threshold: f32,
    max_detections: Option<usize>,
    profile: bool,
}

impl<E: InferenceEngine> Detector<E> {
    pub fn new(engine: E, config: &ModelConfig) -> anyhow::Result<Self> {
        Ok(Self {
            engine,
            pipeline: DetectionPipeline::new(config)?,
            input_size: config.input_size,
            display_threshold: config.display_threshold,
            max_detections: config.max_detections,
            profile: false,
        })
    }

    pub fn with_profile(mut self, profile: bool) -> Self {
        self.profile = profile;
        self
    }

    pub fn pipeline(&self) -> &DetectionPipeline {
        &self.pipeline
    }

    /// Detects objects in `crop` of `image`, returning rects in source-image pixels
    /// that passed the display threshold.
    pub fn detect(&mut self, image: &DynamicImage, crop: &CropRegion) -> anyhow::Result<Vec<Detection>> {
        let detect_time = Instant::now();
        let mut elapsed = detect_time.elapsed();

        let t_pre = Instant::now();
        let input = prepare_input(image, crop, self.input_size)?;
        let t_pre = t_pre.elapsed();
        elapsed = utils::trace("Preprocessing input", detect_time, elapsed);

        let t_exe = Instant::now();
        let raw = self.engine.infer(&input)?;
        let t_exe = t_exe.elapsed();
        elapsed = utils::trace("Detection run", detect_time, elapsed);

        let t_post = Instant::now();
        let detections = self.pipeline.run(&raw, self.input_size, self.input_size)?;
        let detections: Vec<Detection> = apply_display_threshold(&detections, self.display_threshold, self.max_detections)
            .iter()
            .map(|d| crop.map_detection(d, self.input_size))
            .collect();
        let t_post = t_post.elapsed();
        utils::trace("Postprocessing", detect_time, elapsed);

        if self.profile {
            log::info!("> Preprocess: {t_pre:?} | Inference: {t_exe:?} | Postprocess: {t_post:?}");
        }

        Ok(detections)
    }
}
