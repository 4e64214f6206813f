use std::fs;
use std::path::Path;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use crate::common::Anchor;
use crate::data::label_table;

/// Static model configuration: anchor priors, label table and thresholds.
///
/// `min_score` is the coarse pre-filter applied before suppression, `display_threshold`
/// the stricter cut applied to the final detections. They are kept apart on purpose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub anchors: Vec<Anchor>,
    pub class_names: Vec<String>,
    pub labels_path: Option<String>,
    pub num_classes: usize,
    pub input_size: u32,
    pub min_score: f32,
    pub display_threshold: f32,
    pub iou_threshold: f32,
    pub max_detections: Option<usize>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        let class_names = label_table::coco_names();
        Self {
            anchors: Anchor::yolo_v2_coco(),
            num_classes: class_names.len(),
            class_names,
            labels_path: None,
            input_size: 416,
            min_score: 0.1,
            display_threshold: 0.3,
            iou_threshold: 0.3,
            max_detections: Some(20),
        }
    }
}

impl ModelConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Loads a JSON config. When `labels_path` is set the label table is read from it,
    /// relative paths being resolved against the config file's directory.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read model config {}", path.display()))?;
        let mut config: ModelConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse model config {}", path.display()))?;

        if let Some(labels_path) = &config.labels_path {
            let labels_path = match path.parent() {
                Some(dir) => dir.join(labels_path),
                None => Path::new(labels_path).to_path_buf(),
            };
            config.class_names = label_table::load_labels(labels_path)?;
        }

        config.validate()?;
        log::info!("Loaded model config from {}", path.display());
        Ok(config)
    }

    pub fn with_anchors(mut self, anchors: &[Anchor]) -> Self {
        self.anchors = anchors.to_vec();
        self
    }

    pub fn with_flat_anchors(mut self, values: &[f32]) -> anyhow::Result<Self> {
        self.anchors = Anchor::from_flat(values)?;
        Ok(self)
    }

    pub fn with_names(mut self, names: &[&str]) -> Self {
        self.class_names = names.iter().map(|x| x.to_string()).collect::<Vec<String>>();
        self
    }

    pub fn with_nc(mut self, num_classes: usize) -> Self {
        self.num_classes = num_classes;
        self
    }

    pub fn with_input_size(mut self, input_size: u32) -> Self {
        self.input_size = input_size;
        self
    }

    pub fn with_min_score(mut self, x: f32) -> Self {
        self.min_score = x;
        self
    }

    pub fn with_display_threshold(mut self, x: f32) -> Self {
        self.display_threshold = x;
        self
    }

    pub fn with_iou(mut self, x: f32) -> Self {
        self.iou_threshold = x;
        self
    }

    pub fn with_max_detections(mut self, x: Option<usize>) -> Self {
        self.max_detections = x;
        self
    }

    /// Rejects configurations no run could succeed with.
    ///
    /// A label table shorter than the class count is only warned about: it becomes an
    /// error when a surviving box actually points past its end.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.anchors.is_empty() {
            bail!("At least one anchor is required.");
        }
        if let Some(bad) = self.anchors.iter().find(|a| !a.is_valid()) {
            bail!("Anchor sizes must be positive and finite, got {:?}", bad);
        }
        if self.num_classes == 0 {
            bail!("The number of classes must be greater than zero.");
        }
        if self.input_size == 0 {
            bail!("The model input size must be greater than zero.");
        }
        if !(self.min_score >= 0.) || !self.min_score.is_finite() {
            bail!("min_score must be a non-negative number, got {}", self.min_score);
        }
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            bail!("iou_threshold must lie in [0, 1], got {}", self.iou_threshold);
        }
        if !self.display_threshold.is_finite() {
            bail!("display_threshold must be finite, got {}", self.display_threshold);
        }

        if self.class_names.len() < self.num_classes {
            log::warn!(
                "Label table holds {} names but the model predicts {} classes",
                self.class_names.len(),
                self.num_classes
            );
        }
        if self.min_score > self.display_threshold {
            log::warn!(
                "Pre-filter min_score {} is stricter than the display threshold {}",
                self.min_score,
                self.display_threshold
            );
        }
        Ok(())
    }

    pub fn to_string(&self) -> String {
        format!("Anchors: {:?}\n\
        Classes: {} ({} names)\n\
        Model Input Resolution: {}x{}\n\
        Pre-filter Score: {}\n\
        Display Threshold: {}\n\
        IoU Threshold: {}",
                self.anchors, self.num_classes, self.class_names.len(),
                self.input_size, self.input_size, self.min_score,
                self.display_threshold, self.iou_threshold)
    }
}
