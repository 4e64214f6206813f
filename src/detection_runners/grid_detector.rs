pub mod coordinate_mapper;
pub mod detection_worker;
pub mod grid_decoder;
pub mod image_ops;
pub mod nms;
pub mod pipeline;
pub mod score_filter;

pub use detection_worker::DetectionWorker;
pub use image_ops::{prepare_input, CropRegion};
pub use nms::{iou, suppress, Nms};
pub use pipeline::DetectionPipeline;
