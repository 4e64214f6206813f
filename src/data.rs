pub mod label_table;
pub mod send_channels;

pub use label_table::{coco_names, load_labels, COCO_CLASSES};
pub use send_channels::{DetectionJob, DetectionOutcome, DetectionState, SendState};
