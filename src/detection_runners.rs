pub mod grid_detector;
pub mod inference_process;

pub use grid_detector::*;
pub use inference_process::*;
