mod anchor;
mod corner_box;
mod decoded_box;
mod detect_error;
mod detection;
mod model_config;
mod raw_output;
mod scored_box;

pub use anchor::*;
pub use corner_box::*;
pub use decoded_box::*;
pub use detect_error::*;
pub use detection::*;
pub use model_config::*;
pub use raw_output::*;
pub use scored_box::*;
