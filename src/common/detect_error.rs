use thiserror::Error;

/// Errors raised by the detection stages.
///
/// Both variants describe a static mismatch between the model and its configuration,
/// so callers should log and skip the current image rather than retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectError {
    /// The raw output tensor disagrees with the declared anchors or class count.
    #[error("shape error: {0}")]
    Shape(String),

    /// A decoded class index has no entry in the label table.
    #[error("class index {index} is out of range for a label table of {len} names")]
    Index { index: usize, len: usize },
}

impl DetectError {
    pub fn shape(msg: impl Into<String>) -> Self {
        DetectError::Shape(msg.into())
    }
}
